//! # Reservation Desk
//!
//! Receives table reservations. The simulated desk takes a moment and then
//! files the reservation as pending; staff confirm it from the admin panel.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use delicia_core::Reservation;

use crate::error::ApiError;

#[async_trait]
pub trait ReservationDesk: Send + Sync {
    /// Files `reservation` and hands it back as stored.
    async fn submit(&self, reservation: Reservation) -> Result<Reservation, ApiError>;
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedReservationDesk {
    delay: Duration,
}

impl SimulatedReservationDesk {
    pub fn new(delay: Duration) -> Self {
        SimulatedReservationDesk { delay }
    }
}

#[async_trait]
impl ReservationDesk for SimulatedReservationDesk {
    async fn submit(&self, reservation: Reservation) -> Result<Reservation, ApiError> {
        debug!(reservation_id = %reservation.id, delay_ms = self.delay.as_millis() as u64, "Submitting reservation");
        tokio::time::sleep(self.delay).await;
        info!(reservation_id = %reservation.id, guests = reservation.guests, date = %reservation.date, "Reservation received");
        Ok(reservation)
    }
}
