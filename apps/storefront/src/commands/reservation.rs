//! # Reservation Commands
//!
//! Table reservations for corporate and family events. Reservations are
//! filed as pending and confirmed later from the admin panel.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use delicia_core::reservation::{generate_reservation_id, ReservationRequest};
use delicia_core::{Action, CoreError, Reservation};

use crate::error::ApiError;
use crate::services::ReservationDesk;
use crate::state::StoreState;

/// A blank form, contact fields filled from the signed-in customer.
pub fn reservation_form(store: &StoreState) -> ReservationRequest {
    debug!("reservation_form command");
    store.with_state(|s| ReservationRequest::prefilled(s.user.as_ref()))
}

/// Validates and files a reservation.
///
/// `today` is the customer's local date; reservations for earlier days are
/// refused. Validation runs before the desk is contacted.
pub async fn submit_reservation(
    store: &StoreState,
    desk: &dyn ReservationDesk,
    request: ReservationRequest,
    today: NaiveDate,
) -> Result<Reservation, ApiError> {
    debug!(guests = request.guests, kind = ?request.kind, "submit_reservation command");

    request.validate(today).map_err(CoreError::from)?;

    let now = Utc::now();
    let reservation = request.into_reservation(generate_reservation_id(now), now, today)?;
    let reservation = desk.submit(reservation).await?;

    store.dispatch(Action::AddReservation(reservation.clone()))?;

    info!(
        reservation_id = %reservation.id,
        date = %reservation.date,
        time = %reservation.time,
        guests = reservation.guests,
        "Reservation filed"
    );
    Ok(reservation)
}

/// The reservation shown on the confirmation screen.
pub fn latest_reservation(store: &StoreState) -> Option<Reservation> {
    store.with_state(|s| s.latest_reservation.clone())
}
