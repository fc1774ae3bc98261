//! # Admin Commands
//!
//! Dashboard and order/reservation management. Every command here requires
//! the admin account to be signed in.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  Dashboard   │   │  Orders (newest first)   │   │  Reservations            │
//! │  revenue     │   │  pending → paid →        │   │  pending ⇄ confirmed     │
//! │  counts      │   │  preparing → ready →     │   │          ⇄ cancelled     │
//! │  7-day chart │   │  completed (forward only)│   │                          │
//! └──────────────┘   └──────────────────────────┘   └──────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use delicia_core::admin::{orders_newest_first, reservations_newest_first, DashboardSummary};
use delicia_core::{
    Action, AppState, CoreError, Order, OrderStatus, Reservation, ReservationStatus,
};

use crate::error::ApiError;
use crate::state::StoreState;

fn require_admin(state: &AppState) -> Result<(), ApiError> {
    match &state.user {
        None => Err(ApiError::login_required()),
        Some(user) if !user.is_admin() => {
            warn!(user_id = %user.id, "Admin access refused");
            Err(ApiError::forbidden("Admin access required"))
        }
        Some(_) => Ok(()),
    }
}

/// Revenue, counts and the daily sales chart ending `today`.
pub fn dashboard(
    store: &StoreState,
    today: NaiveDate,
    days: u32,
) -> Result<DashboardSummary, ApiError> {
    debug!(%today, days, "dashboard command");
    store.with_state(|s| {
        require_admin(s)?;
        Ok(DashboardSummary::build(&s.orders, &s.reservations, today, days))
    })
}

pub fn list_orders(store: &StoreState) -> Result<Vec<Order>, ApiError> {
    debug!("list_orders command");
    store.with_state(|s| {
        require_admin(s)?;
        Ok(orders_newest_first(&s.orders).into_iter().cloned().collect())
    })
}

pub fn list_reservations(store: &StoreState) -> Result<Vec<Reservation>, ApiError> {
    debug!("list_reservations command");
    store.with_state(|s| {
        require_admin(s)?;
        Ok(reservations_newest_first(&s.reservations)
            .into_iter()
            .cloned()
            .collect())
    })
}

/// Moves an order forward. Going back a step is refused.
pub fn update_order_status(
    store: &StoreState,
    order_id: &str,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    debug!(order_id = %order_id, %status, "update_order_status command");

    let order = store.with_state_mut(|s| -> Result<Order, ApiError> {
        require_admin(s)?;
        s.dispatch(Action::UpdateOrderStatus {
            order_id: order_id.to_string(),
            status,
        })?;
        s.find_order(order_id)
            .cloned()
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()).into())
    })?;

    info!(order_id = %order.id, %status, "Order status updated");
    Ok(order)
}

pub fn update_reservation_status(
    store: &StoreState,
    reservation_id: &str,
    status: ReservationStatus,
) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %reservation_id, %status, "update_reservation_status command");

    let reservation = store.with_state_mut(|s| -> Result<Reservation, ApiError> {
        require_admin(s)?;
        s.dispatch(Action::UpdateReservationStatus {
            reservation_id: reservation_id.to_string(),
            status,
        })?;
        s.find_reservation(reservation_id)
            .cloned()
            .ok_or_else(|| CoreError::ReservationNotFound(reservation_id.to_string()).into())
    })?;

    info!(reservation_id = %reservation.id, %status, "Reservation status updated");
    Ok(reservation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use delicia_core::{PaymentMethod, ReservationKind, User};
    use delicia_core::Money;

    use crate::error::ErrorCode;
    use crate::services::SimulatedGoogleLogin;

    fn order(id: &str, day: u32) -> Order {
        Order {
            id: id.to_string(),
            items: Vec::new(),
            total: Money::from_cents(4590),
            pickup_time: "08:30".parse().unwrap(),
            status: OrderStatus::Paid,
            payment_method: PaymentMethod::Pix,
            pickup_code: id.to_string(),
            customer_name: "Ana Lima".to_string(),
            customer_email: "ana@email.com".to_string(),
            customer_phone: "(21) 97777-6666".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap(),
        }
    }

    fn reservation(id: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            name: "Carlos Pereira".to_string(),
            phone: "(31) 96666-5555".to_string(),
            email: "carlos@email.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            time: "15:00".parse().unwrap(),
            guests: 6,
            kind: ReservationKind::Family,
            status: ReservationStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn admin_store() -> StoreState {
        let state = AppState {
            user: Some(SimulatedGoogleLogin::demo_user()),
            orders: vec![order("PD000001", 3), order("PD000002", 8)],
            reservations: vec![reservation("RES-000001")],
            ..Default::default()
        };
        StoreState::new(state)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
    }

    #[test]
    fn test_requires_admin() {
        let store = admin_store();
        store.dispatch(Action::SetUser(None)).unwrap();
        assert_eq!(
            list_orders(&store).unwrap_err().code,
            ErrorCode::LoginRequired
        );

        store
            .dispatch(Action::SetUser(Some(User {
                id: "42".to_string(),
                name: "Maria Souza".to_string(),
                email: "maria@email.com".to_string(),
                phone: "(11) 98888-7777".to_string(),
            })))
            .unwrap();
        assert_eq!(
            dashboard(&store, today(), 7).unwrap_err().code,
            ErrorCode::Forbidden
        );
        assert_eq!(
            update_order_status(&store, "PD000001", OrderStatus::Ready)
                .unwrap_err()
                .code,
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn test_dashboard() {
        let summary = dashboard(&admin_store(), today(), 7).unwrap();
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue.cents(), 2 * 4590);
        assert_eq!(summary.total_reservations, 1);
        assert_eq!(summary.sales_by_day.len(), 7);
    }

    #[test]
    fn test_lists_are_newest_first() {
        let store = admin_store();
        assert_eq!(list_orders(&store).unwrap()[0].id, "PD000002");
        assert_eq!(list_reservations(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_order_status_moves_forward_only() {
        let store = admin_store();

        let order = update_order_status(&store, "PD000001", OrderStatus::Preparing).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);

        let err = update_order_status(&store, "PD000001", OrderStatus::Paid).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = update_order_status(&store, "PD999999", OrderStatus::Ready).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_reservation_status() {
        let store = admin_store();

        let r = update_reservation_status(&store, "RES-000001", ReservationStatus::Confirmed)
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);

        let r = update_reservation_status(&store, "RES-000001", ReservationStatus::Pending)
            .unwrap();
        assert_eq!(r.status, ReservationStatus::Pending);
    }
}
