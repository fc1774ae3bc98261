//! # Application Store
//!
//! `AppState` is the single source of truth for a storefront session, and
//! `Action` is the only way to change it.
//!
//! ## Reducer Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   command ──► Action ──► AppState::dispatch ──► new AppState            │
//! │                              │                                          │
//! │                              ├── Ok(())  state updated                  │
//! │                              └── Err(e)  state untouched                │
//! │                                                                         │
//! │   SetUser · AddToCart · UpdateCartItem · RemoveFromCart · ClearCart     │
//! │   SetPickupTime · SetCurrentOrder · SetIsOpen · AddReservation          │
//! │   UpdateReservationStatus · UpdateOrderStatus                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action is validated before anything is written, so a failed
//! dispatch never leaves a half-applied change behind.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::schedule::ClockTime;
use crate::types::{Order, OrderStatus, Product, Reservation, ReservationStatus, User};

// =============================================================================
// State
// =============================================================================

/// Everything the storefront knows about the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppState {
    /// Signed-in customer, if any.
    pub user: Option<User>,

    pub cart: Cart,

    /// Whether the store is currently inside its opening window.
    pub is_open: bool,

    /// Pickup slot chosen on the scheduling screen.
    #[ts(as = "Option<String>")]
    pub selected_pickup_time: Option<ClockTime>,

    /// Order shown on the confirmation screen.
    pub current_order: Option<Order>,

    /// Every order placed this session, oldest first.
    pub orders: Vec<Order>,

    /// Every reservation made this session, oldest first.
    pub reservations: Vec<Reservation>,

    /// Reservation shown on the reservation confirmation screen.
    pub latest_reservation: Option<Reservation>,
}

// =============================================================================
// Actions
// =============================================================================

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Sign in (`Some`) or sign out (`None`).
    SetUser(Option<User>),

    /// Add units of a product, merging with an existing line.
    AddToCart { product: Product, quantity: i64 },

    /// Set a line's quantity; zero or less removes the line.
    UpdateCartItem { item_id: String, quantity: i64 },

    RemoveFromCart { item_id: String },

    /// Empty the cart and forget the chosen pickup time.
    ClearCart,

    SetPickupTime(Option<ClockTime>),

    /// Show an order on the confirmation screen. `Some` also records it in
    /// the order history.
    SetCurrentOrder(Option<Order>),

    SetIsOpen(bool),

    /// Record a reservation and show it on the confirmation screen.
    AddReservation(Reservation),

    UpdateReservationStatus {
        reservation_id: String,
        status: ReservationStatus,
    },

    /// Move an order forward in its lifecycle.
    UpdateOrderStatus { order_id: String, status: OrderStatus },
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetUser(_) => "set_user",
            Action::AddToCart { .. } => "add_to_cart",
            Action::UpdateCartItem { .. } => "update_cart_item",
            Action::RemoveFromCart { .. } => "remove_from_cart",
            Action::ClearCart => "clear_cart",
            Action::SetPickupTime(_) => "set_pickup_time",
            Action::SetCurrentOrder(_) => "set_current_order",
            Action::SetIsOpen(_) => "set_is_open",
            Action::AddReservation(_) => "add_reservation",
            Action::UpdateReservationStatus { .. } => "update_reservation_status",
            Action::UpdateOrderStatus { .. } => "update_order_status",
        }
    }

    /// Whether applying the action can change the cart contents.
    pub fn changes_cart(&self) -> bool {
        matches!(
            self,
            Action::AddToCart { .. }
                | Action::UpdateCartItem { .. }
                | Action::RemoveFromCart { .. }
                | Action::ClearCart
        )
    }
}

// =============================================================================
// Reducer
// =============================================================================

impl AppState {
    pub fn new(is_open: bool) -> Self {
        AppState {
            is_open,
            ..Default::default()
        }
    }

    /// Applies `action`. On `Err` the state is unchanged.
    pub fn dispatch(&mut self, action: Action) -> CoreResult<()> {
        let name = action.name();
        let result = self.apply(action);

        match &result {
            Ok(()) => debug!(
                action = name,
                cart_lines = self.cart.line_count(),
                orders = self.orders.len(),
                reservations = self.reservations.len(),
                "Action applied"
            ),
            Err(e) => debug!(action = name, error = %e, "Action rejected"),
        }

        result
    }

    fn apply(&mut self, action: Action) -> CoreResult<()> {
        match action {
            Action::SetUser(user) => {
                self.user = user;
            }

            Action::AddToCart { product, quantity } => {
                self.cart.add(&product, quantity)?;
            }

            Action::UpdateCartItem { item_id, quantity } => {
                self.cart.set_quantity(&item_id, quantity)?;
            }

            Action::RemoveFromCart { item_id } => {
                self.cart.remove(&item_id)?;
            }

            Action::ClearCart => {
                self.cart.clear();
                self.selected_pickup_time = None;
            }

            Action::SetPickupTime(time) => {
                self.selected_pickup_time = time;
            }

            Action::SetCurrentOrder(order) => {
                if let Some(order) = &order {
                    match self.orders.iter_mut().find(|o| o.id == order.id) {
                        Some(existing) => *existing = order.clone(),
                        None => self.orders.push(order.clone()),
                    }
                }
                self.current_order = order;
            }

            Action::SetIsOpen(is_open) => {
                self.is_open = is_open;
            }

            Action::AddReservation(reservation) => {
                self.reservations.push(reservation.clone());
                self.latest_reservation = Some(reservation);
            }

            Action::UpdateReservationStatus {
                reservation_id,
                status,
            } => {
                let reservation = self
                    .reservations
                    .iter_mut()
                    .find(|r| r.id == reservation_id)
                    .ok_or_else(|| CoreError::ReservationNotFound(reservation_id.clone()))?;
                reservation.status = status;

                if let Some(latest) = self
                    .latest_reservation
                    .as_mut()
                    .filter(|r| r.id == reservation_id)
                {
                    latest.status = status;
                }
            }

            Action::UpdateOrderStatus { order_id, status } => {
                let order = self
                    .orders
                    .iter_mut()
                    .find(|o| o.id == order_id)
                    .ok_or_else(|| CoreError::OrderNotFound(order_id.clone()))?;

                if !order.status.can_advance_to(status) {
                    return Err(CoreError::InvalidOrderTransition {
                        order_id,
                        from: order.status.to_string(),
                        to: status.to_string(),
                    });
                }
                order.status = status;

                if let Some(current) = self.current_order.as_mut().filter(|o| o.id == order_id) {
                    current.status = status;
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn cart_item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn find_reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::{PaymentMethod, ReservationKind};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn product(id: &str) -> Product {
        catalog::get(id).unwrap().clone()
    }

    fn add(state: &mut AppState, id: &str, quantity: i64) {
        state
            .dispatch(Action::AddToCart {
                product: product(id),
                quantity,
            })
            .unwrap();
    }

    #[test]
    fn test_changes_cart() {
        assert!(Action::ClearCart.changes_cart());
        assert!(Action::RemoveFromCart {
            item_id: "picanha-1".to_string()
        }
        .changes_cart());
        assert!(!Action::SetIsOpen(false).changes_cart());
        assert!(!Action::SetPickupTime(None).changes_cart());
    }

    fn joao() -> User {
        User {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
        }
    }

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            items: Vec::new(),
            total: Money::from_cents(2590),
            pickup_time: "08:30".parse().unwrap(),
            status,
            payment_method: PaymentMethod::Pix,
            pickup_code: id.to_string(),
            customer_name: "João Silva".to_string(),
            customer_email: "joao@email.com".to_string(),
            customer_phone: "(11) 99999-9999".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 9, 8, 5, 0).unwrap(),
        }
    }

    fn reservation(id: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            name: "Maria Souza".to_string(),
            phone: "(11) 98888-7777".to_string(),
            email: "maria@email.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            time: "12:00".parse().unwrap(),
            guests: 6,
            kind: ReservationKind::Family,
            status: ReservationStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_add_to_cart_merges_lines() {
        let mut state = AppState::default();
        add(&mut state, "frango-com-recheio", 1);
        add(&mut state, "frango-com-recheio", 2);

        assert_eq!(state.cart.line_count(), 1);
        assert_eq!(state.cart.items[0].quantity, 3);
        assert_eq!(state.cart_total().cents(), 7770);
    }

    #[test]
    fn test_update_cart_item_to_zero_removes() {
        let mut state = AppState::default();
        add(&mut state, "picanha", 1);
        let id = state.cart.items[0].id.clone();

        state
            .dispatch(Action::UpdateCartItem {
                item_id: id,
                quantity: 0,
            })
            .unwrap();

        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_line_is_rejected() {
        let mut state = AppState::default();
        add(&mut state, "picanha", 1);
        let before = state.clone();

        let err = state
            .dispatch(Action::RemoveFromCart {
                item_id: "nope".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::CartItemNotFound(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_cart_forgets_pickup_time() {
        let mut state = AppState::default();
        add(&mut state, "maminha", 2);
        state
            .dispatch(Action::SetPickupTime(Some("08:40".parse().unwrap())))
            .unwrap();

        state.dispatch(Action::ClearCart).unwrap();

        assert!(state.cart.is_empty());
        assert!(state.selected_pickup_time.is_none());
    }

    #[test]
    fn test_set_current_order_records_history() {
        let mut state = AppState::default();
        state
            .dispatch(Action::SetCurrentOrder(Some(order("PD000001", OrderStatus::Paid))))
            .unwrap();
        state
            .dispatch(Action::SetCurrentOrder(Some(order("PD000002", OrderStatus::Paid))))
            .unwrap();

        assert_eq!(state.orders.len(), 2);
        assert_eq!(state.current_order.as_ref().unwrap().id, "PD000002");

        // clearing the confirmation keeps history
        state.dispatch(Action::SetCurrentOrder(None)).unwrap();
        assert!(state.current_order.is_none());
        assert_eq!(state.orders.len(), 2);
    }

    #[test]
    fn test_set_current_order_same_id_does_not_duplicate() {
        let mut state = AppState::default();
        let o = order("PD000001", OrderStatus::Paid);
        state.dispatch(Action::SetCurrentOrder(Some(o.clone()))).unwrap();
        state.dispatch(Action::SetCurrentOrder(Some(o))).unwrap();

        assert_eq!(state.orders.len(), 1);
    }

    #[test]
    fn test_add_reservation_sets_latest() {
        let mut state = AppState::default();
        state
            .dispatch(Action::AddReservation(reservation("RES-000001")))
            .unwrap();

        assert_eq!(state.reservations.len(), 1);
        assert_eq!(state.latest_reservation.as_ref().unwrap().id, "RES-000001");
    }

    #[test]
    fn test_update_reservation_status() {
        let mut state = AppState::default();
        state
            .dispatch(Action::AddReservation(reservation("RES-000001")))
            .unwrap();

        state
            .dispatch(Action::UpdateReservationStatus {
                reservation_id: "RES-000001".to_string(),
                status: ReservationStatus::Confirmed,
            })
            .unwrap();

        assert_eq!(state.reservations[0].status, ReservationStatus::Confirmed);
        assert_eq!(
            state.latest_reservation.as_ref().unwrap().status,
            ReservationStatus::Confirmed
        );
    }

    #[test]
    fn test_update_unknown_reservation() {
        let mut state = AppState::default();
        let err = state
            .dispatch(Action::UpdateReservationStatus {
                reservation_id: "RES-999999".to_string(),
                status: ReservationStatus::Cancelled,
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::ReservationNotFound(_)));
    }

    #[test]
    fn test_update_order_status_forward_only() {
        let mut state = AppState::default();
        state
            .dispatch(Action::SetCurrentOrder(Some(order("PD000001", OrderStatus::Paid))))
            .unwrap();

        state
            .dispatch(Action::UpdateOrderStatus {
                order_id: "PD000001".to_string(),
                status: OrderStatus::Ready,
            })
            .unwrap();
        assert_eq!(state.orders[0].status, OrderStatus::Ready);
        assert_eq!(state.current_order.as_ref().unwrap().status, OrderStatus::Ready);

        let err = state
            .dispatch(Action::UpdateOrderStatus {
                order_id: "PD000001".to_string(),
                status: OrderStatus::Preparing,
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidOrderTransition { .. }));
        assert_eq!(state.orders[0].status, OrderStatus::Ready);
    }

    #[test]
    fn test_session_queries() {
        let mut state = AppState::new(true);
        assert!(state.is_open);
        assert!(!state.is_signed_in());
        assert!(!state.is_admin());

        state.dispatch(Action::SetUser(Some(joao()))).unwrap();
        assert!(state.is_signed_in());
        assert!(state.is_admin());

        state.dispatch(Action::SetUser(None)).unwrap();
        assert!(!state.is_signed_in());
    }

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_value(Action::SetIsOpen(true)).unwrap();
        assert_eq!(json["type"], "set_is_open");
        assert_eq!(json["payload"], true);
    }
}
