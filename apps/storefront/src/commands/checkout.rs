//! # Checkout Commands
//!
//! From a filled cart to a paid order with a pickup code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  begin_checkout ──► pickup_slots ──► select_pickup_time                 │
//! │   (signed in,                          (slot has room)                  │
//! │    cart not empty,                           │                          │
//! │    store open)                               ▼                          │
//! │                                      pay(method) ─── 2.5s ──► Order     │
//! │                                      (one at a time)        (Paid)      │
//! │                                                               │         │
//! │                                      finish_checkout ◄────────┘         │
//! │                                      (cart cleared, code shown)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use delicia_core::checkout::{ensure_can_begin, generate_order_id, place_order, CheckoutReadiness};
use delicia_core::schedule::{ensure_bookable, ClockTime, TimeSlot};
use delicia_core::{Action, CartItem, CartTotals, CoreError, Order, PaymentMethod, User};

use crate::error::ApiError;
use crate::services::{PaymentGateway, PaymentReceipt};
use crate::state::{ConfigState, StoreState};

/// What the scheduling screen needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub customer: User,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub pickup_time: Option<ClockTime>,
    pub slots: Vec<TimeSlot>,
}

/// A paid order and the charge behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub order: Order,
    pub receipt: PaymentReceipt,
}

/// Opens checkout for the current cart.
///
/// ## Errors
/// - `CART_ERROR` when the cart is empty
/// - `LOGIN_REQUIRED` when nobody is signed in
/// - `BUSINESS_LOGIC` when the store is closed and hours are enforced
pub fn begin_checkout(
    store: &StoreState,
    config: &ConfigState,
    bookings: &BTreeMap<ClockTime, u32>,
) -> Result<CheckoutSummary, ApiError> {
    debug!("begin_checkout command");

    let summary = store.with_state(|s| {
        let customer = ensure_can_begin(s)?.clone();
        ensure_store_open(s.is_open, config)?;

        Ok::<_, CoreError>(CheckoutSummary {
            customer,
            items: s.cart.items.clone(),
            totals: CartTotals::from(&s.cart),
            pickup_time: s.selected_pickup_time,
            slots: config.pickup.slots(bookings),
        })
    })?;

    info!(
        user_id = %summary.customer.id,
        total = summary.totals.total.cents(),
        "Checkout started"
    );
    Ok(summary)
}

/// Pickup slots with their remaining room.
pub fn pickup_slots(config: &ConfigState, bookings: &BTreeMap<ClockTime, u32>) -> Vec<TimeSlot> {
    debug!("pickup_slots command");
    config.pickup.slots(bookings)
}

/// Chooses the pickup slot, given as `HH:MM`.
pub fn select_pickup_time(
    store: &StoreState,
    config: &ConfigState,
    bookings: &BTreeMap<ClockTime, u32>,
    time: &str,
) -> Result<ClockTime, ApiError> {
    debug!(time = %time, "select_pickup_time command");

    let time: ClockTime = time.parse().map_err(CoreError::from)?;
    ensure_store_open(store.is_open(), config)?;
    ensure_bookable(&config.pickup.slots(bookings), time)?;

    store.dispatch(Action::SetPickupTime(Some(time)))?;

    info!(pickup = %time, "Pickup time selected");
    Ok(time)
}

/// Charges the cart and records the order.
///
/// Only one payment runs at a time; a second call while one is in flight
/// fails with `PAYMENT_ERROR`, and so does any cart change until the charge
/// settles. The order is fixed before the charge, so what is charged is
/// exactly what gets recorded. The cart stays filled until
/// [`finish_checkout`].
///
/// ## Errors
/// - `CART_ERROR` / `LOGIN_REQUIRED` / `BUSINESS_LOGIC` when checkout is
///   not ready
/// - `BUSINESS_LOGIC` when the store has closed or the slot filled up
/// - `PAYMENT_ERROR` when the gateway declines
pub async fn pay(
    store: &StoreState,
    config: &ConfigState,
    bookings: &BTreeMap<ClockTime, u32>,
    gateway: &dyn PaymentGateway,
    method: PaymentMethod,
) -> Result<PaymentOutcome, ApiError> {
    debug!(%method, "pay command");

    let _guard = store.begin_payment()?;

    let now = Utc::now();
    let order = store.with_state(|s| {
        CheckoutReadiness::of(s).require_ready()?;
        ensure_store_open(s.is_open, config)?;
        let order = place_order(s, method, generate_order_id(now), now)?;
        ensure_bookable(&config.pickup.slots(bookings), order.pickup_time)?;
        Ok::<_, CoreError>(order)
    })?;

    let receipt = gateway.charge(order.total, method).await?;

    if let Err(e) = store.dispatch(Action::SetCurrentOrder(Some(order.clone()))) {
        warn!(
            order_id = %order.id,
            transaction_id = %receipt.transaction_id,
            error = %e,
            "Charged order could not be recorded"
        );
        return Err(e);
    }

    info!(
        order_id = %order.id,
        total = order.total.cents(),
        %method,
        pickup = %order.pickup_time,
        "Order placed"
    );

    Ok(PaymentOutcome { order, receipt })
}

/// Shows the confirmation: returns the current order and empties the cart.
pub fn finish_checkout(store: &StoreState) -> Result<Order, ApiError> {
    debug!("finish_checkout command");

    let order = store
        .with_state(|s| s.current_order.clone())
        .ok_or_else(|| ApiError::not_found("Order", "current"))?;

    store.dispatch(Action::ClearCart)?;

    info!(order_id = %order.id, pickup_code = %order.pickup_code, "Checkout finished");
    Ok(order)
}

fn ensure_store_open(is_open: bool, config: &ConfigState) -> Result<(), CoreError> {
    if config.enforce_store_hours && !is_open {
        return Err(CoreError::StoreClosed(config.pickup.hours_label()));
    }
    Ok(())
}
