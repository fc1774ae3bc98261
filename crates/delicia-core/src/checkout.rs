//! # Checkout
//!
//! Turns a ready cart into an `Order`.
//!
//! ```text
//! Cart ──► begin (signed in, not empty) ──► pickup slot ──► payment ──► Order
//!                                                                  (status Paid)
//! ```
//!
//! Ids and timestamps are passed in by the caller; this module never reads
//! the clock.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::AppState;
use crate::types::{Order, OrderStatus, PaymentMethod, User};

/// Stages a session may be in on the way to payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutReadiness {
    /// Cart has nothing in it.
    EmptyCart,
    /// Customer must sign in first.
    NeedsLogin,
    /// Pickup slot not chosen yet.
    NeedsPickupTime,
    /// Ready to pay.
    Ready,
}

impl CheckoutReadiness {
    /// Where the session currently stands.
    pub fn of(state: &AppState) -> Self {
        if state.cart.is_empty() {
            CheckoutReadiness::EmptyCart
        } else if !state.is_signed_in() {
            CheckoutReadiness::NeedsLogin
        } else if state.selected_pickup_time.is_none() {
            CheckoutReadiness::NeedsPickupTime
        } else {
            CheckoutReadiness::Ready
        }
    }

    /// Converts anything short of `Ready` into the matching error.
    pub fn require_ready(self) -> CoreResult<()> {
        match self {
            CheckoutReadiness::EmptyCart => Err(CoreError::EmptyCart),
            CheckoutReadiness::NeedsLogin => Err(CoreError::NotSignedIn),
            CheckoutReadiness::NeedsPickupTime => Err(CoreError::NoPickupTime),
            CheckoutReadiness::Ready => Ok(()),
        }
    }
}

/// Checks the session may start scheduling a pickup: a non-empty cart and
/// a signed-in customer. Pickup time is chosen after this step.
pub fn ensure_can_begin(state: &AppState) -> CoreResult<&User> {
    if state.cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    state.user.as_ref().ok_or(CoreError::NotSignedIn)
}

/// Order id: `PD` followed by the last six digits of the epoch millis.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    format!("PD{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// Builds the order for the current cart.
///
/// Lines, total, pickup time and customer contact are copied out of the
/// state, so clearing the cart afterwards does not affect the order. The
/// state itself is not modified; the caller dispatches
/// `Action::SetCurrentOrder` with the result.
pub fn place_order(
    state: &AppState,
    method: PaymentMethod,
    order_id: String,
    now: DateTime<Utc>,
) -> CoreResult<Order> {
    CheckoutReadiness::of(state).require_ready()?;

    let (Some(user), Some(pickup_time)) = (state.user.as_ref(), state.selected_pickup_time) else {
        // covered by require_ready
        return Err(CoreError::NotSignedIn);
    };

    let order = Order {
        pickup_code: order_id.clone(),
        id: order_id,
        items: state.cart.items.clone(),
        total: state.cart.total(),
        pickup_time,
        status: OrderStatus::Paid,
        payment_method: method,
        customer_name: user.name.clone(),
        customer_email: user.email.clone(),
        customer_phone: user.phone.clone(),
        created_at: now,
    };

    debug!(
        order_id = %order.id,
        total = order.total.cents(),
        lines = order.items.len(),
        pickup = %order.pickup_time,
        "Order built"
    );

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================
