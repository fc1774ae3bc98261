//! # Error Types
//!
//! Domain-specific error types for delicia-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  delicia-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app)                                               │
//! │  ├── ApiError         - What the frontend sees (serialized)            │
//! │  └── ConfigError      - storefront.toml / environment problems         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed `AppState::dispatch` always leaves the state untouched, so every
//! variant here is safe to surface and retry.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is switched off or sold out.
    ///
    /// ## When This Occurs
    /// - `available = false` in the catalog (e.g. filé duplo)
    /// - Stock level is `SoldOut`
    #[error("Product is not available for ordering: {0}")]
    ProductUnavailable(String),

    /// Product does not belong to the category a step expects.
    #[error("Product {product_id} is not in category {expected}")]
    WrongCategory { product_id: String, expected: String },

    /// Cart line id does not exist.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Operation needs a signed-in customer.
    #[error("Sign in required")]
    NotSignedIn,

    /// Payment attempted before a pickup slot was chosen.
    #[error("No pickup time selected")]
    NoPickupTime,

    /// Scheduling attempted outside store hours.
    #[error("Store is closed, pickups open {0}")]
    StoreClosed(String),

    /// Pickup time is outside the window or the slot is full.
    #[error("Pickup slot {0} is not available")]
    SlotUnavailable(String),

    /// Order id is unknown.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Order status may only move forward.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Reservation id is unknown.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements and are raised
/// before any state transition runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad email, bad clock time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
