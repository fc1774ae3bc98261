//! # delicia-core: Pure Business Logic for the Delícia Storefront
//!
//! This crate is the **heart** of the storefront. It contains the catalog,
//! cart math, pickup schedule and the single application reducer, all as
//! deterministic code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Delícia Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web views)                         │   │
//! │  │   Catalog ──► Cart ──► Scheduling ──► Payment ──► Confirmation  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront commands                             │   │
//! │  │   add_to_cart, select_pickup_time, pay, submit_reservation ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ delicia-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │  │ catalog │ │  cart   │ │ schedule │ │  store  │ │  admin  │  │   │
//! │  │  │ Product │ │CartItem │ │ TimeSlot │ │AppState │ │Dashboard│  │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • DETERMINISTIC             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Reservation, User, ...)
//! - [`money`] - Money type with integer centavos arithmetic
//! - [`catalog`] - The static product catalog
//! - [`cart`] - Cart lines with merge-by-product semantics
//! - [`schedule`] - Pickup window, slot table, store hours
//! - [`store`] - `AppState` and the `Action` reducer
//! - [`checkout`] - Turning a ready cart into an `Order`
//! - [`reservation`] - Table reservation requests
//! - [`kit`] - Step-by-step barbecue kit builder
//! - [`admin`] - Dashboard reporting over orders/reservations
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use delicia_core::catalog;
//! use delicia_core::store::{Action, AppState};
//!
//! let mut state = AppState::default();
//! let frango = catalog::get("frango-com-recheio").unwrap().clone();
//!
//! state.dispatch(Action::AddToCart { product: frango.clone(), quantity: 1 }).unwrap();
//! state.dispatch(Action::AddToCart { product: frango, quantity: 2 }).unwrap();
//!
//! // Same product merges into one line, subtotal recomputed
//! assert_eq!(state.cart.line_count(), 1);
//! assert_eq!(state.cart_total().cents(), 3 * 2590);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod kit;
pub mod money;
pub mod reservation;
pub mod schedule;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use schedule::{ClockTime, PickupWindow, TimeSlot};
pub use store::{Action, AppState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// User id that unlocks the admin panel.
///
/// The simulated login always returns this user, so every signed-in
/// session can reach the admin view.
pub const ADMIN_USER_ID: &str = "1";

/// Maximum number of distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 50;

/// Maximum quantity of a single cart line.
///
/// Selectors step one unit at a time up to 10, but repeated adds merge into
/// the same line, so the cap sits well above a single selection.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Maximum party size accepted by the reservation form.
pub const MAX_RESERVATION_GUESTS: u32 = 20;
