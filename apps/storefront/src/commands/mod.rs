//! # Commands Module
//!
//! Every operation the storefront screens can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── Store info and configuration
//! ├── catalog.rs      ◄─── Product listing and lookup
//! ├── cart.rs         ◄─── Cart manipulation, kit builder
//! ├── session.rs      ◄─── Sign in / sign out
//! ├── checkout.rs     ◄─── Pickup slot, payment, confirmation
//! ├── reservation.rs  ◄─── Table reservations
//! └── admin.rs        ◄─── Dashboard, order and reservation management
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  screen ──► command(state, args) ──► Action ──► StoreState::dispatch    │
//! │                   │                                   │                 │
//! │                   │                                   ▼                 │
//! │                   └──────────── Result<T, ApiError> ◄─┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_cart(store: &StoreState) -> CartResponse
//!
//! // Needs the session and configuration
//! fn begin_checkout(store: &StoreState, config: &ConfigState, ...)
//!
//! // Needs a service as well
//! async fn pay(store: &StoreState, gateway: &dyn PaymentGateway, ...)
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod reservation;
pub mod session;
