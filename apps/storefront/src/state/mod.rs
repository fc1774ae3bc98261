//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Commands declare exactly what they need: cart commands take only the
//! `StoreState`, the front page takes only the `ConfigState`, checkout
//! takes both plus a payment gateway.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │   StoreState             │      │   ConfigState            │        │
//! │  │                          │      │                          │        │
//! │  │  Arc<Mutex<AppState>>    │      │  store_name              │        │
//! │  │  payment_in_flight flag  │      │  pickup window           │        │
//! │  │                          │      │  simulated delays        │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: Arc<Mutex<T>>, cloned into the open-status refresher    │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::{ConfigError, ConfigResult, ConfigState, MockConfig, SimulationConfig};
pub use store::{spawn_open_status_refresh, PaymentGuard, StoreState};
