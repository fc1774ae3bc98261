//! # Services Module
//!
//! External collaborators the storefront talks to. Each one is a trait so
//! commands can be driven by the simulated implementations here or by a
//! real provider later.
//!
//! ```text
//! services/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── payment.rs      ◄─── PaymentGateway (PIX / card)
//! ├── identity.rs     ◄─── LoginProvider ("Continue with Google")
//! └── reservation.rs  ◄─── ReservationDesk
//! ```

pub mod identity;
pub mod payment;
pub mod reservation;

pub use identity::{LoginProvider, SimulatedGoogleLogin};
pub use payment::{PaymentGateway, PaymentReceipt, SimulatedPaymentGateway};
pub use reservation::{ReservationDesk, SimulatedReservationDesk};
