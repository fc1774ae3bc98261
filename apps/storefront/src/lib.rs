//! # Storefront Library
//!
//! Application layer of the Delícia pickup storefront: session state,
//! configuration, simulated services and the commands the screens call.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & tracing)
//! ├── main.rs         ◄─── Command line front end
//! ├── state/
//! │   ├── store.rs    ◄─── StoreState: Arc<Mutex<AppState>>, open-status refresher
//! │   └── config.rs   ◄─── ConfigState: defaults → storefront.toml → DELICIA_*
//! ├── services/       ◄─── Payment, sign-in, reservation desk (simulated)
//! ├── commands/       ◄─── Catalog, cart, session, checkout, reservation, admin
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging      tracing-subscriber, RUST_LOG overrides      │
//! │  2. Load Configuration      ConfigState::load(--config)                 │
//! │  3. Seed Session            mock orders, reservations, slot bookings    │
//! │  4. Open Status             checked now, rechecked every 60s            │
//! │  5. Serve Commands          commands::* against StoreState              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod services;
pub mod state;

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use delicia_core::{AppState, ClockTime};
use delicia_mock::MockData;

use services::{SimulatedGoogleLogin, SimulatedPaymentGateway, SimulatedReservationDesk};
use state::{ConfigState, StoreState};

/// Everything a running storefront holds.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: ConfigState,
    pub store: StoreState,
    pub payments: SimulatedPaymentGateway,
    pub login: SimulatedGoogleLogin,
    pub desk: SimulatedReservationDesk,
    /// Pickups other customers already booked, per slot.
    pub bookings: BTreeMap<ClockTime, u32>,
}

impl Storefront {
    /// Builds a storefront seeded with mock history.
    ///
    /// `now` stamps the mock history; `local_now` decides whether the store
    /// starts open.
    pub fn new(config: ConfigState, now: DateTime<Utc>, local_now: NaiveDateTime) -> Self {
        let mut mock = MockData::new(config.mock.seed);

        let mut state = AppState::new(config.pickup.is_open_at(local_now));
        state.orders = mock.orders(config.mock.orders, now);
        state.orders.sort_by_key(|o| o.created_at);
        state.reservations = mock.reservations(config.mock.reservations, now);
        state.reservations.sort_by_key(|r| r.created_at);
        let bookings = mock.slot_bookings(&config.pickup);

        info!(
            orders = state.orders.len(),
            reservations = state.reservations.len(),
            open = state.is_open,
            seed = ?config.mock.seed,
            "Session seeded"
        );

        Storefront {
            payments: SimulatedPaymentGateway::new(
                config.payment_delay(),
                config.simulation.pix_payload.clone(),
            ),
            login: SimulatedGoogleLogin::new(config.login_delay()),
            desk: SimulatedReservationDesk::new(config.reservation_delay()),
            store: StoreState::new(state),
            bookings,
            config,
        }
    }

    /// Builds a storefront against the system clock.
    pub fn bootstrap(config: ConfigState) -> Self {
        Self::new(config, Utc::now(), Local::now().naive_local())
    }

    /// Starts the periodic open/closed recheck.
    pub fn spawn_open_status_refresh(&self) -> JoinHandle<()> {
        state::spawn_open_status_refresh(
            self.store.clone(),
            self.config.pickup.clone(),
            self.config.open_status_refresh(),
        )
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=delicia_core=trace` - Show trace for the core crate only
/// - Default: INFO, DEBUG for the storefront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,delicia_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
