//! # delicia-mock: Mock Data Generators
//!
//! Fabricates the order history, reservations and slot bookings the
//! storefront shows before any real activity happens.
//!
//! ## What Gets Generated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders(15, now)                                                        │
//! │  ├── id            PD + 6 digits                                       │
//! │  ├── items         1-4 random catalog products, 1-3 each (merged)      │
//! │  ├── pickup_time   a slot of the default window (08:00 … 09:50)        │
//! │  ├── status        completed (×2 weight), ready, preparing             │
//! │  └── created_at    within the last 30 days                             │
//! │                                                                         │
//! │  reservations(8, now)                                                   │
//! │  ├── id            RES- + 6 digits                                     │
//! │  ├── date / time   within the next 36 days, 09:00 … 18:00 on the hour  │
//! │  ├── guests        2-10                                                │
//! │  └── created_at    within the last 15 days                             │
//! │                                                                         │
//! │  slot_bookings(window)   0-4 pickups already booked per slot            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::Utc;
//! use delicia_mock::MockData;
//!
//! let mut mock = MockData::seeded(42);
//! let orders = mock.orders(15, Utc::now());
//! assert_eq!(orders.len(), 15);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use delicia_core::cart::Cart;
use delicia_core::catalog;
use delicia_core::schedule::{ClockTime, PickupWindow};
use delicia_core::{
    Order, OrderStatus, PaymentMethod, Product, Reservation, ReservationKind, ReservationStatus,
};

// =============================================================================
// Name Pools
// =============================================================================

const FIRST_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Bruno", "Camila", "Carlos", "Daniela", "Eduardo", "Fernanda", "Gabriel",
    "Helena", "Igor", "Juliana", "Lucas", "Mariana", "Mateus", "Patrícia", "Rafael", "Sofia",
    "Thiago", "Vitória",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Costa", "Ferreira", "Gomes", "Lima", "Martins", "Oliveira",
    "Pereira", "Ribeiro", "Rodrigues", "Santos", "Silva", "Souza",
];

const EMAIL_DOMAINS: &[&str] = &["email.com", "gmail.com", "hotmail.com", "empresa.com.br"];

/// Area codes used for fabricated phone numbers.
const AREA_CODES: &[u8] = &[11, 19, 21, 31, 41, 51, 61, 71, 81];

/// Weighted status pool: completed shows up twice as often.
const ORDER_STATUSES: &[OrderStatus] = &[
    OrderStatus::Completed,
    OrderStatus::Completed,
    OrderStatus::Ready,
    OrderStatus::Preparing,
];

const ORDER_HISTORY_DAYS: i64 = 30;
const RESERVATION_HISTORY_DAYS: i64 = 15;
const RESERVATION_HORIZON_DAYS: i64 = 36;

// =============================================================================
// Generator
// =============================================================================

/// A fabricated customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Seedable source of mock storefront data.
pub struct MockData {
    rng: StdRng,
}

impl MockData {
    /// Deterministic generator: the same seed yields the same data.
    pub fn seeded(seed: u64) -> Self {
        MockData {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        MockData {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, random otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fabricates `count` past orders relative to `now`.
    pub fn orders(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Order> {
        let orderable: Vec<&Product> = catalog::products()
            .iter()
            .filter(|p| p.is_orderable())
            .collect();
        let pickup_times = PickupWindow::default().slot_times();

        let orders: Vec<Order> = (0..count)
            .map(|_| self.order(&orderable, &pickup_times, now))
            .collect();

        debug!(count = orders.len(), "Generated mock orders");
        orders
    }

    fn order(&mut self, orderable: &[&Product], pickup_times: &[ClockTime], now: DateTime<Utc>) -> Order {
        let mut cart = Cart::new();
        let lines = self.rng.gen_range(1..=4);
        for _ in 0..lines {
            let Some(product) = orderable.choose(&mut self.rng) else {
                break;
            };
            let quantity = self.rng.gen_range(1..=3);
            // repeat picks merge into one line; quantities stay far below the cap
            if let Err(e) = cart.add(product, quantity) {
                debug!(product = %product.id, error = %e, "Skipped mock line");
            }
        }

        let id = format!("PD{}", self.digits(6));
        let customer = self.customer();
        let pickup_time = pickup_times
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ClockTime::MIDNIGHT);

        Order {
            pickup_code: id.clone(),
            id,
            total: cart.total(),
            items: cart.items,
            pickup_time,
            status: *ORDER_STATUSES
                .choose(&mut self.rng)
                .unwrap_or(&OrderStatus::Completed),
            payment_method: if self.rng.gen_bool(0.5) {
                PaymentMethod::Pix
            } else {
                PaymentMethod::Card
            },
            customer_name: customer.name,
            customer_email: customer.email,
            customer_phone: customer.phone,
            created_at: self.recent(now, ORDER_HISTORY_DAYS),
        }
    }

    // =========================================================================
    // Reservations
    // =========================================================================

    /// Fabricates `count` reservations made in the last few days for dates
    /// in the coming weeks.
    pub fn reservations(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Reservation> {
        let reservations: Vec<Reservation> = (0..count).map(|_| self.reservation(now)).collect();
        debug!(count = reservations.len(), "Generated mock reservations");
        reservations
    }

    fn reservation(&mut self, now: DateTime<Utc>) -> Reservation {
        let customer = self.customer();
        let date = now.date_naive() + Duration::days(self.rng.gen_range(1..=RESERVATION_HORIZON_DAYS));
        let hour: u8 = self.rng.gen_range(9..=18);

        Reservation {
            id: format!("RES-{}", self.digits(6)),
            name: customer.name,
            phone: customer.phone,
            email: customer.email,
            date,
            time: ClockTime::new(hour, 0).unwrap_or(ClockTime::MIDNIGHT),
            guests: self.rng.gen_range(2..=10),
            kind: if self.rng.gen_bool(0.5) {
                ReservationKind::Family
            } else {
                ReservationKind::Corporate
            },
            status: *ReservationStatus::ALL
                .choose(&mut self.rng)
                .unwrap_or(&ReservationStatus::Pending),
            created_at: self.recent(now, RESERVATION_HISTORY_DAYS),
        }
    }

    // =========================================================================
    // Slots
    // =========================================================================

    /// Simulated bookings for every slot of `window`: 0-4 each, never above
    /// the slot capacity.
    pub fn slot_bookings(&mut self, window: &PickupWindow) -> BTreeMap<ClockTime, u32> {
        window
            .slot_times()
            .into_iter()
            .map(|time| {
                let booked = self.rng.gen_range(0..=4u32).min(window.slot_capacity);
                (time, booked)
            })
            .collect()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// A fabricated customer with matching email.
    pub fn customer(&mut self) -> MockCustomer {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Ana");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Silva");
        let domain = EMAIL_DOMAINS.choose(&mut self.rng).copied().unwrap_or("email.com");
        let area = AREA_CODES.choose(&mut self.rng).copied().unwrap_or(11);

        MockCustomer {
            name: format!("{} {}", first, last),
            email: format!("{}.{}@{}", ascii_lower(first), ascii_lower(last), domain),
            phone: format!(
                "({}) 9{:04}-{:04}",
                area,
                self.rng.gen_range(0..10_000),
                self.rng.gen_range(0..10_000)
            ),
        }
    }

    /// `len` random decimal digits.
    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    /// A moment within the `days` days before `now`.
    fn recent(&mut self, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        let seconds = self.rng.gen_range(0..days * 24 * 60 * 60);
        now - Duration::seconds(seconds)
    }
}

/// Lowercases and strips the accents used in the name pools.
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' => 'a',
            'é' | 'ê' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
