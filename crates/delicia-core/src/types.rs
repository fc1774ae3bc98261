//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │  Reservation    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (slug)      │   │  id (PD123456)  │   │  id (RES-12345) │       │
//! │  │  price (Money)  │   │  items, total   │   │  date, time     │       │
//! │  │  category       │   │  pickup_time    │   │  guests, kind   │       │
//! │  │  stock          │   │  status         │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderStatus   │   │ PaymentMethod   │   │ReservationStatus│       │
//! │  │  Pending        │   │  Pix            │   │  Pending        │       │
//! │  │  Paid           │   │  Card           │   │  Confirmed      │       │
//! │  │  Preparing      │   └─────────────────┘   │  Cancelled      │       │
//! │  │  Ready          │                         └─────────────────┘       │
//! │  │  Completed      │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders and reservations snapshot everything they need (product, price,
//! customer contact) so later catalog or session changes never alter them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::CartItem;
use crate::money::Money;
use crate::schedule::ClockTime;
use crate::ADMIN_USER_ID;

// =============================================================================
// Product
// =============================================================================

/// Catalog section a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Roast chicken, sold whole.
    Chicken,
    /// Barbecue cuts, sold by the kilogram.
    Barbecue,
    /// Sauces and soft drinks offered alongside the mains.
    Side,
    /// Cakes, pies and sweets.
    Dessert,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 4] = [
        Category::Chicken,
        Category::Barbecue,
        Category::Side,
        Category::Dessert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chicken => "chicken",
            Category::Barbecue => "barbecue",
            Category::Side => "side",
            Category::Dessert => "dessert",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chicken" | "frango" => Ok(Category::Chicken),
            "barbecue" | "bbq" | "churrasco" => Ok(Category::Barbecue),
            "side" | "sides" | "adicional" => Ok(Category::Side),
            "dessert" | "desserts" | "bolo-doce" => Ok(Category::Dessert),
            other => Err(format!(
                "Unknown category: '{}'. Valid options: chicken, barbecue, side, dessert",
                other
            )),
        }
    }
}

/// Finer product classification inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    StuffedChicken,
    PlainChicken,
    BeefCut,
    PorkCut,
    Sauce,
    SoftDrink,
    Cake,
    Pie,
    Sweet,
}

/// How a product is measured when ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Each,
    Portion,
    Kilogram,
}

/// Stock indicator shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Available,
    RunningLow,
    SoldOut,
}

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stable slug identifier (e.g. `picanha`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown on the product card.
    pub description: String,

    /// Unit price.
    pub price: Money,

    pub category: Category,

    pub kind: Option<ProductKind>,

    pub unit: Unit,

    /// How many people a unit serves, when meaningful.
    pub serves: Option<u32>,

    /// Whether the product is switched on for ordering.
    pub available: bool,

    pub stock: StockLevel,

    pub image_url: Option<String>,
}

impl Product {
    /// True when the product can be put in a cart.
    pub fn is_orderable(&self) -> bool {
        self.available && self.stock != StockLevel::SoldOut
    }
}

// =============================================================================
// User
// =============================================================================

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// True for the account that may open the admin panel.
    pub fn is_admin(&self) -> bool {
        self.id == ADMIN_USER_ID
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Instant bank transfer via PIX QR code / copy-and-paste payload.
    Pix,
    /// Credit or debit card.
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Pix => write!(f, "pix"),
            PaymentMethod::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "card" | "credit" | "debit" => Ok(PaymentMethod::Card),
            other => Err(format!(
                "Unknown payment method: '{}'. Valid options: pix, card",
                other
            )),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a pickup order.
///
/// ```text
/// Pending ──► Paid ──► Preparing ──► Ready ──► Completed
/// ```
/// Transitions only ever move right; skipping ahead is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    /// Position in the lifecycle.
    pub const fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::Completed => 4,
        }
    }

    /// True when `next` lies strictly later in the lifecycle.
    pub const fn can_advance_to(&self, next: OrderStatus) -> bool {
        next.rank() > self.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown order status: '{}'", s))
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed pickup order.
///
/// Lines are frozen copies of the cart at payment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Business id, `PD` followed by six digits.
    pub id: String,

    pub items: Vec<CartItem>,

    /// Sum of line subtotals at payment time.
    pub total: Money,

    #[ts(as = "String")]
    pub pickup_time: ClockTime,

    pub status: OrderStatus,

    pub payment_method: PaymentMethod,

    /// Payload the counter scans at pickup (rendered as a QR code).
    pub pickup_code: String,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Reservation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown reservation status: '{}'", s))
    }
}

/// Type of gathering a table is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReservationKind {
    Corporate,
    Family,
}

impl Default for ReservationKind {
    fn default() -> Self {
        ReservationKind::Family
    }
}

/// A café table reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reservation {
    /// Business id, `RES-` followed by six digits.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub time: ClockTime,
    pub guests: u32,
    pub kind: ReservationKind,
    pub status: ReservationStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
