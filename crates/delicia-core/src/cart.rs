//! # Cart
//!
//! The customer's shopping cart.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add(product, qty)                                                     │
//! │    ├── product already in cart? ──► quantity += qty, subtotal recomputed│
//! │    └── otherwise ─────────────────► push new line "{product}-{seq}"    │
//! │                                                                         │
//! │  set_quantity(line, qty)                                               │
//! │    ├── qty <= 0 ──────────────────► line removed                       │
//! │    └── otherwise ─────────────────► quantity = qty, subtotal recomputed │
//! │                                                                         │
//! │  remove(line) / clear()                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has `quantity >= 1`
//! - `subtotal == product.price × quantity` for every line, always
//!
//! All operations are all-or-nothing: an `Err` leaves the cart as it was.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// One line of the cart.
///
/// The product is a snapshot taken when the line was created; later
/// catalog changes do not touch lines already in a cart or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Line id, `{product_id}-{sequence}`.
    pub id: String,
    pub product: Product,
    pub quantity: i64,
    /// Always `product.price × quantity`.
    pub subtotal: Money,
}

impl CartItem {
    fn new(id: String, product: &Product, quantity: i64) -> Self {
        CartItem {
            id,
            product: product.clone(),
            quantity,
            subtotal: product.price.multiply_quantity(quantity),
        }
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.subtotal = self.product.price.multiply_quantity(quantity);
    }
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// Sequence for line ids. Never reset, so ids stay unique per cart.
    /// Serialized with the cart so a restored cart keeps counting.
    #[serde(default)]
    next_line: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// ## Errors
    /// - `Validation` when `quantity` is not in `1..=MAX_ITEM_QUANTITY`
    /// - `ProductUnavailable` when the product is switched off or sold out
    /// - `QuantityTooLarge` when the merged line would exceed the maximum
    /// - `CartTooLarge` when a new line would exceed `MAX_CART_ITEMS`
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<&CartItem> {
        validate_quantity(quantity)?;

        if !product.is_orderable() {
            return Err(CoreError::ProductUnavailable(product.id.clone()));
        }

        if let Some(index) = self.position_of_product(&product.id) {
            let merged = self.items[index].quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            self.items[index].set_quantity(merged);
            return Ok(&self.items[index]);
        }

        validate_cart_size(self.items.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.next_line += 1;
        let id = format!("{}-{}", product.id, self.next_line);
        self.items.push(CartItem::new(id, product, quantity));

        // just pushed
        Ok(&self.items[self.items.len() - 1])
    }

    /// Sets the quantity of a line. Zero or negative removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove(item_id).map(|_| ());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::CartItemNotFound(item_id.to_string()))?;
        line.set_quantity(quantity);
        Ok(())
    }

    /// Removes a line, returning it.
    pub fn remove(&mut self, item_id: &str) -> CoreResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::CartItemNotFound(item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.position_of_product(product_id).is_some()
    }

    /// The line holding `product_id`, if any.
    pub fn line_for_product(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn get(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    fn position_of_product(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }
}

/// Cart summary for badges and the cart preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
