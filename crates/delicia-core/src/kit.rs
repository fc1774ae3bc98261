//! # Barbecue Kit Builder
//!
//! Guides the customer through a three-step kit and then drops every
//! selection into the cart in one go.
//!
//! ```text
//!   ┌──────────┐     ┌────────────┐     ┌──────────┐
//!   │ Chicken  │ ──► │ Barbecue   │ ──► │  Sides   │ ──► add to cart
//!   │ pick one │     │ (optional) │     │(optional)│
//!   └──────────┘     └────────────┘     └──────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Category, Product};

/// Most whole chickens a single kit can hold.
pub const MAX_KIT_CHICKENS: i64 = 5;

/// Most units of any one cut or side in a kit.
pub const MAX_KIT_QUANTITY: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum KitStep {
    #[default]
    Chicken,
    Barbecue,
    Sides,
}

impl KitStep {
    /// Following step; the last step stays put.
    pub fn next(self) -> Self {
        match self {
            KitStep::Chicken => KitStep::Barbecue,
            KitStep::Barbecue | KitStep::Sides => KitStep::Sides,
        }
    }

    /// Previous step, or `None` from the first step (leaves the builder).
    pub fn prev(self) -> Option<Self> {
        match self {
            KitStep::Chicken => None,
            KitStep::Barbecue => Some(KitStep::Chicken),
            KitStep::Sides => Some(KitStep::Barbecue),
        }
    }

    pub fn category(self) -> Category {
        match self {
            KitStep::Chicken => Category::Chicken,
            KitStep::Barbecue => Category::Barbecue,
            KitStep::Sides => Category::Side,
        }
    }
}

/// A product and how many of it the kit holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KitSelection {
    pub product: Product,
    pub quantity: i64,
}

impl KitSelection {
    pub fn subtotal(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KitBuilder {
    pub step: KitStep,
    pub chicken: Option<KitSelection>,
    pub barbecue: Vec<KitSelection>,
    pub sides: Vec<KitSelection>,
}

impl KitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    /// Moves back a step. Returns `false` when already on the first step.
    pub fn prev(&mut self) -> bool {
        match self.step.prev() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Picks the kit's chicken, replacing any earlier pick.
    pub fn choose_chicken(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        check_product(product, Category::Chicken)?;
        check_quantity(quantity, 1, MAX_KIT_CHICKENS)?;

        self.chicken = Some(KitSelection {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Sets the quantity of a barbecue cut. Zero drops it from the kit.
    pub fn set_barbecue(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        check_product(product, Category::Barbecue)?;
        upsert(&mut self.barbecue, product, quantity)
    }

    /// Sets the quantity of a side. Zero drops it from the kit.
    pub fn set_side(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        check_product(product, Category::Side)?;
        upsert(&mut self.sides, product, quantity)
    }

    /// Every selection: chicken first, then cuts, then sides, each in the
    /// order they were picked.
    pub fn selections(&self) -> Vec<&KitSelection> {
        self.chicken
            .iter()
            .chain(self.barbecue.iter())
            .chain(self.sides.iter())
            .collect()
    }

    pub fn total(&self) -> Money {
        self.selections().into_iter().map(KitSelection::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chicken.is_none() && self.barbecue.is_empty() && self.sides.is_empty()
    }

    /// Rebuilds the kit from the catalog by product id.
    ///
    /// Product data carried by the kit itself (price, stock) is discarded
    /// and every kit limit is checked again, so a kit received from a
    /// client can be trusted only after this.
    pub fn resolved(&self) -> CoreResult<KitBuilder> {
        let mut kit = KitBuilder {
            step: self.step,
            ..KitBuilder::default()
        };

        if let Some(chicken) = &self.chicken {
            let product = catalog::get_orderable_in(&chicken.product.id, Category::Chicken)?;
            kit.choose_chicken(product, chicken.quantity)?;
        }
        for cut in &self.barbecue {
            let product = catalog::get_orderable_in(&cut.product.id, Category::Barbecue)?;
            kit.set_barbecue(product, cut.quantity)?;
        }
        for side in &self.sides {
            let product = catalog::get_orderable_in(&side.product.id, Category::Side)?;
            kit.set_side(product, side.quantity)?;
        }

        Ok(kit)
    }
}

fn check_product(product: &Product, expected: Category) -> CoreResult<()> {
    if product.category != expected {
        return Err(CoreError::WrongCategory {
            product_id: product.id.clone(),
            expected: expected.to_string(),
        });
    }
    if !product.is_orderable() {
        return Err(CoreError::ProductUnavailable(product.id.clone()));
    }
    Ok(())
}

fn check_quantity(quantity: i64, min: i64, max: i64) -> CoreResult<()> {
    if quantity < min || quantity > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min,
            max,
        }
        .into());
    }
    Ok(())
}

fn upsert(selections: &mut Vec<KitSelection>, product: &Product, quantity: i64) -> CoreResult<()> {
    check_quantity(quantity, 0, MAX_KIT_QUANTITY)?;

    let existing = selections.iter().position(|s| s.product.id == product.id);
    match (existing, quantity) {
        (Some(index), 0) => {
            selections.remove(index);
        }
        (Some(index), qty) => selections[index].quantity = qty,
        (None, 0) => {}
        (None, qty) => selections.push(KitSelection {
            product: product.clone(),
            quantity: qty,
        }),
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
