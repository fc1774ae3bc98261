//! # Cart Commands
//!
//! Commands for cart manipulation and the barbecue kit builder.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│Confirmed │       │
//! │  │  Cart    │     │          │     │ (pickup, │     │  Order   │       │
//! │  └──────────┘     └──────────┘     │ payment) │     └──────────┘       │
//! │       ▲                │           └──────────┘           │             │
//! │       │           add_to_cart                        finish_checkout    │
//! │       │           add_kit_to_cart                   (checkout.rs)      │
//! │       │           update_cart_item                        │             │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       └── clear_cart ◄─┘ ◄────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use delicia_core::kit::KitBuilder;
use delicia_core::{catalog, Action, Cart, CartItem, CartTotals};

use crate::error::ApiError;
use crate::state::StoreState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and totals
pub fn get_cart(store: &StoreState) -> CartResponse {
    debug!("get_cart command");
    store.with_state(|s| CartResponse::from(&s.cart))
}

/// Adds a product to the cart.
///
/// ## Arguments
/// * `product_id` - Catalog id (e.g. `picanha`)
/// * `quantity` - Units to add (default: 1)
///
/// ## Behavior
/// - Product already in cart: quantity is increased
/// - Otherwise a new line is added
pub fn add_to_cart(
    store: &StoreState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity, "add_to_cart command");

    let product = catalog::get(product_id)?.clone();
    store.dispatch(Action::AddToCart { product, quantity })?;

    Ok(get_cart(store))
}

/// Sets the quantity of a cart line. Zero or less removes it.
pub fn update_cart_item(
    store: &StoreState,
    item_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, quantity, "update_cart_item command");

    store.dispatch(Action::UpdateCartItem {
        item_id: item_id.to_string(),
        quantity,
    })?;

    Ok(get_cart(store))
}

/// Removes a line from the cart.
pub fn remove_from_cart(store: &StoreState, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");

    store.dispatch(Action::RemoveFromCart {
        item_id: item_id.to_string(),
    })?;

    Ok(get_cart(store))
}

/// Empties the cart and forgets the chosen pickup time.
pub fn clear_cart(store: &StoreState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    store.dispatch(Action::ClearCart)?;
    Ok(get_cart(store))
}

/// Drops every kit selection into the cart at once.
///
/// Products are looked up again by id, so prices always come from the
/// catalog. Either every selection lands in the cart or none does.
pub fn add_kit_to_cart(store: &StoreState, kit: &KitBuilder) -> Result<CartResponse, ApiError> {
    debug!(selections = kit.selections().len(), "add_kit_to_cart command");

    let kit = kit.resolved()?;
    if kit.is_empty() {
        return Err(ApiError::cart("Kit has no selections"));
    }

    let actions = kit
        .selections()
        .into_iter()
        .map(|s| Action::AddToCart {
            product: s.product.clone(),
            quantity: s.quantity,
        })
        .collect();
    store.dispatch_all(actions)?;

    info!(total = kit.total().cents(), "Kit added to cart");
    Ok(get_cart(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_merges_lines() {
        let store = StoreState::default();

        add_to_cart(&store, "picanha", None).unwrap();
        let cart = add_to_cart(&store, "picanha", Some(2)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.items[0].subtotal.cents(), 3 * 6590);
        assert_eq!(cart.totals.total.cents(), 3 * 6590);
    }

    #[test]
    fn test_add_unknown_or_sold_out() {
        let store = StoreState::default();

        let err = add_to_cart(&store, "picanha-xl", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&store, "file-duplo", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        assert!(get_cart(&store).items.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let store = StoreState::default();
        let cart = add_to_cart(&store, "maminha", Some(2)).unwrap();
        let line = cart.items[0].id.clone();

        let cart = update_cart_item(&store, &line, 5).unwrap();
        assert_eq!(cart.totals.item_count, 5);

        let cart = update_cart_item(&store, &line, 0).unwrap();
        assert!(cart.items.is_empty());

        let err = remove_from_cart(&store, &line).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_clear_cart() {
        let store = StoreState::default();
        add_to_cart(&store, "brigadeiro", Some(10)).unwrap();
        assert!(clear_cart(&store).unwrap().items.is_empty());
    }

    #[test]
    fn test_add_kit() {
        let store = StoreState::default();
        let mut kit = KitBuilder::new();
        kit.choose_chicken(catalog::get("frango-com-recheio").unwrap(), 1)
            .unwrap();
        kit.set_side(catalog::get("guarana").unwrap(), 2).unwrap();

        let cart = add_kit_to_cart(&store, &kit).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.totals.total, kit.total());
    }

    #[test]
    fn test_kit_prices_come_from_catalog() {
        let store = StoreState::default();
        let mut kit = KitBuilder::new();
        kit.choose_chicken(catalog::get("frango-com-recheio").unwrap(), 1)
            .unwrap();

        // a kit edited on the client side before it reaches the command
        let mut json = serde_json::to_value(&kit).unwrap();
        json["chicken"]["product"]["price"] = serde_json::json!(1);
        let tampered: KitBuilder = serde_json::from_value(json).unwrap();
        assert_eq!(tampered.total().cents(), 1);

        let cart = add_kit_to_cart(&store, &tampered).unwrap();
        assert_eq!(cart.totals.total.cents(), 2590);
        assert_eq!(cart.items[0].product.price.cents(), 2590);
    }

    #[test]
    fn test_kit_over_limit_rejected() {
        let store = StoreState::default();
        let mut kit = KitBuilder::new();
        kit.set_side(catalog::get("guarana").unwrap(), 1).unwrap();
        kit.sides[0].quantity = 60;

        let err = add_kit_to_cart(&store, &kit).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&store).items.is_empty());
    }

    #[test]
    fn test_add_empty_kit() {
        let store = StoreState::default();
        let err = add_kit_to_cart(&store, &KitBuilder::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_kit_is_all_or_nothing() {
        let store = StoreState::default();
        add_to_cart(&store, "guarana", Some(98)).unwrap();

        let mut kit = KitBuilder::new();
        kit.choose_chicken(catalog::get("frango-sem-recheio").unwrap(), 1)
            .unwrap();
        // 98 + 2 overflows the line maximum
        kit.set_side(catalog::get("guarana").unwrap(), 2).unwrap();

        assert!(add_kit_to_cart(&store, &kit).is_err());

        let cart = get_cart(&store);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 98);
    }
}
