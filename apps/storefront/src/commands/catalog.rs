//! # Catalog Commands
//!
//! Product listings for the menu pages. The catalog is fixed at build time,
//! so none of these need session state.

use tracing::debug;

use delicia_core::{catalog, Category, Product};

use crate::error::ApiError;

/// Lists products, optionally narrowed to one category.
///
/// Sold-out products are included so the menu can show them greyed out.
pub fn list_products(category: Option<Category>) -> Vec<Product> {
    debug!(?category, "list_products command");
    match category {
        Some(category) => catalog::by_category(category).into_iter().cloned().collect(),
        None => catalog::products().to_vec(),
    }
}

/// Gets a single product by id.
pub fn get_product(id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    Ok(catalog::get(id)?.clone())
}
