//! # Catalog
//!
//! The fixed product list sold by the store.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────────────────┐
//! │ Category     │ Unit         │ Products                                 │
//! ├──────────────┼──────────────┼──────────────────────────────────────────┤
//! │ Chicken      │ each         │ com recheio, sem recheio                 │
//! │ Barbecue     │ kilogram     │ maminha, fraldinha, costelas, picanha... │
//! │ Side         │ each         │ maionese, refrigerantes                  │
//! │ Dessert      │ each         │ bolo, torta, pudim, brigadeiro           │
//! └──────────────┴──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The list is built once and shared for the process lifetime. Lookups hand
//! out references; callers clone a `Product` when it goes into a cart.

use std::sync::OnceLock;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product, ProductKind, StockLevel, Unit};

const CHICKEN_IMAGE: &str =
    "https://images.unsplash.com/photo-1598103442097-8b74394b95c6?w=300&h=200&fit=crop";
const BARBECUE_IMAGE: &str =
    "https://images.unsplash.com/photo-1544025162-d76694265947?w=300&h=200&fit=crop";
const SAUCE_IMAGE: &str =
    "https://images.unsplash.com/photo-1553909489-cd47e0ef937f?w=300&h=200&fit=crop";
const DRINK_IMAGE: &str =
    "https://images.unsplash.com/photo-1581636625402-29b2a704ef13?w=300&h=200&fit=crop";

static CATALOG: OnceLock<Vec<Product>> = OnceLock::new();

// =============================================================================
// Catalog Data
// =============================================================================

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: Category,
    kind: ProductKind,
    unit: Unit,
    serves: Option<u32>,
    stock: StockLevel,
    image: &'static str,
}

const ENTRIES: &[Entry] = &[
    // Chicken
    Entry {
        id: "frango-com-recheio",
        name: "Frango Assado com Recheio",
        description: "Frango assado temperado com recheio especial da casa",
        cents: 2590,
        category: Category::Chicken,
        kind: ProductKind::StuffedChicken,
        unit: Unit::Each,
        serves: Some(4),
        stock: StockLevel::Available,
        image: CHICKEN_IMAGE,
    },
    Entry {
        id: "frango-sem-recheio",
        name: "Frango Assado sem Recheio",
        description: "Frango assado temperado no ponto, sem recheio",
        cents: 2290,
        category: Category::Chicken,
        kind: ProductKind::PlainChicken,
        unit: Unit::Each,
        serves: Some(4),
        stock: StockLevel::Available,
        image: CHICKEN_IMAGE,
    },
    // Barbecue
    Entry {
        id: "maminha",
        name: "Maminha",
        description: "Corte macio e suculento, ideal para churrasco",
        cents: 4590,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::Available,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "fraldinha",
        name: "Fraldinha",
        description: "Corte tradicional brasileiro, muito saboroso",
        cents: 4290,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::RunningLow,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "costela-gado",
        name: "Costela de Gado",
        description: "Costela bovina suculenta e bem temperada",
        cents: 3890,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::Available,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "costela-suina",
        name: "Costela Suína",
        description: "Costela de porco no ponto ideal",
        cents: 3590,
        category: Category::Barbecue,
        kind: ProductKind::PorkCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::Available,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "picanha",
        name: "Picanha",
        description: "O corte nobre brasileiro, suculento e saboroso",
        cents: 6590,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::Available,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "alcatra",
        name: "Alcatra",
        description: "Corte magro e saboroso, perfeito para churrasco",
        cents: 4890,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::Available,
        image: BARBECUE_IMAGE,
    },
    Entry {
        id: "file-duplo",
        name: "Filé Duplo",
        description: "Corte premium, extremamente macio",
        cents: 7890,
        category: Category::Barbecue,
        kind: ProductKind::BeefCut,
        unit: Unit::Kilogram,
        serves: None,
        stock: StockLevel::SoldOut,
        image: BARBECUE_IMAGE,
    },
    // Sides
    Entry {
        id: "maionese",
        name: "Maionese da Casa",
        description: "Maionese especial temperada",
        cents: 450,
        category: Category::Side,
        kind: ProductKind::Sauce,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: SAUCE_IMAGE,
    },
    Entry {
        id: "coca-cola",
        name: "Coca-Cola 350ml",
        description: "Refrigerante gelado",
        cents: 400,
        category: Category::Side,
        kind: ProductKind::SoftDrink,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: DRINK_IMAGE,
    },
    Entry {
        id: "guarana",
        name: "Guaraná 350ml",
        description: "Refrigerante gelado",
        cents: 400,
        category: Category::Side,
        kind: ProductKind::SoftDrink,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: DRINK_IMAGE,
    },
    Entry {
        id: "coca-cola-2l",
        name: "Coca-Cola 2L",
        description: "Refrigerante familia",
        cents: 850,
        category: Category::Side,
        kind: ProductKind::SoftDrink,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::RunningLow,
        image: DRINK_IMAGE,
    },
    // Desserts
    Entry {
        id: "bolo-chocolate",
        name: "Bolo de Chocolate",
        description: "Bolo fofinho de chocolate com cobertura cremosa.",
        cents: 3500,
        category: Category::Dessert,
        kind: ProductKind::Cake,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=300&h=200&fit=crop",
    },
    Entry {
        id: "torta-limao",
        name: "Torta de Limão",
        description: "Torta de limão com merengue suíço maçaricado.",
        cents: 4500,
        category: Category::Dessert,
        kind: ProductKind::Pie,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::RunningLow,
        image: "https://images.unsplash.com/photo-1543588925-56044a1779e3?w=300&h=200&fit=crop",
    },
    Entry {
        id: "pudim-leite",
        name: "Pudim de Leite",
        description: "Pudim de leite condensado cremoso e sem furinhos.",
        cents: 2500,
        category: Category::Dessert,
        kind: ProductKind::Sweet,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: "https://images.unsplash.com/photo-1627703901686-b41386420054?w=300&h=200&fit=crop",
    },
    Entry {
        id: "brigadeiro",
        name: "Brigadeiro Gourmet",
        description: "Brigadeiro feito com chocolate belga.",
        cents: 400,
        category: Category::Dessert,
        kind: ProductKind::Sweet,
        unit: Unit::Each,
        serves: None,
        stock: StockLevel::Available,
        image: "https://images.unsplash.com/photo-1593489895432-3b3329046a48?w=300&h=200&fit=crop",
    },
];

impl Entry {
    fn to_product(&self) -> Product {
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Money::from_cents(self.cents),
            category: self.category,
            kind: Some(self.kind),
            unit: self.unit,
            serves: self.serves,
            available: self.stock != StockLevel::SoldOut,
            stock: self.stock,
            image_url: Some(self.image.to_string()),
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Every product, in menu order.
pub fn products() -> &'static [Product] {
    CATALOG.get_or_init(|| ENTRIES.iter().map(Entry::to_product).collect())
}

/// Products listed under `category`, in menu order.
pub fn by_category(category: Category) -> Vec<&'static Product> {
    products()
        .iter()
        .filter(|p| p.category == category)
        .collect()
}

/// Products under `category` that can currently be ordered.
pub fn orderable_in(category: Category) -> Vec<&'static Product> {
    by_category(category)
        .into_iter()
        .filter(|p| p.is_orderable())
        .collect()
}

/// Looks up a product by id.
pub fn find(id: &str) -> Option<&'static Product> {
    products().iter().find(|p| p.id == id)
}

/// Looks up a product by id, failing with `ProductNotFound`.
pub fn get(id: &str) -> CoreResult<&'static Product> {
    find(id).ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
}

/// Looks up a product that must be in `category` and orderable.
///
/// Used by the kit builder, where each step only accepts its own section.
pub fn get_orderable_in(id: &str, category: Category) -> CoreResult<&'static Product> {
    let product = get(id)?;

    if product.category != category {
        return Err(CoreError::WrongCategory {
            product_id: id.to_string(),
            expected: category.to_string(),
        });
    }

    if !product.is_orderable() {
        return Err(CoreError::ProductUnavailable(id.to_string()));
    }

    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================
