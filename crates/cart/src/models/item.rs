//! Cart line item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use go_market_core::ProductId;

/// One distinct product line in the cart.
///
/// Serializes to the snapshot record format: `id`, `title`, `image_url`,
/// `price` (JSON number) and `quantity` (integer). `quantity` is at least 1
/// for as long as the line exists; a line reaching zero is removed from the
/// collection, never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque product identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Reference to the product's display asset.
    pub image_url: String,
    /// Unit price, currency-agnostic.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Number of units in the cart.
    pub quantity: u32,
}

/// Input for adding a product to the cart: a line without a quantity.
///
/// Quantity is always initialized by the store, never supplied by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    /// Opaque product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Reference to the product's display asset.
    pub image_url: String,
    /// Unit price, currency-agnostic.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl NewCartItem {
    /// Convert into a stored line with an initial quantity of 1.
    #[must_use]
    pub fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}
