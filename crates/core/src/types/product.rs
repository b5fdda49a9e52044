//! Catalog product records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as published in `data/products.json`.
///
/// Only `id`, `name` and `price` are required; every other field defaults
/// when absent so a sparse record still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Pre-discount price shown struck through.
    #[serde(default)]
    pub original_price: Option<Price>,
    /// Pack sizes on offer, e.g. `["500g", "1kg"]`.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Category tag (`flour`, `grain`, `seed`). Matched case-sensitively.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub millet_type: Option<String>,
    #[serde(default)]
    pub image: String,
    /// Health-benefit tags, in display order.
    #[serde(default)]
    pub health_benefits: Vec<String>,
    #[serde(default)]
    pub nutritional_info: BTreeMap<String, String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub shelf_life: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Amount saved against the original price, if discounted.
    #[must_use]
    pub fn savings(&self) -> Option<Price> {
        self.original_price
            .and_then(|original| self.price.discount_from(original))
    }
}

/// The `data/products.json` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsPayload {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_product_defaults() {
        let product: Product =
            serde_json::from_str(r#"{"id": "kodo-millet", "name": "Kodo", "price": 115}"#)
                .unwrap();

        assert_eq!(product.id, "kodo-millet");
        assert!(product.in_stock);
        assert!(product.health_benefits.is_empty());
        assert_eq!(product.savings(), None);
    }

    #[test]
    fn test_product_savings() {
        let product: Product = serde_json::from_str(
            r#"{"id": "ragi-flour", "name": "Organic Ragi Flour", "price": 89, "originalPrice": 120}"#,
        )
        .unwrap();

        assert_eq!(product.savings(), Some(Price::from_whole(31)));
    }

    #[test]
    fn test_payload_without_array_is_empty() {
        let payload: ProductsPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.products.is_empty());
    }
}
