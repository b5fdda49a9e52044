//! Cart line items.
//!
//! A line item snapshots the product's name, price and image at the moment it
//! is added. Later catalog changes never alter lines already in a cart.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// Identity of a cart line: product plus optional size variant.
///
/// A `None` size is a distinct key from any named size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a ProductId,
    pub size: Option<&'a str>,
}

impl<'a> LineKey<'a> {
    #[must_use]
    pub const fn new(product_id: &'a ProductId, size: Option<&'a str>) -> Self {
        Self { product_id, size }
    }
}

/// One entry in the cart.
///
/// Serialized with the field names used by the persisted cart slot
/// (`id`, `name`, `price`, `image`, `size`, `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at the time the line was created.
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub size: Option<String>,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLineItem {
    /// Snapshot a product into a new line.
    #[must_use]
    pub fn snapshot(product: &Product, size: Option<&str>, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size: size.map(str::to_string),
            quantity,
        }
    }

    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey::new(&self.product_id, self.size.as_deref())
    }

    /// Whether this line is identified by `key`.
    #[must_use]
    pub fn matches(&self, key: &LineKey<'_>) -> bool {
        self.key() == *key
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Derived cart totals. Never stored; recomputed from the lines on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub item_count: u64,
    /// Sum of unit price times quantity across all lines.
    pub total_price: Price,
}

impl CartTotals {
    /// Compute totals over a set of lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a CartLineItem>) -> Self {
        lines
            .into_iter()
            .fold(Self::default(), |totals, line| Self {
                item_count: totals.item_count + u64::from(line.quantity),
                total_price: totals.total_price + line.line_total(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(id),
            name: id.to_string(),
            price: Price::from_whole(price),
            image: String::new(),
            size: None,
            quantity,
        }
    }

    #[test]
    fn test_totals() {
        let lines = [line("ragi-flour", 89, 2), line("jowar-flour", 95, 1)];
        let totals = CartTotals::from_lines(&lines);

        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_price, Price::from_whole(273));
    }

    #[test]
    fn test_none_size_is_distinct_key() {
        let mut sized = line("ragi-flour", 89, 1);
        sized.size = Some("500g".to_string());
        let unsized_line = line("ragi-flour", 89, 1);

        assert!(!sized.matches(&unsized_line.key()));
        assert!(sized.matches(&LineKey::new(&ProductId::new("ragi-flour"), Some("500g"))));
    }

    #[test]
    fn test_persisted_field_names() {
        let json = serde_json::to_value(line("ragi-flour", 89, 2)).unwrap();
        assert_eq!(json["id"], "ragi-flour");
        assert_eq!(json["quantity"], 2);
        assert!(json["size"].is_null());
    }
}
