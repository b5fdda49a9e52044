//! Shopping cart state.
//!
//! The cart is a list of line items keyed by (product id, size). It is read
//! from durable storage when opened and written back after every change.
//! Lines snapshot the product's name, price and image when first added.

pub mod storage;

use thiserror::Error;
use tracing::{info, warn};

use fiber_fit_core::{CartLineItem, CartTotals, LineKey, ProductId, RecipeId};

use crate::catalog::CatalogStore;
use crate::error::add_breadcrumb;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError, keys};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is not in the catalog. Nothing was changed.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The recipe is not in the catalog. Nothing was changed.
    #[error("Recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    /// A zero quantity was passed where a positive one is required.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// The requested quantity does not fit in a cart line.
    #[error("Quantity must be at most 4294967295")]
    QuantityTooLarge,

    /// The change was applied in memory but could not be persisted.
    #[error("Failed to save cart: {0}")]
    Storage(#[from] StorageError),
}

/// A short confirmation for the user after a successful change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CartNotice {
    pub message: String,
}

impl CartNotice {
    fn added(name: &str) -> Self {
        Self {
            message: format!("Added {name} to cart!"),
        }
    }
}

impl std::fmt::Display for CartNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The shopping cart, backed by a durable key-value store.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    lines: Vec<CartLineItem>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Open the cart persisted in `storage`.
    ///
    /// An absent, unreadable or malformed slot yields an empty cart.
    pub fn open(storage: S) -> Self {
        let lines = match storage.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(lines) => normalize(lines),
                Err(e) => {
                    warn!(error = %e, "Persisted cart is malformed, starting with an empty cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting with an empty cart");
                Vec::new()
            }
        };

        Self { storage, lines }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// The line for a (product, size) key, if present.
    #[must_use]
    pub fn line(&self, product_id: &str, size: Option<&str>) -> Option<&CartLineItem> {
        let product_id = ProductId::new(product_id);
        let key = LineKey::new(&product_id, size);
        self.lines.iter().find(|line| line.matches(&key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Item count and total price, computed from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_lines(&self.lines)
    }

    /// Add `quantity` units of a product in the given size.
    ///
    /// Increments an existing line with the same (product, size) key, or
    /// snapshots the product into a new line.
    ///
    /// # Errors
    ///
    /// - `CartError::InvalidQuantity` if `quantity` is zero
    /// - `CartError::ProductNotFound` if the product is not in `catalog`
    /// - `CartError::Storage` if the updated cart could not be saved
    pub fn add_to_cart(
        &mut self,
        catalog: &CatalogStore,
        product_id: &str,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<CartNotice, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let Some(product) = catalog.find_product(product_id) else {
            warn!(product_id, "Add to cart for unknown product");
            return Err(CartError::ProductNotFound(ProductId::new(product_id)));
        };

        let key = LineKey::new(&product.id, size);
        match self.lines.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self
                .lines
                .push(CartLineItem::snapshot(product, size, quantity)),
        }

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id), ("size", size.unwrap_or("-"))]),
        );
        info!(product_id, quantity, size, "Added to cart");

        self.persist()?;
        Ok(CartNotice::added(&product.name))
    }

    /// Remove every line matching (product, size) exactly.
    ///
    /// Removing an absent line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the updated cart could not be saved.
    pub fn remove_from_cart(&mut self, product_id: &str, size: Option<&str>) -> Result<(), CartError> {
        let product_id = ProductId::new(product_id);
        let key = LineKey::new(&product_id, size);

        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(&key));
        if self.lines.len() == before {
            return Ok(());
        }

        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.persist()?;
        Ok(())
    }

    /// Set a line's quantity exactly; zero or below removes it.
    ///
    /// Does nothing if the line does not exist.
    ///
    /// # Errors
    ///
    /// - `CartError::QuantityTooLarge` if `new_quantity` exceeds `u32::MAX`
    /// - `CartError::Storage` if the updated cart could not be saved
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        new_quantity: i64,
    ) -> Result<(), CartError> {
        if self.line(product_id, size).is_none() {
            return Ok(());
        }

        let Ok(quantity @ 1..) = u32::try_from(new_quantity.max(0)) else {
            return if new_quantity <= 0 {
                self.remove_from_cart(product_id, size)
            } else {
                Err(CartError::QuantityTooLarge)
            };
        };

        let product_id = ProductId::new(product_id);
        let key = LineKey::new(&product_id, size);
        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = quantity;
        }

        add_breadcrumb(
            "cart",
            "Updated cart quantity",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.persist()?;
        Ok(())
    }

    /// Add one unit of every catalog product a recipe links to.
    ///
    /// Ingredients whose product is missing from the catalog are skipped.
    /// Returns `None` when the recipe links to nothing purchasable.
    ///
    /// # Errors
    ///
    /// - `CartError::RecipeNotFound` if the recipe is not in `catalog`
    /// - `CartError::Storage` if the updated cart could not be saved
    pub fn add_recipe_to_cart(
        &mut self,
        catalog: &CatalogStore,
        recipe_id: &str,
    ) -> Result<Option<CartNotice>, CartError> {
        let Some(recipe) = catalog.find_recipe(recipe_id) else {
            warn!(recipe_id, "Add recipe to cart for unknown recipe");
            return Err(CartError::RecipeNotFound(RecipeId::new(recipe_id)));
        };

        let mut added = 0_usize;
        for product_id in recipe.linked_products() {
            match self.add_to_cart(catalog, product_id.as_str(), 1, None) {
                Ok(_) => added += 1,
                Err(CartError::ProductNotFound(missing)) => {
                    warn!(recipe_id, product_id = %missing, "Recipe ingredient not in catalog");
                }
                Err(e) => return Err(e),
            }
        }

        Ok((added > 0).then(|| CartNotice {
            message: format!("{added} ingredients from {}", recipe.name),
        }))
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the empty cart could not be saved.
    pub fn clear(&mut self) -> Result<(), CartError> {
        if self.lines.is_empty() {
            return Ok(());
        }
        self.lines.clear();
        add_breadcrumb("cart", "Cleared cart", None);
        self.persist()?;
        Ok(())
    }

    #[cfg(test)]
    const fn storage(&self) -> &S {
        &self.storage
    }

    /// Serialize the full cart into its storage slot.
    fn persist(&mut self) -> Result<(), StorageError> {
        let body = serde_json::to_string(&self.lines)?;
        self.storage.set(keys::CART, body)
    }
}

/// Restore the cart invariants on data read back from storage.
///
/// Zero-quantity lines are dropped and duplicate keys are merged into the
/// first occurrence.
fn normalize(lines: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut result: Vec<CartLineItem> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            warn!(product_id = %line.product_id, "Dropping zero-quantity line from persisted cart");
            continue;
        }
        match result.iter_mut().find(|existing| existing.matches(&line.key())) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => result.push(line),
        }
    }
    result
}
