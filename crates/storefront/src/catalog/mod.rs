//! In-memory catalog of products, recipes and blog posts.
//!
//! The catalog is loaded once at startup by the [`DataLoader`] and is
//! read-only afterwards. Reloading builds a new [`CatalogStore`] and replaces
//! the old one wholesale; there is no incremental update.

pub mod loader;
pub mod source;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use fiber_fit_core::{BlogPost, Product, ProductId, Recipe};

pub use loader::{CatalogLoad, CollectionReport, DataLoader, LoadReport, Origin};
pub use source::{
    Collection, ConfiguredSource, DataSource, DirectorySource, EmbeddedSource, LoadError,
    RemoteSource,
};

/// Catalog store that holds all loaded collections in memory.
///
/// Cheap to clone; collections are shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Arc<Vec<Product>>,
    recipes: Arc<Vec<Recipe>>,
    blog_posts: Arc<Vec<BlogPost>>,
    product_index: Arc<HashMap<ProductId, usize>>,
}

impl CatalogStore {
    /// Build a store from loaded collections.
    ///
    /// Every collection keeps its source order. If two products share an ID
    /// the first one wins lookups.
    #[must_use]
    pub fn new(products: Vec<Product>, recipes: Vec<Recipe>, blog_posts: Vec<BlogPost>) -> Self {
        let mut product_index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            match product_index.entry(product.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(id = %product.id, "Duplicate product id in catalog");
                }
            }
        }

        Self {
            products: Arc::new(products),
            recipes: Arc::new(recipes),
            blog_posts: Arc::new(blog_posts),
            product_index: Arc::new(product_index),
        }
    }

    /// Get a product by id
    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.product_index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// Get a recipe by id
    #[must_use]
    pub fn find_recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Get a blog post by id or slug
    #[must_use]
    pub fn find_blog_post(&self, id_or_slug: &str) -> Option<&BlogPost> {
        self.blog_posts
            .iter()
            .find(|p| p.id == id_or_slug || p.slug == id_or_slug)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All recipes, in catalog order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// All blog posts, in catalog order.
    #[must_use]
    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.blog_posts
    }

    /// Featured blog posts, in catalog order.
    pub fn featured_posts(&self) -> impl Iterator<Item = &BlogPost> {
        self.blog_posts.iter().filter(|p| p.featured)
    }

    /// Distinct product categories in first-seen order.
    #[must_use]
    pub fn product_categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct blog categories in first-seen order.
    #[must_use]
    pub fn blog_categories(&self) -> Vec<&str> {
        distinct(self.blog_posts.iter().map(|p| p.category.as_str()))
    }

    /// True when all three collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.recipes.is_empty() && self.blog_posts.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "price": 100,
            "category": category,
        }))
        .unwrap()
    }

    fn post(id: &str, date: &str) -> BlogPost {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": id,
            "publishDate": date,
            "category": "health",
        }))
        .unwrap()
    }

    #[test]
    fn test_find_product() {
        let store = CatalogStore::new(
            vec![
                product("ragi-flour", "Ragi", "flour"),
                product("kodo-millet", "Kodo", "grain"),
            ],
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(store.find_product("kodo-millet").unwrap().name, "Kodo");
        assert!(store.find_product("missing").is_none());
    }

    #[test]
    fn test_duplicate_product_first_wins() {
        let store = CatalogStore::new(
            vec![
                product("ragi-flour", "First", "flour"),
                product("ragi-flour", "Second", "flour"),
            ],
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(store.find_product("ragi-flour").unwrap().name, "First");
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn test_posts_keep_source_order() {
        let store = CatalogStore::new(
            Vec::new(),
            Vec::new(),
            vec![post("old", "2023-01-01"), post("new", "2024-10-15")],
        );

        let ids: Vec<_> = store.blog_posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new"]);
        assert!(store.find_blog_post("old").is_some());
    }

    #[test]
    fn test_product_categories_first_seen_order() {
        let store = CatalogStore::new(
            vec![
                product("a", "A", "grain"),
                product("b", "B", "flour"),
                product("c", "C", "grain"),
            ],
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(store.product_categories(), vec!["grain", "flour"]);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(CatalogStore::default().is_empty());
    }
}
