//! Catalog loading with per-collection fallback.
//!
//! The loader never fails. Each collection is resolved independently:
//!
//! 1. the primary source, when it reports itself available;
//! 2. otherwise (or on any error) the fallback source;
//! 3. otherwise an empty collection.
//!
//! All three collections are fetched concurrently and the loader waits for
//! every one of them to settle, so a failing blog feed never holds back
//! products or recipes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, warn};

use fiber_fit_core::{
    BlogPost, BlogPostsPayload, Product, ProductsPayload, Recipe, RecipesPayload,
};

use super::CatalogStore;
use super::source::{Collection, DataSource, LoadError};

/// Where a collection's records ended up coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Primary,
    Fallback,
    /// Both sources failed; the collection is empty.
    Empty,
}

/// Outcome of loading one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub collection: Collection,
    pub origin: Origin,
    pub count: usize,
    /// Error messages from every source that was tried and failed.
    pub errors: Vec<String>,
}

/// Outcome of a full catalog load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub primary: &'static str,
    pub products: CollectionReport,
    pub recipes: CollectionReport,
    pub blog_posts: CollectionReport,
}

impl LoadReport {
    /// Reports for all three collections.
    #[must_use]
    pub fn collections(&self) -> [&CollectionReport; 3] {
        [&self.products, &self.recipes, &self.blog_posts]
    }

    /// True when any collection had to leave the primary source.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.collections()
            .iter()
            .any(|report| report.origin != Origin::Primary)
    }

    /// True when nothing at all could be loaded.
    ///
    /// This is the only case where the user sees a load-failure notice.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.collections()
            .iter()
            .all(|report| report.origin == Origin::Empty)
    }
}

/// A freshly loaded catalog plus its report.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: CatalogStore,
    pub report: LoadReport,
}

/// A JSON payload wrapping one named array.
trait Payload: DeserializeOwned {
    type Item;
    const COLLECTION: Collection;

    fn into_items(self) -> Vec<Self::Item>;
}

impl Payload for ProductsPayload {
    type Item = Product;
    const COLLECTION: Collection = Collection::Products;

    fn into_items(self) -> Vec<Product> {
        self.products
    }
}

impl Payload for RecipesPayload {
    type Item = Recipe;
    const COLLECTION: Collection = Collection::Recipes;

    fn into_items(self) -> Vec<Recipe> {
        self.recipes
    }
}

impl Payload for BlogPostsPayload {
    type Item = BlogPost;
    const COLLECTION: Collection = Collection::BlogPosts;

    fn into_items(self) -> Vec<BlogPost> {
        self.blog_posts
    }
}

/// Loads the catalog from a primary source with a fallback.
#[derive(Debug, Clone)]
pub struct DataLoader<P, F> {
    primary: P,
    fallback: F,
}

impl<P: DataSource, F: DataSource> DataLoader<P, F> {
    #[must_use]
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Load all three collections.
    ///
    /// Never fails; see the module docs for the fallback order.
    #[instrument(skip(self), fields(primary = self.primary.name(), fallback = self.fallback.name()))]
    pub async fn load(&self) -> CatalogLoad {
        let primary_available = self.primary.is_available();
        if !primary_available {
            warn!(
                source = self.primary.name(),
                "Primary catalog source unavailable, using fallback dataset"
            );
        }

        let (products, recipes, blog_posts) = tokio::join!(
            self.load_collection::<ProductsPayload>(primary_available),
            self.load_collection::<RecipesPayload>(primary_available),
            self.load_collection::<BlogPostsPayload>(primary_available),
        );

        let report = LoadReport {
            primary: self.primary.name(),
            products: products.1,
            recipes: recipes.1,
            blog_posts: blog_posts.1,
        };

        if report.is_total_failure() {
            error!("Catalog failed to load from every source");
        } else {
            info!(
                products = report.products.count,
                recipes = report.recipes.count,
                blog_posts = report.blog_posts.count,
                degraded = report.is_degraded(),
                "Catalog loaded"
            );
        }

        CatalogLoad {
            catalog: CatalogStore::new(products.0, recipes.0, blog_posts.0),
            report,
        }
    }

    async fn load_collection<T: Payload>(
        &self,
        primary_available: bool,
    ) -> (Vec<T::Item>, CollectionReport) {
        let collection = T::COLLECTION;
        let mut errors = Vec::new();

        if primary_available {
            match fetch_items::<T, _>(&self.primary).await {
                Ok(items) => {
                    info!(%collection, count = items.len(), source = self.primary.name(), "Loaded collection");
                    return report(items, collection, Origin::Primary, errors);
                }
                Err(e) => {
                    warn!(%collection, error = %e, "Primary fetch failed, trying fallback");
                    errors.push(e.to_string());
                }
            }
        } else {
            errors.push(
                LoadError::Unavailable {
                    collection,
                    source_name: self.primary.name(),
                }
                .to_string(),
            );
        }

        match fetch_items::<T, _>(&self.fallback).await {
            Ok(items) => {
                info!(%collection, count = items.len(), source = self.fallback.name(), "Loaded collection from fallback");
                report(items, collection, Origin::Fallback, errors)
            }
            Err(e) => {
                error!(%collection, error = %e, "Fallback fetch failed, collection left empty");
                errors.push(e.to_string());
                report(Vec::new(), collection, Origin::Empty, errors)
            }
        }
    }
}

/// Fetch and decode one payload from `source`.
async fn fetch_items<T: Payload, S: DataSource>(source: &S) -> Result<Vec<T::Item>, LoadError> {
    let raw = source.fetch(T::COLLECTION).await?;
    let payload: T = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        collection: T::COLLECTION,
        source,
    })?;
    Ok(payload.into_items())
}

fn report<I>(
    items: Vec<I>,
    collection: Collection,
    origin: Origin,
    errors: Vec<String>,
) -> (Vec<I>, CollectionReport) {
    let count = items.len();
    (
        items,
        CollectionReport {
            collection,
            origin,
            count,
            errors,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::source::EmbeddedSource;

    /// A source that serves fixed payloads and fails everything else.
    struct StubSource {
        available: bool,
        payloads: HashMap<Collection, String>,
    }

    impl StubSource {
        fn failing() -> Self {
            Self {
                available: true,
                payloads: HashMap::new(),
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                payloads: HashMap::new(),
            }
        }

        fn with(mut self, collection: Collection, payload: &str) -> Self {
            self.payloads.insert(collection, payload.to_string());
            self
        }
    }

    impl DataSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn fetch(&self, collection: Collection) -> Result<String, LoadError> {
            self.payloads
                .get(&collection)
                .cloned()
                .ok_or(LoadError::Status {
                    collection,
                    status: 404,
                })
        }
    }

    const ONE_PRODUCT: &str =
        r#"{"products": [{"id": "stub-flour", "name": "Stub Flour", "price": 10}]}"#;
    const ONE_RECIPE: &str = r#"{"recipes": [{"id": "stub-roti", "name": "Stub Roti"}]}"#;

    #[tokio::test]
    async fn test_one_failed_collection_does_not_block_others() {
        let primary = StubSource::failing()
            .with(Collection::Products, ONE_PRODUCT)
            .with(Collection::Recipes, ONE_RECIPE);
        let loader = DataLoader::new(primary, StubSource::failing());

        let load = loader.load().await;

        assert_eq!(load.catalog.products().len(), 1);
        assert_eq!(load.catalog.recipes().len(), 1);
        assert!(load.catalog.blog_posts().is_empty());
        assert_eq!(load.report.products.origin, Origin::Primary);
        assert_eq!(load.report.recipes.origin, Origin::Primary);
        assert_eq!(load.report.blog_posts.origin, Origin::Empty);
        assert_eq!(load.report.blog_posts.errors.len(), 2);
        assert!(!load.report.is_total_failure());
    }

    #[tokio::test]
    async fn test_failed_collection_served_from_fallback() {
        let primary = StubSource::failing().with(Collection::Products, ONE_PRODUCT);
        let loader = DataLoader::new(primary, EmbeddedSource);

        let load = loader.load().await;

        assert_eq!(load.report.products.origin, Origin::Primary);
        assert_eq!(load.catalog.products().len(), 1);
        assert_eq!(load.report.recipes.origin, Origin::Fallback);
        assert!(!load.catalog.recipes().is_empty());
        assert_eq!(load.report.blog_posts.origin, Origin::Fallback);
        assert!(load.report.is_degraded());
    }

    #[tokio::test]
    async fn test_unavailable_primary_skips_to_fallback() {
        let loader = DataLoader::new(StubSource::unavailable(), EmbeddedSource);

        let load = loader.load().await;

        for report in load.report.collections() {
            assert_eq!(report.origin, Origin::Fallback);
            assert_eq!(report.errors.len(), 1);
        }
        assert!(load.catalog.find_product("ragi-flour").is_some());
    }

    #[tokio::test]
    async fn test_everything_failing_yields_empty_catalog() {
        let loader = DataLoader::new(StubSource::failing(), StubSource::failing());

        let load = loader.load().await;

        assert!(load.catalog.is_empty());
        assert!(load.report.is_total_failure());
    }

    #[tokio::test]
    async fn test_malformed_payload_falls_back() {
        let primary = StubSource::failing().with(Collection::Products, "{not json");
        let loader = DataLoader::new(primary, EmbeddedSource);

        let load = loader.load().await;

        assert_eq!(load.report.products.origin, Origin::Fallback);
        assert!(load.report.products.errors[0].contains("failed to parse products"));
    }

    #[tokio::test]
    async fn test_missing_array_field_is_empty_not_error() {
        let primary = StubSource::failing()
            .with(Collection::Products, "{}")
            .with(Collection::Recipes, "{}")
            .with(Collection::BlogPosts, "{}");
        let loader = DataLoader::new(primary, EmbeddedSource);

        let load = loader.load().await;

        assert_eq!(load.report.products.origin, Origin::Primary);
        assert!(load.catalog.products().is_empty());
    }
}
