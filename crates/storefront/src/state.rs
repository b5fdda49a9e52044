//! Application state.
//!
//! Owns the configuration, the loaded catalog and the cart, and hands them to
//! the page handlers. There is exactly one cart per state, so mutations take
//! `&mut self`.

use tracing::instrument;

use fiber_fit_core::{CartTotals, Page};

use crate::cart::{CartError, CartNotice, CartStore, FileStorage, KeyValueStorage};
use crate::catalog::{
    CatalogLoad, CatalogStore, ConfiguredSource, DataLoader, EmbeddedSource, LoadReport,
};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::pages::{self, PageContext, PageQuery, PageView};
use crate::views::CartView;

/// Application state for one storefront session.
#[derive(Debug)]
pub struct AppState<S = FileStorage> {
    config: StorefrontConfig,
    loader: DataLoader<ConfiguredSource, EmbeddedSource>,
    catalog: CatalogStore,
    report: LoadReport,
    cart: CartStore<S>,
}

impl AppState<FileStorage> {
    /// Load the catalog and open the persisted cart.
    ///
    /// Catalog loading never fails; a degraded load is visible in
    /// [`AppState::report`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` if the remote data source's HTTP client
    /// cannot be built.
    pub async fn init(config: StorefrontConfig) -> Result<Self, AppError> {
        let storage = FileStorage::open(&config.storage_path);
        Self::with_storage(config, storage).await
    }
}

impl<S: KeyValueStorage> AppState<S> {
    /// Load the catalog and open the cart persisted in `storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Http` if the remote data source's HTTP client
    /// cannot be built.
    #[instrument(skip_all)]
    pub async fn with_storage(config: StorefrontConfig, storage: S) -> Result<Self, AppError> {
        let loader = DataLoader::new(ConfiguredSource::from_config(&config)?, EmbeddedSource);
        let CatalogLoad { catalog, report } = loader.load().await;
        let cart = CartStore::open(storage);

        Ok(Self {
            config,
            loader,
            catalog,
            report,
            cart,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Outcome of the most recent catalog load.
    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Reload every collection and replace the catalog wholesale.
    ///
    /// Existing cart lines keep their snapshotted product data.
    pub async fn reload_catalog(&mut self) -> &LoadReport {
        let CatalogLoad { catalog, report } = self.loader.load().await;
        self.catalog = catalog;
        self.report = report;
        &self.report
    }

    /// See [`CartStore::add_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the product is unknown, the quantity is zero or
    /// the cart cannot be saved.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<CartNotice, CartError> {
        self.cart
            .add_to_cart(&self.catalog, product_id, quantity, size)
    }

    /// See [`CartStore::add_recipe_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the recipe is unknown or the cart cannot be saved.
    pub fn add_recipe_to_cart(&mut self, recipe_id: &str) -> Result<Option<CartNotice>, CartError> {
        self.cart.add_recipe_to_cart(&self.catalog, recipe_id)
    }

    /// See [`CartStore::remove_from_cart`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be saved.
    pub fn remove_from_cart(&mut self, product_id: &str, size: Option<&str>) -> Result<(), CartError> {
        self.cart.remove_from_cart(product_id, size)
    }

    /// See [`CartStore::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be saved.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        quantity: i64,
    ) -> Result<(), CartError> {
        self.cart.update_quantity(product_id, size, quantity)
    }

    /// See [`CartStore::clear`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be saved.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.cart.clear()
    }

    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals()
    }

    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from_lines(self.cart.lines())
    }

    /// Render a page from the current catalog and cart.
    #[must_use]
    pub fn page(&self, page: Page, query: &PageQuery) -> PageView {
        pages::render(
            page,
            PageContext {
                catalog: &self.catalog,
                report: &self.report,
                cart: self.cart.lines(),
                query,
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fiber_fit_core::Price;

    use super::*;
    use crate::cart::MemoryStorage;
    use crate::catalog::Origin;
    use crate::config::DataSourceConfig;

    fn embedded_config() -> StorefrontConfig {
        StorefrontConfig {
            data_source: DataSourceConfig::Embedded,
            ..StorefrontConfig::default()
        }
    }

    #[tokio::test]
    async fn test_state_from_embedded_source() {
        let state = AppState::with_storage(embedded_config(), MemoryStorage::new())
            .await
            .unwrap();

        assert_eq!(state.report().products.origin, Origin::Primary);
        assert!(state.catalog().find_product("ragi-flour").is_some());
        assert!(state.cart().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_source: DataSourceConfig::Directory {
                root: dir.path().to_path_buf(),
            },
            ..StorefrontConfig::default()
        };

        let state = AppState::with_storage(config, MemoryStorage::new())
            .await
            .unwrap();

        assert!(state.report().is_degraded());
        assert!(!state.report().is_total_failure());
        assert_eq!(state.catalog().products().len(), 10);
    }

    #[tokio::test]
    async fn test_cart_flow_through_state() {
        let mut state = AppState::with_storage(embedded_config(), MemoryStorage::new())
            .await
            .unwrap();

        state.add_to_cart("ragi-flour", 2, None).unwrap();
        state.add_to_cart("jowar-flour", 1, None).unwrap();

        assert_eq!(state.cart_totals().total_price, Price::from_whole(273));
        assert_eq!(state.cart_view().subtotal, "₹273.00");

        let page = state.page(Page::Products, &PageQuery::default());
        assert_eq!(page.cart.item_count, 3);
    }

    #[tokio::test]
    async fn test_reload_keeps_cart() {
        let mut state = AppState::with_storage(embedded_config(), MemoryStorage::new())
            .await
            .unwrap();
        state.add_to_cart("ragi-flour", 1, Some("1kg")).unwrap();

        let report = state.reload_catalog().await;
        assert!(!report.is_degraded());
        assert_eq!(state.cart().lines().len(), 1);
    }
}
