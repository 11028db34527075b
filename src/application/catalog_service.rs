//! Catalog facade sequencing gateway calls with store updates.
//!
//! One service instance owns one [`CatalogStore`] for the session. All
//! state mutation funnels through it: criteria changes are applied and
//! recomputed as one step, and gateway failures are normalized into the
//! store's error string instead of propagating to the rendering layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::store::CatalogStore;
use crate::domain::filter::{FilterUpdate, SortOption};
use crate::domain::gateway::{FetchParams, ProductGateway};
use crate::domain::pagination::PageSlice;
use crate::domain::product::Product;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_gateway::HttpProductGateway;

/// Orchestrates the product gateway and the catalog store.
pub struct CatalogService {
    store: Arc<RwLock<CatalogStore>>,
    gateway: Arc<dyn ProductGateway>,
}

impl CatalogService {
    /// Create a service with a fresh store.
    pub fn new(gateway: Arc<dyn ProductGateway>) -> Self {
        Self::with_store(gateway, Arc::new(RwLock::new(CatalogStore::new())))
    }

    /// Create a service around an existing store handle.
    pub fn with_store(gateway: Arc<dyn ProductGateway>, store: Arc<RwLock<CatalogStore>>) -> Self {
        Self { store, gateway }
    }

    /// Build a service over an HTTP gateway from the application
    /// configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let gateway = HttpProductGateway::new(&config.api)?;
        let store = CatalogStore::with_items_per_page(config.catalog.items_per_page);
        Ok(Self::with_store(
            Arc::new(gateway),
            Arc::new(RwLock::new(store)),
        ))
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<CatalogStore>> {
        Arc::clone(&self.store)
    }

    /// Cloned snapshot of the current catalog state.
    pub async fn state(&self) -> CatalogStore {
        self.store.read().await.clone()
    }

    /// Fetch the catalog if it is empty and no fetch is in flight.
    ///
    /// The `loading` flag is the in-flight guard: a call arriving while a
    /// fetch is running is suppressed, not queued. A stale fetch completing
    /// after a newer one overwrites state (last-writer-wins).
    pub async fn ensure_loaded(&self) {
        {
            let mut store = self.store.write().await;
            if !store.products.is_empty() || store.loading {
                debug!("initial fetch skipped: catalog populated or fetch in flight");
                return;
            }
            store.begin_loading();
        }
        self.fetch_and_apply(FetchParams::default()).await;
    }

    /// Re-fetch the catalog unconditionally (unless a fetch is in flight).
    pub async fn refresh(&self) {
        {
            let mut store = self.store.write().await;
            if store.loading {
                debug!("refresh skipped: fetch already in flight");
                return;
            }
            store.begin_loading();
        }
        self.fetch_and_apply(FetchParams::default()).await;
    }

    /// Fetch a single product into the selected slot.
    pub async fn load_product(&self, id: &str) {
        {
            let mut store = self.store.write().await;
            if store.loading {
                debug!(id, "product fetch skipped: fetch already in flight");
                return;
            }
            store.begin_loading();
        }

        match self.gateway.fetch_by_id(id).await {
            Ok(product) => {
                info!(id, "product loaded");
                self.store.write().await.finish_product_load(product);
            }
            Err(err) => {
                warn!(id, error = %err, "product fetch failed");
                self.store.write().await.fail_load(err.to_string());
            }
        }
    }

    async fn fetch_and_apply(&self, params: FetchParams) {
        match self.gateway.fetch_all(params).await {
            Ok(response) => {
                info!(
                    count = response.products.len(),
                    total = response.total,
                    "products loaded"
                );
                self.store.write().await.finish_products_load(response);
            }
            Err(err) => {
                warn!(error = %err, "product fetch failed");
                self.store.write().await.fail_load(err.to_string());
            }
        }
    }

    /// Merge a criteria update and recompute the filtered view as one step.
    pub async fn update_filters(&self, update: FilterUpdate) {
        let mut store = self.store.write().await;
        store.set_filter_options(update);
        store.apply_filters();
    }

    /// Set the search query and recompute.
    pub async fn search(&self, query: impl Into<String>) {
        self.update_filters(FilterUpdate::search(query)).await;
    }

    /// Constrain the view to the given categories.
    pub async fn filter_by_categories(&self, categories: Vec<String>) {
        self.update_filters(FilterUpdate::categories(categories)).await;
    }

    /// Constrain the view to the given brands.
    pub async fn filter_by_brands(&self, brands: Vec<String>) {
        self.update_filters(FilterUpdate::brands(brands)).await;
    }

    /// Constrain the view to an inclusive price range.
    pub async fn filter_by_price_range(&self, min: f64, max: f64) {
        self.update_filters(FilterUpdate::price_range(min, max)).await;
    }

    /// Constrain the view to a minimum rating.
    pub async fn filter_by_rating(&self, min_rating: f64) {
        self.update_filters(FilterUpdate::rating(min_rating)).await;
    }

    /// Toggle the in-stock-only constraint.
    pub async fn filter_by_stock(&self, in_stock: bool) {
        self.update_filters(FilterUpdate::in_stock(in_stock)).await;
    }

    /// Change the sort order and recompute.
    pub async fn sort_products(&self, sort_by: SortOption) {
        self.update_filters(FilterUpdate::sort(sort_by)).await;
    }

    /// Restore the default criteria and expose the full set.
    pub async fn clear_filters(&self) {
        self.store.write().await.reset_filters();
    }

    /// Navigate to a page. No clamping happens here; an out-of-range page
    /// yields an empty [`current_page`](Self::current_page) slice.
    pub async fn go_to_page(&self, page: u32) {
        self.store.write().await.set_current_page(page);
    }

    /// Change the page size (resets to the first page).
    pub async fn set_items_per_page(&self, items_per_page: u32) {
        self.store.write().await.set_items_per_page(items_per_page);
    }

    /// Select a product for detail display without a fetch.
    pub async fn select_product(&self, product: Option<Product>) {
        self.store.write().await.set_selected_product(product);
    }

    /// Drop any stored fetch error.
    pub async fn clear_error(&self) {
        self.store.write().await.clear_error();
    }

    /// The visible page of the filtered set.
    pub async fn current_page(&self) -> PageSlice<Product> {
        self.store.read().await.current_page_slice()
    }
}
