//! Canonical catalog state and the filter/sort/pagination engine.
//!
//! The store is a plain synchronous container: every operation mutates its
//! own state and performs no I/O. It is constructed per session (or per
//! test) and passed explicitly to whoever needs it; the async facade wraps
//! it behind a lock.

use tracing::debug;

use crate::domain::filter::{FilterOptions, FilterUpdate};
use crate::domain::pagination::{paginate, total_pages, PageSlice, PaginationState};
use crate::domain::product::{Product, ProductsResponse};

/// Holds the full product set, the active criteria, the derived
/// filtered+sorted set, and pagination state.
///
/// `filtered_products` is always the result of running `apply_filters`
/// over `(products, filter_options)`; it is never mutated independently.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub products: Vec<Product>,
    pub filtered_products: Vec<Product>,
    pub selected_product: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter_options: FilterOptions,
    pub pagination: PaginationState,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items_per_page(items_per_page: u32) -> Self {
        Self {
            pagination: PaginationState::with_items_per_page(items_per_page),
            ..Self::default()
        }
    }

    /// Replace the product set. The filtered view is replaced wholesale;
    /// existing criteria are NOT re-applied, so callers that want them to
    /// hold must follow up with [`apply_filters`](Self::apply_filters).
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.filtered_products = products.clone();
        self.products = products;
    }

    pub fn set_selected_product(&mut self, product: Option<Product>) {
        self.selected_product = product;
    }

    /// Merge a partial criteria update and jump back to the first page.
    ///
    /// Does not recompute the filtered set; several updates can be batched
    /// before one [`apply_filters`](Self::apply_filters) pass.
    pub fn set_filter_options(&mut self, update: FilterUpdate) {
        self.filter_options.merge(update);
        self.pagination.current_page = 1;
    }

    /// Recompute the filtered+sorted view from scratch.
    ///
    /// Criteria are conjunctive and applied before the sort; the sort is
    /// stable, so equal keys keep their insertion order. The pagination
    /// totals follow the new filtered length.
    pub fn apply_filters(&mut self) {
        let mut filtered: Vec<Product> = self
            .products
            .iter()
            .filter(|product| self.filter_options.matches(product))
            .cloned()
            .collect();

        if let Some(sort_by) = self.filter_options.sort_by {
            filtered.sort_by(|a, b| sort_by.compare(a, b));
        }

        debug!(
            total = self.products.len(),
            kept = filtered.len(),
            "filter pass complete"
        );

        self.filtered_products = filtered;
        self.pagination.retotal(self.filtered_products.len());
    }

    /// Restore the default criteria and expose the full product set.
    pub fn reset_filters(&mut self) {
        self.filter_options = FilterOptions::default();
        self.filtered_products = self.products.clone();
        self.pagination.current_page = 1;
        self.pagination.retotal(self.products.len());
    }

    /// Set the current page without bounds checking. Consumers that want
    /// clamping do it themselves; an out-of-range page simply yields an
    /// empty slice from [`current_page_slice`](Self::current_page_slice).
    pub fn set_current_page(&mut self, page: u32) {
        self.pagination.current_page = page;
    }

    /// Change the page size, recompute the page count for the current
    /// filtered set, and jump back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: u32) {
        self.pagination.items_per_page = items_per_page;
        self.pagination.total_pages = total_pages(self.filtered_products.len(), items_per_page);
        self.pagination.current_page = 1;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// The visible page of the filtered set.
    pub fn current_page_slice(&self) -> PageSlice<Product> {
        paginate(
            &self.filtered_products,
            self.pagination.current_page,
            self.pagination.items_per_page,
        )
    }

    // Fetch lifecycle. The facade drives these around gateway calls; the
    // `loading` flag doubles as the single-in-flight guard.

    /// Mark a fetch as in flight and clear any stale error.
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Ingest a successful product collection fetch.
    ///
    /// The pagination totals come from the server-reported `total`, which
    /// may exceed the delivered page of products.
    pub fn finish_products_load(&mut self, response: ProductsResponse) {
        self.loading = false;
        self.pagination.total_items = response.total;
        self.pagination.total_pages = total_pages(response.total, self.pagination.items_per_page);
        self.filtered_products = response.products.clone();
        self.products = response.products;
    }

    /// Ingest a successful single-product fetch.
    pub fn finish_product_load(&mut self, product: Product) {
        self.loading = false;
        self.selected_product = Some(product);
    }

    /// Record a failed fetch. The message is the normalized, human-readable
    /// form stored for the rendering layer; nothing is thrown past here.
    pub fn fail_load(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}
