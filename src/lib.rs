//! Storefront Catalog - client-side product catalog engine
//!
//! This crate provides the state layer behind a paginated, filterable,
//! sortable product catalog view: a deterministic state container, an async
//! gateway to a remote product API, and a facade orchestrating the two.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the primary entry points for easier access
pub use application::catalog_service::CatalogService;
pub use application::store::CatalogStore;
pub use domain::filter::{FilterOptions, FilterUpdate, PriceRange, SortOption};
pub use domain::gateway::{FetchParams, ProductGateway};
pub use domain::pagination::{paginate, PageSlice, PaginationState};
pub use domain::product::{Product, ProductsResponse, Review};
pub use infrastructure::api_error::ApiError;
