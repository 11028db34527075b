//! Domain module - Core catalog entities and pure logic
//!
//! This module contains the product entities, filter criteria, pagination
//! rules, and the gateway contract that the application layer orchestrates.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod filter;
pub mod gateway;
pub mod pagination;
pub mod product;

// Re-export commonly used items for convenience
pub use filter::{FilterOptions, FilterUpdate, PriceRange, SortOption};
pub use gateway::{FetchParams, ProductGateway};
pub use pagination::{paginate, PageSlice, PaginationState};
pub use product::{Product, ProductsResponse, Review};
