//! Remote catalog gateway contract.
//!
//! The application layer depends only on this trait; concrete transports
//! (HTTP, in-memory) live in the infrastructure layer.

use async_trait::async_trait;

use crate::domain::filter::{PriceRange, SortOption};
use crate::domain::product::{Product, ProductsResponse};
use crate::infrastructure::api_error::ApiError;

/// Query parameters accepted by the product list endpoints.
///
/// Every field is optional; unset fields are omitted from the query string
/// so the server applies no constraint for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchParams {
    pub search_query: Option<String>,
    pub categories: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub rating: Option<f64>,
    pub in_stock: Option<bool>,
    pub is_new: Option<bool>,
    pub sort_by: Option<SortOption>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FetchParams {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Render the set fields as query pairs. List fields use the bracketed
    /// repeated-key convention (`categories[]=a&categories[]=b`), nested
    /// bounds use `priceRange[min]`/`priceRange[max]`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(query) = &self.search_query {
            pairs.push((String::from("searchQuery"), query.clone()));
        }
        for category in self.categories.iter().flatten() {
            pairs.push((String::from("categories[]"), category.clone()));
        }
        for brand in self.brands.iter().flatten() {
            pairs.push((String::from("brands[]"), brand.clone()));
        }
        for tag in self.tags.iter().flatten() {
            pairs.push((String::from("tags[]"), tag.clone()));
        }
        if let Some(range) = &self.price_range {
            pairs.push((String::from("priceRange[min]"), range.min.to_string()));
            if let Some(max) = range.max {
                pairs.push((String::from("priceRange[max]"), max.to_string()));
            }
        }
        if let Some(rating) = self.rating {
            pairs.push((String::from("rating"), rating.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push((String::from("inStock"), in_stock.to_string()));
        }
        if let Some(is_new) = self.is_new {
            pairs.push((String::from("isNew"), is_new.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push((String::from("sortBy"), sort_by.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push((String::from("page"), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push((String::from("limit"), limit.to_string()));
        }

        pairs
    }
}

/// Remote source of catalog products.
///
/// Implementations surface failures as [`ApiError`]; the facade converts
/// those into the catalog error state, so consumers above it only ever
/// observe the normalized message string.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetch a page of products with optional filtering and sorting.
    async fn fetch_all(&self, params: FetchParams) -> Result<ProductsResponse, ApiError>;

    /// Fetch a single product by id.
    async fn fetch_by_id(&self, id: &str) -> Result<Product, ApiError>;

    /// Full-text search across the catalog.
    async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError>;

    /// Products flagged as featured.
    async fn fetch_featured(&self, limit: Option<u32>) -> Result<ProductsResponse, ApiError>;

    /// Products with an active discount.
    async fn fetch_on_sale(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_params_produce_no_pairs() {
        assert!(FetchParams::default().query_pairs().is_empty());
    }

    #[test]
    fn list_fields_repeat_their_key() {
        let params = FetchParams {
            categories: Some(vec![String::from("Electronics"), String::from("Home")]),
            sort_by: Some(SortOption::PriceLowToHigh),
            page: Some(2),
            limit: Some(20),
            ..FetchParams::default()
        };

        let pairs = params.query_pairs();
        assert_eq!(
            pairs,
            vec![
                (String::from("categories[]"), String::from("Electronics")),
                (String::from("categories[]"), String::from("Home")),
                (String::from("sortBy"), String::from("price_asc")),
                (String::from("page"), String::from("2")),
                (String::from("limit"), String::from("20")),
            ]
        );
    }

    #[test]
    fn unbounded_price_range_omits_max() {
        let params = FetchParams {
            price_range: Some(PriceRange { min: 50.0, max: None }),
            ..FetchParams::default()
        };
        assert_eq!(
            params.query_pairs(),
            vec![(String::from("priceRange[min]"), String::from("50"))]
        );
    }
}
