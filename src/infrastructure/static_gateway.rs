//! In-memory product gateway.
//!
//! Serves a fixed product collection without any network. Used as an
//! offline backend and as the gateway double in integration tests; a
//! failing variant simulates transport errors for the error-path flows.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::gateway::{FetchParams, ProductGateway};
use crate::domain::pagination::paginate;
use crate::domain::product::{Product, ProductsResponse, Review};
use crate::infrastructure::api_error::ApiError;

/// Product gateway over an in-memory collection.
///
/// List criteria in [`FetchParams`] are ignored: this backend always serves
/// the full collection and honors only `page`/`limit`, leaving filtering to
/// the catalog store. The dedicated endpoints (`search`, featured, sale)
/// evaluate their own predicate.
pub struct StaticProductGateway {
    products: Vec<Product>,
    failure: Option<ApiError>,
}

impl StaticProductGateway {
    /// Serve the built-in sample catalog.
    pub fn sample() -> Self {
        Self::with_products(sample_products())
    }

    /// Serve a caller-provided collection.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            failure: None,
        }
    }

    /// A gateway whose every call fails with the given error.
    pub fn failing(error: ApiError) -> Self {
        Self {
            products: Vec::new(),
            failure: Some(error),
        }
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn page_of(&self, products: Vec<Product>, page: Option<u32>, limit: Option<u32>) -> ProductsResponse {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(products.len().max(1) as u32);
        let slice = paginate(&products, page, limit);
        ProductsResponse {
            products: slice.items,
            total: slice.total_items,
            page,
            limit,
        }
    }
}

#[async_trait]
impl ProductGateway for StaticProductGateway {
    async fn fetch_all(&self, params: FetchParams) -> Result<ProductsResponse, ApiError> {
        self.check_failure()?;
        Ok(self.page_of(self.products.clone(), params.page, params.limit))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Product, ApiError> {
        self.check_failure()?;
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound { id: id.to_string() })
    }

    async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError> {
        self.check_failure()?;
        let needle = query.to_lowercase();
        let hits: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(self.page_of(hits, page, limit))
    }

    async fn fetch_featured(&self, limit: Option<u32>) -> Result<ProductsResponse, ApiError> {
        self.check_failure()?;
        let featured: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_featured == Some(true))
            .cloned()
            .collect();
        Ok(self.page_of(featured, None, limit))
    }

    async fn fetch_on_sale(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError> {
        self.check_failure()?;
        let on_sale: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_on_sale())
            .cloned()
            .collect();
        Ok(self.page_of(on_sale, page, limit))
    }
}

/// A small catalog spanning several categories, brands, and price points.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: String::from("1"),
            name: String::from("Premium Wireless Headphones"),
            description: String::from(
                "High-quality wireless headphones with noise cancellation and premium sound.",
            ),
            price: 249.99,
            image_url: String::from("https://example.com/images/headphones.jpg"),
            category: String::from("Electronics"),
            rating: 4.8,
            stock: 45,
            created_at: Utc.with_ymd_and_hms(2023, 4, 15, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 5, 20, 14, 20, 0).unwrap(),
            reviews: Some(vec![
                Review {
                    id: String::from("101"),
                    user_id: String::from("user1"),
                    username: String::from("AudioPhile"),
                    rating: 5.0,
                    comment: String::from("Best headphones I've ever owned."),
                    created_at: Utc.with_ymd_and_hms(2023, 4, 20, 9, 15, 0).unwrap(),
                },
                Review {
                    id: String::from("102"),
                    user_id: String::from("user2"),
                    username: String::from("MusicLover"),
                    rating: 4.5,
                    comment: String::from("Great sound, battery life could be better."),
                    created_at: Utc.with_ymd_and_hms(2023, 4, 25, 14, 30, 0).unwrap(),
                },
            ]),
            tags: Some(vec![
                String::from("wireless"),
                String::from("audio"),
                String::from("premium"),
            ]),
            brand: Some(String::from("SoundMaster")),
            discount: Some(10.0),
            is_new: Some(false),
            is_featured: Some(true),
        },
        Product {
            id: String::from("2"),
            name: String::from("Ultra HD Smart TV 55\""),
            description: String::from(
                "Crystal clear 4K Ultra HD Smart TV with built-in streaming apps.",
            ),
            price: 799.99,
            image_url: String::from("https://example.com/images/tv.jpg"),
            category: String::from("Electronics"),
            rating: 4.6,
            stock: 20,
            created_at: Utc.with_ymd_and_hms(2023, 3, 10, 8, 45, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 5, 15, 11, 30, 0).unwrap(),
            reviews: Some(vec![Review {
                id: String::from("103"),
                user_id: String::from("user3"),
                username: String::from("MovieBuff"),
                rating: 5.0,
                comment: String::from("Picture quality is outstanding."),
                created_at: Utc.with_ymd_and_hms(2023, 3, 25, 18, 20, 0).unwrap(),
            }]),
            tags: Some(vec![
                String::from("tv"),
                String::from("4k"),
                String::from("smart-tv"),
            ]),
            brand: Some(String::from("VisionTech")),
            discount: Some(15.0),
            is_new: Some(false),
            is_featured: Some(true),
        },
        Product {
            id: String::from("3"),
            name: String::from("Professional DSLR Camera"),
            description: String::from(
                "High-performance DSLR camera with 24.2MP sensor and 4K video recording.",
            ),
            price: 1299.99,
            image_url: String::from("https://example.com/images/camera.jpg"),
            category: String::from("Photography"),
            rating: 4.9,
            stock: 15,
            created_at: Utc.with_ymd_and_hms(2023, 5, 5, 9, 20, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 5, 25, 16, 40, 0).unwrap(),
            reviews: None,
            tags: Some(vec![
                String::from("camera"),
                String::from("dslr"),
                String::from("professional"),
            ]),
            brand: Some(String::from("CaptureX")),
            discount: None,
            is_new: Some(true),
            is_featured: Some(true),
        },
        Product {
            id: String::from("4"),
            name: String::from("Ergonomic Office Chair"),
            description: String::from(
                "Adjustable office chair with lumbar support and breathable mesh back.",
            ),
            price: 189.5,
            image_url: String::from("https://example.com/images/chair.jpg"),
            category: String::from("Furniture"),
            rating: 4.2,
            stock: 0,
            created_at: Utc.with_ymd_and_hms(2023, 2, 18, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 5, 1, 9, 10, 0).unwrap(),
            reviews: None,
            tags: Some(vec![String::from("office"), String::from("ergonomic")]),
            brand: Some(String::from("ComfortPlus")),
            discount: None,
            is_new: Some(false),
            is_featured: Some(false),
        },
        Product {
            id: String::from("5"),
            name: String::from("Trail Running Shoes"),
            description: String::from(
                "Lightweight trail running shoes with aggressive grip and rock protection.",
            ),
            price: 129.0,
            image_url: String::from("https://example.com/images/shoes.jpg"),
            category: String::from("Sports"),
            rating: 4.4,
            stock: 60,
            created_at: Utc.with_ymd_and_hms(2023, 6, 2, 7, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 6, 10, 13, 0, 0).unwrap(),
            reviews: None,
            tags: Some(vec![String::from("running"), String::from("outdoor")]),
            brand: None,
            discount: Some(20.0),
            is_new: Some(true),
            is_featured: Some(false),
        },
    ]
}
