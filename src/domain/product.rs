use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as served by the products API.
///
/// Products are created and updated only by gateway fetch results; the
/// store treats them as read-only. Optional fields absent on the wire
/// deserialize to `None` and are treated as empty/neutral everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub rating: f64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Discount percentage in [0, 100].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// A customer review. Owned by its product, no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Number of reviews attached to this product. Absent reviews count as zero.
    pub fn review_count(&self) -> usize {
        self.reviews.as_ref().map_or(0, Vec::len)
    }

    /// Popularity weight: rating scaled by review volume.
    pub fn popularity(&self) -> f64 {
        self.rating * self.review_count() as f64
    }

    /// Price after applying the optional discount percentage, if any.
    pub fn discounted_price(&self) -> Option<f64> {
        match self.discount {
            Some(discount) if discount > 0.0 => Some(self.price - self.price * discount / 100.0),
            _ => None,
        }
    }

    /// Whether the product currently has an active discount.
    pub fn is_on_sale(&self) -> bool {
        self.discount.is_some_and(|d| d > 0.0)
    }
}

/// Paged product collection returned by the list endpoints.
///
/// All fields default when missing so that a partial or empty response
/// degrades to an empty collection instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

impl ProductsResponse {
    /// Wrap a full in-memory product list as a single-page response.
    pub fn from_products(products: Vec<Product>) -> Self {
        let total = products.len();
        Self {
            products,
            total,
            page: 1,
            limit: total as u32,
        }
    }
}
