//! Filter criteria and the rules applied to the product set.
//!
//! Responsibility:
//! - criteria types (search, categories, brands, tags, price, rating, stock)
//! - the conjunctive predicate used to narrow the product set
//! - the comparison rules behind each sort order
//!
//! Invariant: an absent/empty/zero criterion imposes no constraint. A
//! criterion never means "match nothing".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Sort orders supported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    #[serde(rename = "price_asc")]
    PriceLowToHigh,
    #[serde(rename = "price_desc")]
    PriceHighToLow,
    #[serde(rename = "rating_desc")]
    RatingHighToLow,
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "popularity")]
    Popularity,
}

impl SortOption {
    /// Wire name used in API query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceLowToHigh => "price_asc",
            Self::PriceHighToLow => "price_desc",
            Self::RatingHighToLow => "rating_desc",
            Self::Newest => "newest",
            Self::Popularity => "popularity",
        }
    }

    /// Ordering of two products under this sort. Ties keep insertion order
    /// when used with a stable sort.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceLowToHigh => a.price.total_cmp(&b.price),
            Self::PriceHighToLow => b.price.total_cmp(&a.price),
            Self::RatingHighToLow => b.rating.total_cmp(&a.rating),
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Popularity => b.popularity().total_cmp(&a.popularity()),
        }
    }
}

/// Inclusive price bounds. A missing upper bound means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, 1000.0)
    }
}

/// The full set of user-selected constraints narrowing the visible
/// product set, plus the active sort order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub search_query: String,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub tags: Vec<String>,
    pub price_range: PriceRange,
    /// Minimum inclusive rating threshold; zero disables the filter.
    pub rating: f64,
    pub in_stock: bool,
    pub sort_by: Option<SortOption>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            categories: Vec::new(),
            brands: Vec::new(),
            tags: Vec::new(),
            price_range: PriceRange::default(),
            rating: 0.0,
            in_stock: false,
            sort_by: Some(SortOption::Newest),
        }
    }
}

impl FilterOptions {
    /// Conjunction of all active criteria.
    ///
    /// Missing optional product fields (`brand`, `tags`) are neutral for
    /// inactive criteria; a product without a brand fails a non-empty
    /// brand filter, and likewise for tags.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if !self.price_range.contains(product.price) {
            return false;
        }

        if self.rating > 0.0 && product.rating < self.rating {
            return false;
        }

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            let hit = product.name.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let product_tags = product.tags.as_deref().unwrap_or(&[]);
            if !product_tags.iter().any(|tag| self.tags.contains(tag)) {
                return false;
            }
        }

        if !self.brands.is_empty() {
            match &product.brand {
                Some(brand) if self.brands.contains(brand) => {}
                _ => return false,
            }
        }

        if self.in_stock && product.stock == 0 {
            return false;
        }

        true
    }

    /// Merge a partial update into the current criteria, field by field.
    /// Fields the update leaves unset keep their current value.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(search_query) = update.search_query {
            self.search_query = search_query;
        }
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(brands) = update.brands {
            self.brands = brands;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(price_range) = update.price_range {
            self.price_range = price_range;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = Some(sort_by);
        }
    }
}

/// Partial criteria update. Unset fields leave the current value untouched,
/// so several criterion changes can be batched into one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub search_query: Option<String>,
    pub categories: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub rating: Option<f64>,
    pub in_stock: Option<bool>,
    pub sort_by: Option<SortOption>,
}

impl FilterUpdate {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn categories(categories: Vec<String>) -> Self {
        Self {
            categories: Some(categories),
            ..Self::default()
        }
    }

    pub fn brands(brands: Vec<String>) -> Self {
        Self {
            brands: Some(brands),
            ..Self::default()
        }
    }

    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    pub fn price_range(min: f64, max: f64) -> Self {
        Self {
            price_range: Some(PriceRange::new(min, max)),
            ..Self::default()
        }
    }

    pub fn rating(min_rating: f64) -> Self {
        Self {
            rating: Some(min_rating),
            ..Self::default()
        }
    }

    pub fn in_stock(in_stock: bool) -> Self {
        Self {
            in_stock: Some(in_stock),
            ..Self::default()
        }
    }

    pub fn sort(sort_by: SortOption) -> Self {
        Self {
            sort_by: Some(sort_by),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn product(id: &str, price: f64, category: &str, brand: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::from("A test product"),
            price,
            image_url: String::from("https://example.com/p.jpg"),
            category: category.to_string(),
            rating: 4.0,
            stock: 3,
            created_at: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap(),
            reviews: None,
            tags: None,
            brand: brand.map(String::from),
            discount: None,
            is_new: None,
            is_featured: None,
        }
    }

    #[test]
    fn default_options_impose_no_constraint_below_price_cap() {
        let options = FilterOptions::default();
        assert!(options.matches(&product("1", 100.0, "A", None)));
    }

    #[rstest]
    #[case(1000.0, true)] // inclusive upper bound
    #[case(1000.01, false)]
    #[case(0.0, true)] // inclusive lower bound
    fn price_range_bounds_are_inclusive(#[case] price: f64, #[case] expected: bool) {
        let options = FilterOptions::default();
        assert_eq!(options.matches(&product("1", price, "A", None)), expected);
    }

    #[test]
    fn missing_max_means_unbounded() {
        let range = PriceRange { min: 10.0, max: None };
        assert!(range.contains(1_000_000.0));
        assert!(!range.contains(9.99));
    }

    #[test]
    fn brandless_product_fails_a_brand_filter() {
        let mut options = FilterOptions::default();
        options.brands = vec![String::from("Acme")];
        assert!(!options.matches(&product("1", 50.0, "A", None)));
        assert!(options.matches(&product("2", 50.0, "A", Some("Acme"))));
        assert!(!options.matches(&product("3", 50.0, "A", Some("Other"))));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let mut options = FilterOptions::default();
        options.search_query = String::from("pRoDuCt 7");
        assert!(options.matches(&product("7", 50.0, "A", None)));

        options.search_query = String::from("test product");
        assert!(options.matches(&product("8", 50.0, "A", None)));

        options.search_query = String::from("xyz");
        assert!(!options.matches(&product("9", 50.0, "A", None)));
    }

    #[test]
    fn tag_filter_needs_at_least_one_match() {
        let mut options = FilterOptions::default();
        options.merge(FilterUpdate::tags(vec![
            String::from("audio"),
            String::from("video"),
        ]));

        let mut tagged = product("1", 50.0, "A", None);
        tagged.tags = Some(vec![String::from("audio"), String::from("premium")]);
        assert!(options.matches(&tagged));

        let untagged = product("2", 50.0, "A", None);
        assert!(!options.matches(&untagged));
    }

    #[test]
    fn zero_rating_threshold_is_disabled() {
        let mut options = FilterOptions::default();
        options.rating = 0.0;
        let mut low = product("1", 50.0, "A", None);
        low.rating = 0.5;
        assert!(options.matches(&low));

        options.rating = 4.5;
        assert!(!options.matches(&low));
    }

    #[test]
    fn merge_only_touches_set_fields() {
        let mut options = FilterOptions::default();
        options.search_query = String::from("lamp");
        options.rating = 3.0;

        options.merge(FilterUpdate::categories(vec![String::from("Home")]));

        assert_eq!(options.search_query, "lamp");
        assert_eq!(options.rating, 3.0);
        assert_eq!(options.categories, vec![String::from("Home")]);
        assert_eq!(options.sort_by, Some(SortOption::Newest));
    }

    #[test]
    fn sort_option_wire_names_round_trip() {
        for option in [
            SortOption::PriceLowToHigh,
            SortOption::PriceHighToLow,
            SortOption::RatingHighToLow,
            SortOption::Newest,
            SortOption::Popularity,
        ] {
            let encoded = serde_json::to_string(&option).expect("serializable");
            assert_eq!(encoded, format!("\"{}\"", option.as_str()));
        }
    }
}
