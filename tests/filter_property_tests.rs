//! Property tests for the filtering engine and the page-slice calculator.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use storefront_catalog::{paginate, CatalogStore, FilterUpdate, Product, SortOption};

fn arb_product() -> impl Strategy<Value = Product> {
    (
        1u32..10_000,
        0.0f64..2000.0,
        0.0f64..=5.0,
        0u32..50,
        prop::sample::select(vec!["Electronics", "Home", "Sports", "Photography"]),
        prop::option::of(prop::sample::select(vec!["Acme", "Globex", "Initech"])),
    )
        .prop_map(|(id, price, rating, stock, category, brand)| Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::from("generated"),
            price,
            image_url: String::from("https://example.com/p.jpg"),
            category: category.to_string(),
            rating,
            stock,
            created_at: Utc
                .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
                .unwrap()
                + chrono::Duration::hours(i64::from(id)),
            updated_at: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            reviews: None,
            tags: None,
            brand: brand.map(String::from),
            discount: None,
            is_new: None,
            is_featured: None,
        })
}

proptest! {
    /// Filtering never invents products: every survivor is in the input.
    #[test]
    fn filtered_is_a_subset(
        products in prop::collection::vec(arb_product(), 0..40),
        min in 0.0f64..500.0,
        span in 0.0f64..1500.0,
        rating in 0.0f64..=5.0,
        in_stock in any::<bool>(),
    ) {
        let mut store = CatalogStore::new();
        store.set_products(products);
        store.set_filter_options(FilterUpdate {
            price_range: Some(storefront_catalog::PriceRange::new(min, min + span)),
            rating: Some(rating),
            in_stock: Some(in_stock),
            ..FilterUpdate::default()
        });
        store.apply_filters();

        for kept in &store.filtered_products {
            prop_assert!(store.products.iter().any(|p| p.id == kept.id));
        }
        prop_assert!(store.filtered_products.len() <= store.products.len());
        prop_assert_eq!(store.pagination.total_items, store.filtered_products.len());
    }

    /// Applying the same criteria twice yields the same view, in order.
    #[test]
    fn apply_filters_is_idempotent(
        products in prop::collection::vec(arb_product(), 0..40),
        sort in prop::sample::select(vec![
            SortOption::PriceLowToHigh,
            SortOption::PriceHighToLow,
            SortOption::RatingHighToLow,
            SortOption::Newest,
            SortOption::Popularity,
        ]),
    ) {
        let mut store = CatalogStore::new();
        store.set_products(products);
        store.set_filter_options(FilterUpdate::sort(sort));
        store.apply_filters();
        let first: Vec<String> =
            store.filtered_products.iter().map(|p| p.id.clone()).collect();

        store.apply_filters();
        let second: Vec<String> =
            store.filtered_products.iter().map(|p| p.id.clone()).collect();

        prop_assert_eq!(first, second);
    }

    /// Ascending price sort is non-decreasing across the whole view.
    #[test]
    fn price_sort_is_monotone(products in prop::collection::vec(arb_product(), 0..40)) {
        let mut store = CatalogStore::new();
        store.set_products(products);
        store.set_filter_options(FilterUpdate::sort(SortOption::PriceLowToHigh));
        store.apply_filters();

        let prices: Vec<f64> = store.filtered_products.iter().map(|p| p.price).collect();
        prop_assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Every item lands on exactly one page, and pages never overflow.
    #[test]
    fn pagination_partitions_the_collection(
        len in 0usize..200,
        page_size in 1u32..25,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let pages = storefront_catalog::domain::pagination::total_pages(len, page_size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, page_size);
            prop_assert!(slice.items.len() <= page_size as usize);
            prop_assert_eq!(slice.total_items, len);
            seen.extend(slice.items);
        }
        prop_assert_eq!(seen, items.clone());

        // one past the end is empty, not an error
        let past = paginate(&items, pages + 1, page_size);
        prop_assert!(past.items.is_empty());
    }
}
