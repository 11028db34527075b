//! Pagination domain logic centralization.
//!
//! Responsibility:
//! - page count derivation (ceil of item count over page size)
//! - the pure page-slice calculation used to project the visible page
//! - the pagination bookkeeping carried by the catalog state

use serde::{Deserialize, Serialize};

/// Default page size for catalog views.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Pagination bookkeeping for the catalog view.
///
/// `current_page` is 1-based. `total_items`/`total_pages` are derived and
/// recomputed whenever the filtered set or the page size changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            total_items: 0,
            total_pages: 0,
        }
    }
}

impl PaginationState {
    pub fn with_items_per_page(items_per_page: u32) -> Self {
        Self {
            items_per_page,
            ..Self::default()
        }
    }

    /// Recompute the derived totals for a collection of `len` items.
    pub fn retotal(&mut self, len: usize) {
        self.total_items = len;
        self.total_pages = total_pages(len, self.items_per_page);
    }
}

/// ceil(total_items / items_per_page); a zero page size yields zero pages.
pub fn total_pages(total_items: usize, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(items_per_page as usize) as u32
}

/// One page of a larger collection, with the derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: u32,
}

/// Project the requested 1-based page out of `items`.
///
/// An out-of-range page (zero, or past the last page) yields an empty
/// slice rather than an error; the totals still describe the full
/// collection.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageSlice<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);

    if page == 0 || page_size == 0 {
        return PageSlice {
            items: Vec::new(),
            total_items,
            total_pages,
        };
    }

    let start = (page as usize - 1) * page_size as usize;
    let page_items = if start >= total_items {
        Vec::new()
    } else {
        let end = (start + page_size as usize).min(total_items);
        items[start..end].to_vec()
    };

    PageSlice {
        items: page_items,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_holds_the_remainder() {
        let items: Vec<u32> = (1..=15).collect();
        let slice = paginate(&items, 2, 10);
        assert_eq!(slice.items, vec![11, 12, 13, 14, 15]);
        assert_eq!(slice.total_items, 15);
        assert_eq!(slice.total_pages, 2);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items: Vec<u32> = (1..=15).collect();
        let slice = paginate(&items, 4, 10);
        assert!(slice.items.is_empty());
        assert_eq!(slice.total_pages, 2);

        let zeroth = paginate(&items, 0, 10);
        assert!(zeroth.items.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let items: Vec<u32> = (1..=20).collect();
        assert_eq!(total_pages(items.len(), 10), 2);
        let slice = paginate(&items, 3, 10);
        assert!(slice.items.is_empty());
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let slice = paginate::<u32>(&[], 1, 10);
        assert!(slice.items.is_empty());
        assert_eq!(slice.total_items, 0);
        assert_eq!(slice.total_pages, 0);
    }

    #[test]
    fn zero_page_size_yields_nothing() {
        let items: Vec<u32> = (1..=5).collect();
        let slice = paginate(&items, 1, 0);
        assert!(slice.items.is_empty());
        assert_eq!(slice.total_pages, 0);
    }

    #[test]
    fn retotal_tracks_page_size() {
        let mut pagination = PaginationState::with_items_per_page(5);
        pagination.retotal(11);
        assert_eq!(pagination.total_items, 11);
        assert_eq!(pagination.total_pages, 3);

        pagination.items_per_page = 20;
        pagination.retotal(11);
        assert_eq!(pagination.total_pages, 1);
    }
}
