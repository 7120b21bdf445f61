//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, the `Page` result container and
//! helpers to normalize inputs.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Clamp to sane defaults and convert to a zero-based page index and page size
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 10 } }
}

/// One page of results plus the total item count.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 1-based page index after normalization
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let (idx, per_page) = pagination.normalize();
        Self { items, total, page: idx as u32 + 1, per_page: per_page as u32 }
    }

    /// Slice an already-loaded, already-ordered collection.
    pub fn from_vec(all: Vec<T>, pagination: Pagination) -> Self {
        let (idx, per_page) = pagination.normalize();
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip((idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Self::new(items, total, pagination)
    }

    pub fn num_pages(&self) -> u64 {
        if self.total == 0 { 1 } else { self.total.div_ceil(self.per_page as u64) }
    }

    pub fn has_next(&self) -> bool { (self.page as u64) < self.num_pages() }

    pub fn has_previous(&self) -> bool { self.page > 1 }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), total: self.total, page: self.page, per_page: self.per_page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 10);
    }

    #[test]
    fn page_from_vec_slices_and_links() {
        let page = Page::from_vec((1..=25).collect::<Vec<_>>(), Pagination::new(2, 10));
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.num_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::from_vec((1..=25).collect::<Vec<_>>(), Pagination::new(3, 10));
        assert_eq!(last.items.len(), 5);
        assert!(!last.has_next());
    }

    #[test]
    fn empty_page_has_no_neighbours() {
        let page: Page<u8> = Page::from_vec(vec![], Pagination::default());
        assert_eq!(page.num_pages(), 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }
}
