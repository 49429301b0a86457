//! Fixed-size page model shared by Quill feed endpoints.
//!
//! Every paginated view in the backend uses the same policy: a fixed page
//! size, 1-based page numbers, and out-of-range requests clamped to the
//! nearest valid page rather than rejected. [`Paginator`] computes the
//! clamped window to fetch; [`Page`] is the envelope handed back to inbound
//! adapters together with the totals they need to render paging controls.

use serde::Serialize;

/// Page size used by every feed endpoint unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised when constructing a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size must be at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// The clamped slice of a result set to fetch from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number after clamping.
    pub number: usize,
    /// Offset of the first item of the page.
    pub offset: usize,
    /// Maximum number of items on the page.
    pub limit: usize,
}

/// Computes clamped page windows for a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Construct a paginator, rejecting a zero page size.
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    /// The fixed number of items per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of pages for `total_items`.
    ///
    /// An empty result set still has one (empty) page so that clamping always
    /// has a valid target.
    #[must_use]
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Clamp a requested 1-based page number into the valid range.
    ///
    /// Page zero clamps up to the first page; anything past the end clamps
    /// down to the last page.
    #[must_use]
    pub fn clamp_page(&self, requested: usize, total_items: usize) -> usize {
        requested.max(1).min(self.total_pages(total_items))
    }

    /// The storage window for a requested page, after clamping.
    #[must_use]
    pub fn window(&self, requested: usize, total_items: usize) -> PageWindow {
        let number = self.clamp_page(requested, total_items);
        PageWindow {
            number,
            offset: (number - 1) * self.page_size,
            limit: self.page_size,
        }
    }

    /// Wrap fetched items into a [`Page`] envelope.
    ///
    /// `number` must already be clamped (i.e. obtained from [`Self::window`]).
    #[must_use]
    pub fn assemble<T>(&self, items: Vec<T>, number: usize, total_items: usize) -> Page<T> {
        Page {
            items,
            number,
            page_size: self.page_size,
            total_items,
            total_pages: self.total_pages(total_items),
        }
    }
}

/// One page of results plus the totals needed to render paging controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, yielding its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based page number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Fixed page size this page was cut with.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total items across all pages.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Map every item on the page, preserving the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paginator() -> Paginator {
        Paginator::new(DEFAULT_PAGE_SIZE).expect("non-zero page size")
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(Paginator::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(12, 2)]
    #[case(20, 2)]
    #[case(21, 3)]
    fn total_pages_rounds_up(#[case] total: usize, #[case] pages: usize) {
        assert_eq!(paginator().total_pages(total), pages);
    }

    #[rstest]
    #[case(0, 12, 1)]
    #[case(1, 12, 1)]
    #[case(2, 12, 2)]
    #[case(99, 12, 2)]
    #[case(5, 0, 1)]
    fn requested_pages_clamp_to_valid_range(
        #[case] requested: usize,
        #[case] total: usize,
        #[case] clamped: usize,
    ) {
        assert_eq!(paginator().clamp_page(requested, total), clamped);
    }

    #[test]
    fn window_of_second_page_skips_first_page() {
        let window = paginator().window(2, 12);
        assert_eq!(window.number, 2);
        assert_eq!(window.offset, 10);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn window_past_the_end_lands_on_last_page() {
        let window = paginator().window(7, 12);
        assert_eq!(window.number, 2);
        assert_eq!(window.offset, 10);
    }

    #[test]
    fn twelve_items_split_ten_then_two() {
        let p = paginator();
        let first = p.window(1, 12);
        let second = p.window(2, 12);
        assert_eq!((first.offset, first.limit), (0, 10));
        // Ten items fill page one; the remaining two land on page two.
        assert_eq!(12 - second.offset, 2);
    }

    #[test]
    fn page_envelope_reports_navigation_flags() {
        let p = paginator();
        let page = p.assemble(vec![1, 2], 2, 12);
        assert_eq!(page.number(), 2);
        assert_eq!(page.total_items(), 12);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn map_preserves_the_envelope() {
        let page = paginator().assemble(vec![1, 2, 3], 1, 3).map(|n| n * 2);
        assert_eq!(page.items(), &[2, 4, 6]);
        assert_eq!(page.total_items(), 3);
    }
}
