/// Lessons shown per page on the scene detail view.
pub const LESSON_PAGE_SIZE: usize = 5;

/// Client-side pagination over an in-memory list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    total_items: usize,
    page: usize,
}

impl Pager {
    /// A pager positioned on page 1. A zero page size is treated as 1.
    #[must_use]
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_items,
            page: 1,
        }
    }

    #[must_use]
    pub fn for_lessons(total_items: usize) -> Self {
        Self::new(total_items, LESSON_PAGE_SIZE)
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(total / size))`.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    #[must_use]
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages() > 1
    }

    /// Move to `page`; anything outside `1..=total_pages` lands on page 1.
    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = if (1..=self.total_pages()).contains(&page) {
            page
        } else {
            1
        };
        self
    }

    /// The list changed length; an out-of-range current page resets to 1.
    #[must_use]
    pub fn with_total(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        let page = self.page;
        self.with_page(page)
    }

    /// Index range of the current page within the list.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}
