//! Pagination window over matched results.

use serde::Serialize;

/// Items revealed initially and per "load more".
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// The first `revealed` items of `matched`.
pub fn window<T>(matched: &[T], revealed: usize) -> &[T] {
    &matched[..revealed.min(matched.len())]
}

/// Growing prefix of an already-computed result list.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaginationWindow {
    page_size: usize,
    revealed: usize,
}

impl PaginationWindow {
    /// Create a window. A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            revealed: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current revealed count (may exceed the list length).
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Visible slice of the matched list.
    pub fn window<'a, T>(&self, matched: &'a [T]) -> &'a [T] {
        window(matched, self.revealed)
    }

    /// Reveal one more page, capped at `total`. Returns whether anything
    /// changed.
    pub fn load_more(&mut self, total: usize) -> bool {
        if self.revealed >= total {
            return false;
        }
        self.revealed = (self.revealed + self.page_size).min(total);
        true
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.revealed = self.page_size;
    }

    /// Whether a "load more" control should show.
    pub fn has_more(&self, total: usize) -> bool {
        total > self.revealed
    }

    /// Number of items actually shown.
    pub fn shown(&self, total: usize) -> usize {
        self.revealed.min(total)
    }

    /// "Showing X of Y products".
    pub fn summary(&self, total: usize) -> String {
        format!("Showing {} of {} products", self.shown(total), total)
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
