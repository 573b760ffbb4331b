//! Keyboard selection over the suggestion dropdown.

use url::form_urlencoded;

use crate::suggest::{SuggestionKind, SuggestionResult};

/// Keys the search box handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
}

/// Where committing the search box leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommit {
    /// Full-text search for a term.
    Search(String),
    /// A category page, keyed by the lowercased suggestion title.
    Category(String),
}

impl SearchCommit {
    pub fn from_suggestion(suggestion: &SuggestionResult) -> Self {
        match suggestion.kind {
            SuggestionKind::Category => SearchCommit::Category(suggestion.title.to_lowercase()),
            SuggestionKind::Product => SearchCommit::Search(suggestion.title.clone()),
        }
    }

    /// Route to navigate to.
    pub fn path(&self) -> String {
        match self {
            SearchCommit::Search(term) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", term)
                    .finish();
                format!("/search?{}", query)
            }
            SearchCommit::Category(slug) => {
                let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
                format!("/category/{}", encoded.replace('+', "%20"))
            }
        }
    }
}

/// Highlighted row in the dropdown. `None` means the raw term is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<usize>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selection as an index in `[-1, len - 1]`.
    pub fn index(&self) -> isize {
        self.selected.map(|i| i as isize).unwrap_or(-1)
    }

    /// Move down one row, stopping at the last suggestion.
    pub fn move_down(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some((i + 1).min(len - 1)),
        };
    }

    /// Move up one row; moving up from the first row returns to the raw term.
    pub fn move_up(&mut self, len: usize) {
        self.sync(len);
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Back to the raw term. Call on every keystroke in the search box.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Pull the selection back inside a list of `len` suggestions.
    ///
    /// A shrunken list moves the highlight to its last row; an empty list
    /// returns to the raw term.
    pub fn sync(&mut self, len: usize) {
        self.selected = match self.selected {
            Some(_) if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
    }

    /// Apply a key. Only `Enter` can produce a commit.
    ///
    /// The selection is first clamped to `suggestions`. Enter commits the
    /// selected suggestion when one is highlighted, otherwise the raw term.
    /// A blank raw term commits nothing.
    pub fn handle(
        &mut self,
        key: NavKey,
        suggestions: &[SuggestionResult],
        raw_term: &str,
    ) -> Option<SearchCommit> {
        self.sync(suggestions.len());
        match key {
            NavKey::ArrowDown => {
                self.move_down(suggestions.len());
                None
            }
            NavKey::ArrowUp => {
                self.move_up(suggestions.len());
                None
            }
            NavKey::Enter => {
                if let Some(suggestion) = self.selected.and_then(|i| suggestions.get(i)) {
                    return Some(SearchCommit::from_suggestion(suggestion));
                }
                if raw_term.trim().is_empty() {
                    None
                } else {
                    Some(SearchCommit::Search(raw_term.to_string()))
                }
            }
        }
    }
}
