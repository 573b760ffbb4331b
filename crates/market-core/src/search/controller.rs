//! Filter controller: owns the current criteria and mirrors every change to
//! the address bar.

use tracing::debug;

use crate::catalog::Condition;
use crate::ids::CategoryId;
use crate::search::{Criteria, FilterState, SortKey};

/// Browser history as seen by the listing page.
pub trait History {
    /// Query string of the current entry, without the leading `?`.
    fn current(&self) -> &str;

    /// Overwrite the current entry.
    fn replace(&mut self, query: &str);

    /// Append a new entry. Used for navigations such as submitting a
    /// search, never for filter edits.
    fn push(&mut self, query: &str);
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    /// Start with a single entry holding the initial query string.
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let initial = initial.strip_prefix('?').unwrap_or(&initial).to_string();
        Self {
            entries: vec![initial],
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or("")
    }

    fn replace(&mut self, query: &str) {
        match self.entries.last_mut() {
            Some(last) => *last = query.to_string(),
            None => self.entries.push(query.to_string()),
        }
    }

    fn push(&mut self, query: &str) {
        self.entries.push(query.to_string());
    }
}

type ChangeListener = Box<dyn FnMut(&Criteria)>;

#[derive(Debug, Clone, Copy)]
enum HistoryWrite {
    Replace,
    Push,
}

/// Holds the criteria for one listing page.
///
/// Every effective change is serialized and written with a history
/// *replace*, then reported to the change listener. Updates that leave the
/// criteria unchanged write nothing and notify no one.
pub struct FilterController<H: History> {
    criteria: Criteria,
    history: H,
    listener: Option<ChangeListener>,
}

impl<H: History> FilterController<H> {
    /// Initialize from the query string present in `history`.
    pub fn mount(history: H) -> Self {
        let criteria = Criteria::parse(history.current());
        debug!(query = history.current(), "mounted filter controller");
        Self {
            criteria,
            history,
            listener: None,
        }
    }

    /// Register the change notification.
    pub fn with_listener(mut self, listener: impl FnMut(&Criteria) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn state(&self) -> &FilterState {
        &self.criteria.filters
    }

    pub fn term(&self) -> Option<&str> {
        self.criteria.term()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_history(self) -> H {
        self.history
    }

    pub fn toggle_category(&mut self, id: impl Into<CategoryId>) {
        let next = self.state().toggle_category(id);
        self.apply(next);
    }

    pub fn toggle_condition(&mut self, condition: Condition) {
        let next = self.state().toggle_condition(condition);
        self.apply(next);
    }

    pub fn set_price_range(&mut self, min: i64, max: i64) {
        let next = self.state().set_price_range(min, max);
        self.apply(next);
    }

    pub fn set_min_price(&mut self, min: i64) {
        let next = self.state().set_min_price(min);
        self.apply(next);
    }

    pub fn set_max_price(&mut self, max: i64) {
        let next = self.state().set_max_price(max);
        self.apply(next);
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        let next = self.state().with_location(location);
        self.apply(next);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        let next = self.state().with_sort(sort);
        self.apply(next);
    }

    /// Clear all filters. The search term is kept.
    pub fn reset(&mut self) {
        self.apply(FilterState::reset());
    }

    /// Replace the whole filter state.
    pub fn apply(&mut self, filters: FilterState) {
        let next = Criteria::new(filters, self.criteria.term.clone());
        self.commit(next);
    }

    /// Change the free-text term.
    pub fn set_term(&mut self, term: Option<String>) {
        let next = Criteria::new(self.criteria.filters.clone(), term);
        self.commit(next);
    }

    /// Submit a new search from the search box.
    ///
    /// This is a navigation to a fresh results page: filters are cleared and
    /// a new history entry is *pushed*, so Back returns to the previous
    /// listing. A blank term submits nothing.
    pub fn submit_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term.trim().is_empty() {
            return;
        }
        let next = Criteria::new(FilterState::reset(), Some(term));
        self.write(next, HistoryWrite::Push);
    }

    fn commit(&mut self, next: Criteria) {
        self.write(next, HistoryWrite::Replace);
    }

    fn write(&mut self, next: Criteria, mode: HistoryWrite) {
        if next == self.criteria {
            return;
        }
        self.criteria = next;

        let query = self.criteria.to_query_string();
        match mode {
            HistoryWrite::Replace => {
                debug!(query = %query, "replacing history entry");
                self.history.replace(&query);
            }
            HistoryWrite::Push => {
                debug!(query = %query, "pushing history entry");
                self.history.push(&query);
            }
        }

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.criteria);
        }
    }
}
