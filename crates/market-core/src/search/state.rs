//! Filter state model.
//!
//! `FilterState` is persistent data: every update method takes `&self` and
//! returns a new state, leaving the caller's previous value untouched.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Condition;
use crate::ids::CategoryId;
use crate::search::SortKey;

/// Lower bound of the default price range.
pub const DEFAULT_MIN_PRICE: u64 = 0;
/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: u64 = 1000;

/// Inclusive price range. Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    /// Build a range from possibly out-of-order or negative bounds.
    ///
    /// Negative bounds become 0; a min above the max is pulled down to it.
    pub fn clamped(min: i64, max: i64) -> Self {
        let max = max.max(0) as u64;
        let min = (min.max(0) as u64).min(max);
        Self { min, max }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Check whether a price falls inside the range.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min as f64 && price <= self.max as f64
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// A value of one of the set-valued filter dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Category(CategoryId),
    Condition(Condition),
}

impl From<CategoryId> for FilterValue {
    fn from(id: CategoryId) -> Self {
        FilterValue::Category(id)
    }
}

impl From<Condition> for FilterValue {
    fn from(condition: Condition) -> Self {
        FilterValue::Condition(condition)
    }
}

/// Trimmed id, or `None` when it would not survive the comma-list encoding.
fn normalize_category(id: &CategoryId) -> Option<CategoryId> {
    let trimmed = id.as_str().trim();
    if trimmed.is_empty() || trimmed.contains(',') {
        return None;
    }
    if trimmed.len() == id.as_str().len() {
        Some(id.clone())
    } else {
        Some(CategoryId::new(trimmed))
    }
}

/// All active filter and sort selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    categories: BTreeSet<CategoryId>,
    price_range: PriceRange,
    conditions: BTreeSet<Condition>,
    location: String,
    sort_by: SortKey,
}

impl FilterState {
    /// The default state: nothing selected, price 0..=1000, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &BTreeSet<CategoryId> {
        &self.categories
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    pub fn conditions(&self) -> &BTreeSet<Condition> {
        &self.conditions
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    /// Add the value to its set if absent, remove it if present.
    ///
    /// Category ids are trimmed. An id that is blank or contains a comma
    /// cannot be written to the query string, so toggling it is a no-op.
    pub fn toggle(&self, value: impl Into<FilterValue>) -> Self {
        let mut next = self.clone();
        match value.into() {
            FilterValue::Category(id) => {
                let Some(id) = normalize_category(&id) else {
                    debug!(category = %id, "ignoring unusable category id");
                    return next;
                };
                if !next.categories.remove(&id) {
                    next.categories.insert(id);
                }
            }
            FilterValue::Condition(condition) => {
                if !next.conditions.remove(&condition) {
                    next.conditions.insert(condition);
                }
            }
        }
        next
    }

    pub fn toggle_category(&self, id: impl Into<CategoryId>) -> Self {
        self.toggle(FilterValue::Category(id.into()))
    }

    pub fn toggle_condition(&self, condition: Condition) -> Self {
        self.toggle(FilterValue::Condition(condition))
    }

    /// Replace both price bounds, clamping so that `0 <= min <= max`.
    pub fn set_price_range(&self, min: i64, max: i64) -> Self {
        Self {
            price_range: PriceRange::clamped(min, max),
            ..self.clone()
        }
    }

    /// Move the lower bound; a value above the current max clamps to it.
    pub fn set_min_price(&self, min: i64) -> Self {
        let max = self.price_range.max;
        let min = (min.max(0) as u64).min(max);
        Self {
            price_range: PriceRange { min, max },
            ..self.clone()
        }
    }

    /// Move the upper bound; a value below the current min clamps to it.
    pub fn set_max_price(&self, max: i64) -> Self {
        let min = self.price_range.min;
        let max = (max.max(0) as u64).max(min);
        Self {
            price_range: PriceRange { min, max },
            ..self.clone()
        }
    }

    pub fn with_location(&self, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort_by: SortKey) -> Self {
        Self {
            sort_by,
            ..self.clone()
        }
    }

    /// Clear every filter and the sort order.
    pub fn reset() -> Self {
        Self::default()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Badge count for the filter panel header.
    ///
    /// Each selected category and condition counts once, a location counts
    /// once, and a non-default price range counts once. Sorting is not a
    /// filter.
    pub fn active_filter_count(&self) -> usize {
        let mut count = self.categories.len() + self.conditions.len();
        if !self.location.is_empty() {
            count += 1;
        }
        if !self.price_range.is_default() {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let state = FilterState::new();
        let with_books = state.toggle_category("books");
        assert!(with_books.categories().contains(&CategoryId::new("books")));
        assert!(state.categories().is_empty(), "previous state must not change");

        let without = with_books.toggle_category("books");
        assert!(without.categories().is_empty());
    }

    #[test]
    fn test_toggle_normalizes_category_ids() {
        let state = FilterState::new().toggle_category(" books ");
        let ids: Vec<&str> = state.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(ids, vec!["books"]);

        assert!(state.toggle_category("books").categories().is_empty());
        assert!(FilterState::new().toggle_category("").categories().is_empty());
        assert!(FilterState::new().toggle_category("   ").categories().is_empty());
        assert!(FilterState::new().toggle_category("a,b").categories().is_empty());
    }

    #[test]
    fn test_toggle_condition() {
        let state = FilterState::new()
            .toggle_condition(Condition::New)
            .toggle_condition(Condition::UsedGood)
            .toggle_condition(Condition::New);
        assert_eq!(state.conditions().len(), 1);
        assert!(state.conditions().contains(&Condition::UsedGood));
    }

    #[test]
    fn test_price_range_invariant_holds_for_any_input() {
        let inputs = [
            (0, 1000),
            (500, 100),
            (-20, 50),
            (-5, -1),
            (300, 300),
            (i64::MAX, 10),
        ];
        for (min, max) in inputs {
            let range = FilterState::new().set_price_range(min, max).price_range();
            assert!(range.min() <= range.max(), "{:?} from ({}, {})", range, min, max);
        }
    }

    #[test]
    fn test_set_price_range_clamps_min_to_max() {
        let range = FilterState::new().set_price_range(500, 100).price_range();
        assert_eq!((range.min(), range.max()), (100, 100));
    }

    #[test]
    fn test_one_sided_updates_clamp() {
        let state = FilterState::new().set_price_range(100, 400);

        let high_min = state.set_min_price(900).price_range();
        assert_eq!((high_min.min(), high_min.max()), (400, 400));

        let low_max = state.set_max_price(50).price_range();
        assert_eq!((low_max.min(), low_max.max()), (100, 100));

        let negative = state.set_min_price(-10).price_range();
        assert_eq!(negative.min(), 0);
    }

    #[test]
    fn test_active_filter_count() {
        let state = FilterState::new()
            .toggle_category("books")
            .toggle_category("sports")
            .toggle_condition(Condition::New)
            .with_location("Chicago")
            .set_price_range(10, 1000)
            .with_sort(SortKey::PriceHigh);
        assert_eq!(state.active_filter_count(), 5);
        assert_eq!(FilterState::reset().active_filter_count(), 0);
    }

    #[test]
    fn test_price_contains_is_inclusive() {
        let range = PriceRange::clamped(50, 100);
        assert!(range.contains(50.0));
        assert!(range.contains(100.0));
        assert!(!range.contains(100.01));
    }
}
