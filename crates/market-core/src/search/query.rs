//! URL query codec for the filter state.
//!
//! Recognized keys: `q`, `category`, `minPrice`, `maxPrice`, `condition`,
//! `location`, `sortBy`. Parsing never fails; anything malformed falls back
//! to the default for that field.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

use crate::catalog::Condition;
use crate::ids::CategoryId;
use crate::search::{FilterState, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};

/// Sort order for listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Most recently posted first.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Price, low to high.
    #[serde(rename = "price-low")]
    PriceLow,
    /// Price, high to low.
    #[serde(rename = "price-high")]
    PriceHigh,
    /// Source order. No popularity score exists yet.
    #[serde(rename = "popular")]
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Popular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Popular => "popular",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(SortKey::Newest),
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "popular" => Some(SortKey::Popular),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest First",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Popular => "Most Popular",
        }
    }
}

/// Filters plus the free-text term: everything that decides which
/// products are shown. Two criteria are the same listing iff they are equal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Criteria {
    pub filters: FilterState,
    pub term: Option<String>,
}

impl Criteria {
    pub fn new(filters: FilterState, term: Option<String>) -> Self {
        Self {
            filters,
            term: term.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Parse filters and the `q` term from a query string.
    pub fn parse(query: &str) -> Self {
        Self::new(parse(query), parse_term(query))
    }

    /// Active search term, if any.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn to_query_string(&self) -> String {
        to_query_string(&self.filters, self.term())
    }
}

/// First value for every key. Later duplicates are ignored.
fn pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut seen = HashSet::new();
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| seen.insert(key.to_string()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a filter state from a URL query string.
pub fn parse(query: &str) -> FilterState {
    let mut state = FilterState::new();
    let mut min_price = DEFAULT_MIN_PRICE as i64;
    let mut max_price = DEFAULT_MAX_PRICE as i64;

    for (key, value) in pairs(query) {
        match key.as_str() {
            "category" => {
                for id in split_list(&value) {
                    if !state.categories().contains(&CategoryId::new(id)) {
                        state = state.toggle_category(id);
                    }
                }
            }
            "minPrice" => match value.trim().parse::<i64>() {
                Ok(v) => min_price = v,
                Err(_) => debug!(value = %value, "ignoring malformed minPrice"),
            },
            "maxPrice" => match value.trim().parse::<i64>() {
                Ok(v) => max_price = v,
                Err(_) => debug!(value = %value, "ignoring malformed maxPrice"),
            },
            "condition" => {
                for tag in split_list(&value) {
                    match Condition::from_str(tag) {
                        Some(c) if !state.conditions().contains(&c) => {
                            state = state.toggle_condition(c);
                        }
                        Some(_) => {}
                        None => debug!(tag, "ignoring unknown condition"),
                    }
                }
            }
            "location" => state = state.with_location(value),
            "sortBy" => match SortKey::from_str(&value) {
                Some(sort) => state = state.with_sort(sort),
                None => debug!(value = %value, "ignoring unknown sortBy"),
            },
            _ => {}
        }
    }

    state.set_price_range(min_price, max_price)
}

/// Read the free-text search term (`q`).
pub fn parse_term(query: &str) -> Option<String> {
    pairs(query)
        .into_iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value)
        .filter(|v| !v.trim().is_empty())
}

/// Serialize a filter state, emitting only non-default values.
pub fn serialize(state: &FilterState) -> String {
    to_query_string(state, None)
}

/// Serialize a filter state and an optional search term.
pub fn to_query_string(state: &FilterState, term: Option<&str>) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if let Some(term) = term.filter(|t| !t.trim().is_empty()) {
        out.append_pair("q", term);
    }

    if !state.categories().is_empty() {
        let joined = state
            .categories()
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        out.append_pair("category", &joined);
    }

    let range = state.price_range();
    if !range.is_default() {
        out.append_pair("minPrice", &range.min().to_string());
        out.append_pair("maxPrice", &range.max().to_string());
    }

    if !state.conditions().is_empty() {
        let joined = state
            .conditions()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",");
        out.append_pair("condition", &joined);
    }

    if !state.location().is_empty() {
        out.append_pair("location", state.location());
    }

    if state.sort_by() != SortKey::default() {
        out.append_pair("sortBy", state.sort_by().as_str());
    }

    out.finish()
}
