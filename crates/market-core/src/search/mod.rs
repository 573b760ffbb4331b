//! Search module.
//!
//! Contains the filter state and its URL codec, the product matcher, the
//! pagination window and the view that ties them together.

mod controller;
mod filter;
mod matcher;
mod query;
mod results;
mod state;
mod view;

pub use controller::{FilterController, History, MemoryHistory};
pub use filter::Predicate;
pub use matcher::{match_products, sort_products};
pub use query::{parse, parse_term, serialize, to_query_string, Criteria, SortKey};
pub use results::{window, PaginationWindow, DEFAULT_PAGE_SIZE};
pub use state::{FilterState, FilterValue, PriceRange, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
pub use view::{ListingSnapshot, ListingView};
