//! Listing search logic for the marketplace front-end.
//!
//! This crate holds everything between the product source and the render
//! layer of the listing page:
//!
//! - **Catalog**: the `Product` schema, condition tags, product sources
//! - **Search**: filter state, URL query codec, matcher, pagination window
//! - **Suggest**: debounced search suggestions and keyboard selection
//!
//! # Example
//!
//! ```rust,ignore
//! use market_core::prelude::*;
//!
//! let criteria = Criteria::parse("?category=books&sortBy=price-low");
//! let mut view = ListingView::new(&ListingConfig::default());
//! view.set_products(products);
//! view.apply(criteria);
//!
//! let snapshot = view.snapshot();
//! println!("Showing {} of {} products", snapshot.shown, snapshot.total);
//! ```

pub mod config;
pub mod error;
pub mod ids;

pub mod catalog;
pub mod search;
pub mod suggest;

pub use config::ListingConfig;
pub use error::MarketError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ListingConfig;
    pub use crate::error::MarketError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        parse_catalog, Condition, JsonFileSource, Product, ProductSource, SellerSummary,
        StaticSource,
    };

    // Search
    pub use crate::search::{
        match_products, Criteria, FilterController, FilterState, FilterValue, History,
        ListingSnapshot, ListingView, MemoryHistory, PaginationWindow, PriceRange, SortKey,
    };

    // Suggest
    pub use crate::suggest::{
        NavKey, SearchCommit, SelectionCursor, SuggestionBackend, SuggestionEngine,
        SuggestionKind, SuggestionResult, SuggestionState, SynthesizedBackend,
    };
}
