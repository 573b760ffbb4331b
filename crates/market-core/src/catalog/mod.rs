//! Listing catalog module.
//!
//! Contains the product schema, condition tags, and the product sources
//! that validate raw listings before they reach the matcher.

mod condition;
mod product;
mod source;

pub use condition::Condition;
pub use product::{Product, SellerSummary};
pub use source::{parse_catalog, JsonFileSource, ProductSource, StaticSource};
