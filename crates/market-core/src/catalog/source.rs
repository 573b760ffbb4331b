//! Product sources.
//!
//! A source is the boundary where untrusted listing data becomes
//! `Product` values. Bad entries are logged and skipped here so the matcher
//! only ever sees validated products.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::product::RawListing;
use crate::catalog::Product;
use crate::error::MarketError;

/// Supplies the product list for the listing page.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every product. No paging contract is imposed on the source.
    async fn fetch(&self) -> Result<Vec<Product>, MarketError>;

    /// Name used in logs.
    fn source_name(&self) -> &str;
}

/// Serves a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Product>, MarketError> {
        Ok(self.products.clone())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

/// Reads a JSON catalog file.
///
/// The file holds either a bare array of listings or an object with a
/// `products` array.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Product>, MarketError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| MarketError::SourceIo {
                    path: self.name.clone(),
                    message: e.to_string(),
                })?;

        let products = parse_catalog(&content)?;
        info!(source = %self.name, count = products.len(), "loaded catalog");
        Ok(products)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<serde_json::Value>),
    Wrapped { products: Vec<serde_json::Value> },
}

/// Parse and validate a JSON catalog.
///
/// Fails only when the document itself is not a catalog; individual
/// entries that do not validate are skipped with a warning.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, MarketError> {
    let entries = match serde_json::from_str::<CatalogDocument>(json)? {
        CatalogDocument::List(entries) => entries,
        CatalogDocument::Wrapped { products } => products,
    };

    let mut products = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let validated = serde_json::from_value::<RawListing>(entry)
            .map_err(|e| MarketError::InvalidProduct {
                index,
                reason: e.to_string(),
            })
            .and_then(|raw| Product::from_raw(index, raw));

        match validated {
            Ok(product) => products.push(product),
            Err(e) => warn!(error = %e, "skipping catalog entry"),
        }
    }

    Ok(products)
}
