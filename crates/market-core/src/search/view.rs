//! Listing view: the state the listing page renders from.

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Product, ProductSource};
use crate::config::ListingConfig;
use crate::search::{match_products, Criteria, PaginationWindow};

/// Products, criteria, matched list and pagination for one listing page.
///
/// The matched list is recomputed whenever the products or the criteria
/// change. The pagination window resets only when the criteria change; new
/// products under the same criteria keep the revealed count.
#[derive(Debug, Clone)]
pub struct ListingView {
    products: Vec<Product>,
    criteria: Criteria,
    matched: Vec<Product>,
    window: PaginationWindow,
    loading: bool,
    error: Option<String>,
}

/// Render-ready view of a listing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot<'a> {
    pub items: &'a [Product],
    pub shown: usize,
    pub total: usize,
    pub has_more: bool,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub summary: String,
}

impl ListingView {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            products: Vec::new(),
            criteria: Criteria::default(),
            matched: Vec::new(),
            window: PaginationWindow::new(config.page_size),
            loading: false,
            error: None,
        }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Matched products in display order, before windowing.
    pub fn matched(&self) -> &[Product] {
        &self.matched
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the product list and re-match under the current criteria.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
        self.error = None;
        self.rematch();
    }

    /// Record a fetch failure. The last good product list stays in place.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Fetch from `source`, recording either the products or the error.
    pub async fn load_from(&mut self, source: &dyn ProductSource) {
        self.set_loading(true);
        match source.fetch().await {
            Ok(products) => {
                debug!(
                    source = source.source_name(),
                    count = products.len(),
                    "loaded listing products"
                );
                self.set_products(products);
            }
            Err(e) => {
                warn!(source = source.source_name(), error = %e, "failed to load products");
                self.set_error(e.to_string());
            }
        }
    }

    /// Switch to new criteria. Returns `false` when nothing changed, in
    /// which case the matched list and window are left alone.
    pub fn apply(&mut self, criteria: Criteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.window.reset();
        self.rematch();
        true
    }

    /// Reveal the next page. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        self.window.load_more(self.matched.len())
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    pub fn snapshot(&self) -> ListingSnapshot<'_> {
        let total = self.matched.len();
        ListingSnapshot {
            items: self.window.window(&self.matched),
            shown: self.window.shown(total),
            total,
            has_more: self.window.has_more(total),
            loading: self.loading,
            error: self.error.as_deref(),
            summary: self.window.summary(total),
        }
    }

    fn rematch(&mut self) {
        self.matched = match_products(
            &self.products,
            &self.criteria.filters,
            self.criteria.term(),
        );
        debug!(
            total = self.products.len(),
            matched = self.matched.len(),
            "re-matched listing"
        );
    }
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new(&ListingConfig::default())
    }
}
