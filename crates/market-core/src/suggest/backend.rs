//! Suggestion results, generators and backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Upper bound on suggestions returned for one term.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Whether a suggestion completes to a search or to a category page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Product,
    Category,
}

/// One entry in the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SuggestionResult {
    /// A product-style completion shown under a category label.
    pub fn product(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Product,
            title: title.into(),
            category: Some(category.into()),
        }
    }

    /// A category-style completion.
    pub fn category(title: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Category,
            title: title.into(),
            category: None,
        }
    }
}

/// Synthesizes at most one suggestion from a non-empty term.
pub trait SuggestionGenerator: Send + Sync {
    fn generate(&self, term: &str) -> Option<SuggestionResult>;
}

/// `"{term} Pro Max"` under Electronics.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualifierGenerator;

impl SuggestionGenerator for QualifierGenerator {
    fn generate(&self, term: &str) -> Option<SuggestionResult> {
        Some(SuggestionResult::product(format!("{} Pro Max", term), "Electronics"))
    }
}

/// `"Used {term}"` under Electronics.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedPrefixGenerator;

impl SuggestionGenerator for UsedPrefixGenerator {
    fn generate(&self, term: &str) -> Option<SuggestionResult> {
        Some(SuggestionResult::product(format!("Used {}", term), "Electronics"))
    }
}

/// `"{term} Accessories"` as a category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryGenerator;

impl SuggestionGenerator for CategoryGenerator {
    fn generate(&self, term: &str) -> Option<SuggestionResult> {
        Some(SuggestionResult::category(format!("{} Accessories", term)))
    }
}

/// Supplies completions for a term.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn suggest(&self, term: &str) -> Result<Vec<SuggestionResult>, MarketError>;
}

/// Backend that runs a list of generators in order and keeps the first
/// `limit` results.
pub struct SynthesizedBackend {
    generators: Vec<Box<dyn SuggestionGenerator>>,
    limit: usize,
}

impl SynthesizedBackend {
    /// An empty backend. A zero limit is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            generators: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Qualifier, used-prefix and category generators, capped at three.
    pub fn reference() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
            .with_generator(QualifierGenerator)
            .with_generator(UsedPrefixGenerator)
            .with_generator(CategoryGenerator)
    }

    pub fn with_generator(mut self, generator: impl SuggestionGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Synchronous form of [`SuggestionBackend::suggest`].
    pub fn suggest_now(&self, term: &str) -> Vec<SuggestionResult> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }
        self.generators
            .iter()
            .filter_map(|g| g.generate(term))
            .take(self.limit)
            .collect()
    }
}

impl Default for SynthesizedBackend {
    fn default() -> Self {
        Self::reference()
    }
}

#[async_trait]
impl SuggestionBackend for SynthesizedBackend {
    async fn suggest(&self, term: &str) -> Result<Vec<SuggestionResult>, MarketError> {
        Ok(self.suggest_now(term))
    }
}

/// Suggestions from the reference generators.
pub fn suggest(term: &str) -> Vec<SuggestionResult> {
    SynthesizedBackend::reference().suggest_now(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl SuggestionGenerator for Nothing {
        fn generate(&self, _term: &str) -> Option<SuggestionResult> {
            None
        }
    }

    #[test]
    fn test_reference_suggestions() {
        let results = suggest("iPhone");
        assert_eq!(
            results,
            vec![
                SuggestionResult::product("iPhone Pro Max", "Electronics"),
                SuggestionResult::product("Used iPhone", "Electronics"),
                SuggestionResult::category("iPhone Accessories"),
            ]
        );
    }

    #[test]
    fn test_empty_term_has_no_suggestions() {
        assert!(suggest("").is_empty());
        assert!(suggest("   ").is_empty());
    }

    #[test]
    fn test_limit_caps_results() {
        let backend = SynthesizedBackend::reference()
            .with_generator(CategoryGenerator)
            .with_generator(CategoryGenerator);
        assert_eq!(backend.suggest_now("desk").len(), 3);

        let backend = SynthesizedBackend::reference().with_limit(1);
        assert_eq!(backend.suggest_now("desk")[0].title, "desk Pro Max");
    }

    #[test]
    fn test_generators_may_decline() {
        let backend = SynthesizedBackend::new(3)
            .with_generator(Nothing)
            .with_generator(UsedPrefixGenerator);
        let results = backend.suggest_now("bike");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Used bike");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SuggestionResult::category("lamp Accessories")).unwrap();
        assert_eq!(json["type"], "category");
        assert!(json.get("category").is_none());
    }

    #[tokio::test]
    async fn test_backend_trait() {
        let backend = SynthesizedBackend::default();
        let results = backend.suggest("chair").await.unwrap();
        assert_eq!(results.len(), 3);
    }
}
