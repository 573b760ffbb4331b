//! Product listing schema.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Condition;
use crate::error::MarketError;
use crate::ids::{CategoryId, ProductId, SubcategoryId};

/// Seller summary shown on a listing card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SellerSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A listed product.
///
/// Products are only built through the source boundary (or the builder
/// methods below), so `id`, `title` and a finite non-negative `price` are
/// always present. Everything a filter predicate may look at is optional;
/// the matcher treats a missing value as a failed predicate.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<SubcategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "postedDate", skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerSummary>,
    pub is_featured: bool,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            price,
            original_price: None,
            category: None,
            subcategory: None,
            condition: None,
            location: None,
            posted_at: None,
            images: Vec::new(),
            features: Vec::new(),
            seller: None,
            is_featured: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = Some(posted_at);
        self
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Rounded percentage saved against the original price, if any.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= self.price || original <= 0.0 {
            return None;
        }
        Some((((original - self.price) / original) * 100.0).round() as u32)
    }

    /// Validate a raw catalog entry.
    pub(crate) fn from_raw(index: usize, raw: RawListing) -> Result<Self, MarketError> {
        let invalid = |reason: &str| MarketError::InvalidProduct {
            index,
            reason: reason.to_string(),
        };

        let id = match raw.id {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => ProductId::new(s),
            Some(serde_json::Value::Number(n)) => ProductId::new(n.to_string()),
            _ => return Err(invalid("missing id")),
        };

        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| invalid("missing title"))?;

        let price = raw.price.ok_or_else(|| invalid("missing price"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(invalid("price must be a finite non-negative number"));
        }

        let condition = raw.condition.as_deref().and_then(|tag| {
            let parsed = Condition::from_str(tag);
            if parsed.is_none() {
                debug!(product = %id, tag, "unknown condition tag");
            }
            parsed
        });

        let posted_at = raw.posted_date.as_deref().and_then(|ts| {
            let parsed = parse_timestamp(ts);
            if parsed.is_none() {
                debug!(product = %id, timestamp = ts, "unparseable posted date");
            }
            parsed
        });

        Ok(Self {
            id,
            title,
            description: raw.description,
            price,
            original_price: raw.original_price.filter(|p| p.is_finite()),
            category: non_empty(raw.category).map(CategoryId::new),
            subcategory: non_empty(raw.subcategory).map(SubcategoryId::new),
            condition,
            location: non_empty(raw.location),
            posted_at,
            images: raw.images,
            features: raw.features,
            seller: raw.seller.and_then(|s| {
                s.name.map(|name| SellerSummary {
                    name,
                    rating: s.rating,
                })
            }),
            is_featured: raw.is_featured,
        })
    }
}

/// Untrusted catalog entry as it arrives from a product source.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawListing {
    pub id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub posted_date: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub seller: Option<RawSeller>,
    pub is_featured: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSeller {
    pub name: Option<String>,
    pub rating: Option<f64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawListing {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numeric_id_and_full_listing() {
        let product = Product::from_raw(
            0,
            raw(r#"{
                "id": 1,
                "title": "iPhone 12 Pro Max",
                "description": "Excellent condition, barely used",
                "price": 699.99,
                "originalPrice": 999.99,
                "category": "electronics",
                "condition": "used-like-new",
                "location": "New York, NY",
                "postedDate": "2023-11-20T10:00:00Z",
                "seller": {"name": "John Doe", "rating": 4.8},
                "features": ["5G", "256GB"],
                "isFeatured": true
            }"#),
        )
        .unwrap();

        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.category.as_ref().unwrap().as_str(), "electronics");
        assert_eq!(product.condition, Some(Condition::UsedLikeNew));
        assert_eq!(product.seller.as_ref().unwrap().name, "John Doe");
        assert!(product.is_featured);
        assert_eq!(product.discount_percent(), Some(30));
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = Product::from_raw(3, raw(r#"{"id": "a", "price": 5}"#)).unwrap_err();
        assert!(matches!(err, MarketError::InvalidProduct { index: 3, .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Product::from_raw(0, raw(r#"{"id": "a", "title": "x", "price": -1}"#));
        assert!(err.is_err());
    }

    #[test]
    fn test_optional_fields_degrade_to_none() {
        let product = Product::from_raw(
            0,
            raw(r#"{"id": "a", "title": "Lamp", "price": 10,
                    "condition": "for-parts", "postedDate": "yesterday", "location": ""}"#),
        )
        .unwrap();
        assert_eq!(product.condition, None);
        assert_eq!(product.posted_at, None);
        assert_eq!(product.location, None);
    }

    #[test]
    fn test_date_only_timestamp() {
        let ts = parse_timestamp("2023-01-01").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_no_discount_when_not_cheaper() {
        let product = Product::new("p", "Chair", 50.0).with_original_price(40.0);
        assert_eq!(product.discount_percent(), None);
    }
}
