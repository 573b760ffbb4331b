//! Listing predicates.

use std::collections::BTreeSet;

use crate::catalog::{Condition, Product};
use crate::ids::CategoryId;
use crate::search::{Criteria, PriceRange};

/// A test a product must pass to stay in the results.
///
/// Set-valued predicates are OR within the set; a product passes the whole
/// criteria only if it passes every predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Product category is one of the selected ids.
    Categories(BTreeSet<CategoryId>),
    /// Price within the inclusive range.
    PriceRange(PriceRange),
    /// Product condition is one of the selected tags.
    Conditions(BTreeSet<Condition>),
    /// Location contains this lowercase needle.
    Location(String),
    /// Title or description contains this lowercase needle.
    Text(String),
}

impl Predicate {
    /// Build the active predicates for a set of criteria.
    ///
    /// Empty selections produce no predicate at all. Price always applies,
    /// including the default `0..=1000` range, so a product priced above
    /// 1000 stays hidden until the upper bound is raised.
    pub fn from_criteria(criteria: &Criteria) -> Vec<Predicate> {
        let filters = &criteria.filters;
        let mut predicates = Vec::new();

        if !filters.categories().is_empty() {
            predicates.push(Predicate::Categories(filters.categories().clone()));
        }

        predicates.push(Predicate::PriceRange(filters.price_range()));

        if !filters.conditions().is_empty() {
            predicates.push(Predicate::Conditions(filters.conditions().clone()));
        }

        let location = filters.location().trim();
        if !location.is_empty() {
            predicates.push(Predicate::Location(location.to_lowercase()));
        }

        if let Some(term) = criteria.term() {
            predicates.push(Predicate::Text(term.trim().to_lowercase()));
        }

        predicates
    }

    /// Check a single product. A field the predicate needs but the product
    /// lacks counts as a failed match.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Predicate::Categories(ids) => product
                .category
                .as_ref()
                .map(|c| ids.contains(c))
                .unwrap_or(false),
            Predicate::PriceRange(range) => range.contains(product.price),
            Predicate::Conditions(tags) => product
                .condition
                .map(|c| tags.contains(&c))
                .unwrap_or(false),
            Predicate::Location(needle) => product
                .location
                .as_ref()
                .map(|l| l.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false),
            Predicate::Text(needle) => {
                product.title.to_lowercase().contains(needle.as_str())
                    || product
                        .description
                        .as_ref()
                        .map(|d| d.to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::FilterState;

    #[test]
    fn test_default_criteria_only_checks_price() {
        let predicates = Predicate::from_criteria(&Criteria::default());
        assert_eq!(
            predicates,
            vec![Predicate::PriceRange(PriceRange::default())]
        );
    }

    #[test]
    fn test_missing_category_fails() {
        let criteria = Criteria::new(FilterState::new().toggle_category("books"), None);
        let predicates = Predicate::from_criteria(&criteria);
        let product = Product::new("1", "Novel", 5.0);
        assert!(!predicates[0].matches(&product));
        assert!(predicates[0].matches(&product.with_category("books")));
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let predicate = Predicate::Location("york".to_string());
        assert!(predicate.matches(&Product::new("1", "Desk", 1.0).with_location("New York, NY")));
        assert!(!predicate.matches(&Product::new("2", "Desk", 1.0).with_location("Chicago, IL")));
        assert!(!predicate.matches(&Product::new("3", "Desk", 1.0)));
    }

    #[test]
    fn test_text_checks_title_and_description() {
        let predicate = Predicate::Text("m1 pro".to_string());
        let laptop = Product::new("1", "MacBook Pro 16\"", 1499.99)
            .with_description("2021 Model, M1 Pro chip");
        assert!(predicate.matches(&laptop));
        assert!(!predicate.matches(&Product::new("2", "MacBook Air", 800.0)));
    }

    #[test]
    fn test_missing_condition_fails() {
        let tags: BTreeSet<Condition> = [Condition::New].into_iter().collect();
        let predicate = Predicate::Conditions(tags);
        assert!(!predicate.matches(&Product::new("1", "Bike", 100.0)));
        assert!(predicate.matches(&Product::new("2", "Bike", 100.0).with_condition(Condition::New)));
    }
}
