//! Product matcher: filter then order.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::search::{Criteria, FilterState, Predicate, SortKey};

/// Return the products that pass every active predicate, in the order the
/// filter state asks for.
///
/// Never fails: a product missing a field that an active predicate needs is
/// simply left out.
pub fn match_products(products: &[Product], state: &FilterState, term: Option<&str>) -> Vec<Product> {
    let criteria = Criteria::new(state.clone(), term.map(str::to_string));
    let predicates = Predicate::from_criteria(&criteria);

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|p| predicates.iter().all(|pred| pred.matches(p)))
        .cloned()
        .collect();

    sort_products(&mut matched, state.sort_by());
    matched
}

/// Stable sort by the given key; ties keep their relative order.
///
/// `Newest` puts undated products after every dated one. `Popular` leaves
/// the source order untouched.
pub fn sort_products(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::Newest => products.sort_by(|a, b| match (&a.posted_at, &b.posted_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Popular => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Condition;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn prices(products: &[Product]) -> Vec<f64> {
        products.iter().map(|p| p.price).collect()
    }

    #[test]
    fn test_category_filter_scenario() {
        let products = vec![
            Product::new("1", "Rust Book", 50.0)
                .with_category("books")
                .with_posted_at(ts("2023-01-01T00:00:00Z")),
            Product::new("2", "Laptop", 500.0)
                .with_category("electronics")
                .with_posted_at(ts("2023-06-01T00:00:00Z")),
        ];
        let state = FilterState::new().toggle_category("books").set_price_range(0, 1000);

        let matched = match_products(&products, &state, None);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "1");
    }

    #[test]
    fn test_price_low_ordering() {
        let products = vec![
            Product::new("a", "A", 500.0),
            Product::new("b", "B", 50.0),
            Product::new("c", "C", 300.0),
        ];
        let state = FilterState::new().with_sort(SortKey::PriceLow);
        assert_eq!(prices(&match_products(&products, &state, None)), vec![50.0, 300.0, 500.0]);

        let state = state.with_sort(SortKey::PriceHigh);
        assert_eq!(prices(&match_products(&products, &state, None)), vec![500.0, 300.0, 50.0]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let products = vec![
            Product::new("first", "A", 10.0),
            Product::new("second", "B", 10.0),
            Product::new("third", "C", 5.0),
        ];
        let state = FilterState::new().with_sort(SortKey::PriceLow);
        let ids: Vec<String> = match_products(&products, &state, None)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_newest_puts_undated_last() {
        let products = vec![
            Product::new("undated", "A", 1.0),
            Product::new("old", "B", 1.0).with_posted_at(ts("2023-01-01T00:00:00Z")),
            Product::new("new", "C", 1.0).with_posted_at(ts("2023-11-20T10:00:00Z")),
        ];
        let ids: Vec<String> = match_products(&products, &FilterState::new(), None)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_popular_keeps_source_order() {
        let products = vec![
            Product::new("x", "X", 300.0),
            Product::new("y", "Y", 100.0),
            Product::new("z", "Z", 200.0),
        ];
        let state = FilterState::new().with_sort(SortKey::Popular);
        assert_eq!(prices(&match_products(&products, &state, None)), vec![300.0, 100.0, 200.0]);
    }

    #[test]
    fn test_every_dimension_is_anded() {
        let products = vec![
            Product::new("1", "Phone", 200.0)
                .with_category("electronics")
                .with_condition(Condition::UsedGood)
                .with_location("Chicago, IL"),
            Product::new("2", "Phone", 200.0)
                .with_category("electronics")
                .with_condition(Condition::New)
                .with_location("Chicago, IL"),
            Product::new("3", "Phone", 200.0)
                .with_category("electronics")
                .with_condition(Condition::UsedGood)
                .with_location("Houston, TX"),
        ];
        let state = FilterState::new()
            .toggle_category("electronics")
            .toggle_condition(Condition::UsedGood)
            .with_location("chicago");

        let matched = match_products(&products, &state, Some("phone"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "1");
    }

    #[test]
    fn test_categories_never_leak() {
        let products: Vec<Product> = ["books", "sports", "books", "other"]
            .iter()
            .enumerate()
            .map(|(i, c)| Product::new(i.to_string(), "Item", 10.0).with_category(*c))
            .chain(std::iter::once(Product::new("uncategorized", "Item", 10.0)))
            .collect();
        let state = FilterState::new().toggle_category("books").toggle_category("other");

        for product in match_products(&products, &state, None) {
            let category = product.category.expect("matched product has a category");
            assert!(state.categories().contains(&category));
        }
    }

    #[test]
    fn test_default_price_range_excludes_expensive_items() {
        let products = vec![Product::new("1", "MacBook Pro", 1499.99)];
        assert!(match_products(&products, &FilterState::new(), None).is_empty());
    }
}
