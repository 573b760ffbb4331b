//! End-to-end: address bar query to rendered listing.

use std::io::Write as _;

use market_core::prelude::*;

fn catalog() -> Vec<Product> {
    let json = r#"{
        "products": [
            { "id": 1, "title": "Rust Book", "price": 50, "category": "books",
              "condition": "used-good", "location": "Chicago, IL", "postedDate": "2023-01-01" },
            { "id": 2, "title": "Laptop", "price": 500, "category": "electronics",
              "condition": "new", "location": "Austin, TX", "postedDate": "2023-06-01" },
            { "id": 3, "title": "Monitor", "price": 300, "category": "electronics",
              "condition": "used-like-new", "location": "Chicago, IL", "postedDate": "2023-03-01" },
            { "id": 4, "title": "", "price": 10 },
            { "id": 5, "title": "MacBook Pro", "price": 1499.99, "category": "electronics" }
        ]
    }"#;
    parse_catalog(json).unwrap()
}

#[test]
fn test_url_drives_the_listing() {
    let mut controller = FilterController::mount(MemoryHistory::new(
        "?category=electronics,books&minPrice=100&maxPrice=500&sortBy=price-high",
    ));

    let mut view = ListingView::new(&ListingConfig::default());
    view.set_products(catalog());
    view.apply(controller.criteria().clone());

    let titles: Vec<&str> = view.snapshot().items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Laptop", "Monitor"]);

    controller.set_sort(SortKey::PriceLow);
    controller.set_location("chicago");
    assert!(view.apply(controller.criteria().clone()));

    let snapshot = view.snapshot();
    assert_eq!(snapshot.total, 1);
    assert_eq!(snapshot.items[0].title, "Monitor");
    assert_eq!(
        controller.history().current(),
        "category=books%2Celectronics&minPrice=100&maxPrice=500&location=chicago&sortBy=price-low"
    );
}

#[test]
fn test_invalid_entries_are_skipped_at_the_boundary() {
    let products = catalog();
    assert_eq!(products.len(), 4);
    assert!(products.iter().all(|p| !p.title.is_empty()));
}

#[tokio::test]
async fn test_json_file_source_feeds_the_view() {
    let dir = std::env::temp_dir().join(format!("market-core-flow-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("products.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"[{{"id": "a", "title": "Desk", "price": 120}}, {{"id": "b", "title": "Chair", "price": 80}}]"#
    )
    .unwrap();

    let mut view = ListingView::new(&ListingConfig::default());
    view.load_from(&JsonFileSource::new(&path)).await;
    view.apply(Criteria::parse("sortBy=price-low"));

    let snapshot = view.snapshot();
    assert_eq!(snapshot.total, 2);
    assert_eq!(snapshot.items[0].title, "Chair");
    assert_eq!(snapshot.summary, "Showing 2 of 2 products");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_missing_file_surfaces_as_view_error() {
    let mut view = ListingView::new(&ListingConfig::default());
    view.load_from(&JsonFileSource::new("/definitely/not/here.json")).await;

    let snapshot = view.snapshot();
    assert!(snapshot.error.is_some());
    assert_eq!(snapshot.total, 0);
    assert!(!snapshot.loading);
}
