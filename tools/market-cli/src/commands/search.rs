//! Listing search command.

use anyhow::{bail, Result};
use market_core::prelude::*;

use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let path = ctx.products_path(args.products.as_deref())?;

    let mut listing = ctx.config.listing.clone();
    if let Some(page_size) = args.page_size {
        listing.page_size = page_size;
    }
    listing.validate()?;

    let criteria = Criteria::parse(&args.query);
    ctx.output.debug(&format!("Criteria: {}", criteria.to_query_string()));

    let source = JsonFileSource::new(&path);
    let spinner = ctx.output.spinner(&format!("Loading {}", path.display()));
    let mut view = ListingView::new(&listing);
    view.load_from(&source).await;
    spinner.finish_and_clear();

    if let Some(error) = view.error() {
        bail!("{}", error);
    }

    view.apply(criteria);
    for _ in 0..args.more {
        if !view.load_more() {
            break;
        }
    }

    let snapshot = view.snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return Ok(());
    }

    ctx.output.header("Listing");
    let active = view.criteria().filters.active_filter_count();
    if active > 0 {
        ctx.output.kv("active filters", &active.to_string());
    }
    ctx.output.kv("sort", view.criteria().filters.sort_by().label());
    if let Some(term) = view.criteria().term() {
        ctx.output.kv("search", term);
    }

    if snapshot.items.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    ctx.output.info("");
    ctx.output
        .table_row(&["TITLE", "PRICE", "COND.", "LOCATION", "POSTED"], &[32, 18, 8, 20, 12]);
    for product in snapshot.items {
        ctx.output.product_row(product);
    }

    ctx.output.info("");
    ctx.output.info(&snapshot.summary);
    if snapshot.has_more {
        ctx.output.info("Use --more to load more products.");
    }

    Ok(())
}
