//! Filter editing command.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use market_core::prelude::*;

use super::FiltersArgs;
use crate::context::Context;

/// Run the filters command.
pub async fn run(args: FiltersArgs, ctx: &Context) -> Result<()> {
    let sort = match args.sort.as_deref() {
        Some(key) => match SortKey::from_str(key) {
            Some(sort) => Some(sort),
            None => bail!(
                "Unknown sort '{}'. Expected one of: {}",
                key,
                SortKey::ALL.map(|s| s.as_str()).join(", ")
            ),
        },
        None => None,
    };

    let mut conditions = Vec::with_capacity(args.condition.len());
    for tag in &args.condition {
        match Condition::from_str(tag) {
            Some(condition) => conditions.push(condition),
            None => bail!(
                "Unknown condition '{}'. Expected one of: {}",
                tag,
                Condition::ALL.map(|c| c.as_str()).join(", ")
            ),
        }
    }

    let updates = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&updates);
    let mut controller = FilterController::mount(MemoryHistory::new(args.query.as_str()))
        .with_listener(move |criteria| sink.borrow_mut().push(criteria.to_query_string()));
    ctx.output.debug(&format!("Mounted at ?{}", controller.history().current()));

    if let Some(term) = args.search {
        controller.submit_search(term);
    }
    if args.reset {
        controller.reset();
    }
    for category in &args.category {
        controller.toggle_category(category.as_str());
    }
    for condition in conditions {
        controller.toggle_condition(condition);
    }
    match (args.min, args.max) {
        (Some(min), Some(max)) => controller.set_price_range(min, max),
        (Some(min), None) => controller.set_min_price(min),
        (None, Some(max)) => controller.set_max_price(max),
        (None, None) => {}
    }
    if let Some(location) = args.location {
        controller.set_location(location);
    }
    if let Some(sort) = sort {
        controller.set_sort(sort);
    }
    if let Some(term) = args.term {
        controller.set_term(Some(term));
    }

    let state = controller.state().clone();
    let history = controller.into_history();
    let updates = updates.borrow();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "updates": *updates,
            "history": history.entries(),
            "filters": state,
            "activeFilters": state.active_filter_count(),
        }));
        return Ok(());
    }

    ctx.output.header("Address bar");
    if updates.is_empty() {
        ctx.output.info("No effective changes.");
    }
    for query in updates.iter() {
        ctx.output.list_item(&listing_url(query));
    }
    ctx.output.info(&format!(
        "History length {} (a submitted search pushes, filter edits replace)",
        history.len()
    ));

    ctx.output.header("Filters");
    let categories: Vec<&str> = state.categories().iter().map(|c| c.as_str()).collect();
    ctx.output.kv("categories", &display_list(&categories));
    let range = state.price_range();
    ctx.output.kv("price", &format!("${} - ${}", range.min(), range.max()));
    let conditions: Vec<&str> = state.conditions().iter().map(|c| c.label()).collect();
    ctx.output.kv("conditions", &display_list(&conditions));
    if !state.location().is_empty() {
        ctx.output.kv("location", state.location());
    }
    ctx.output.kv("sort", state.sort_by().label());

    ctx.output.success(&format!("{} active filter(s)", state.active_filter_count()));

    Ok(())
}

fn listing_url(query: &str) -> String {
    if query.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{}", query)
    }
}

fn display_list(items: &[&str]) -> String {
    if items.is_empty() {
        "any".to_string()
    } else {
        items.join(", ")
    }
}
