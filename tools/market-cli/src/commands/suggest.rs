//! Search suggestion command.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use market_core::prelude::*;

use super::SuggestArgs;
use crate::context::Context;

/// Backend wrapper that remembers which terms were actually computed.
struct RecordingBackend {
    inner: SynthesizedBackend,
    computed: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn computed(&self) -> Vec<String> {
        self.computed
            .lock()
            .map(|terms| terms.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SuggestionBackend for RecordingBackend {
    async fn suggest(&self, term: &str) -> Result<Vec<SuggestionResult>, MarketError> {
        if let Ok(mut terms) = self.computed.lock() {
            terms.push(term.to_string());
        }
        self.inner.suggest(term).await
    }
}

/// Run the suggest command.
pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<()> {
    let listing = &ctx.config.listing;
    listing.validate()?;

    let backend = Arc::new(RecordingBackend {
        inner: SynthesizedBackend::reference().with_limit(listing.suggestion_limit),
        computed: Mutex::new(Vec::new()),
    });
    let mut engine =
        SuggestionEngine::new(backend.clone()).with_quiet_period(listing.debounce());

    let interval = Duration::from_millis(args.interval_ms);
    let total = args.keystrokes.len();
    for (i, keystroke) in args.keystrokes.iter().enumerate() {
        ctx.output.step(i + 1, total, &format!("typed {:?}", keystroke));
        engine.input(keystroke.as_str());
        tokio::time::sleep(interval).await;
    }

    let spinner = ctx.output.spinner("Waiting for suggestions");
    while engine.is_pending() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    spinner.finish_and_clear();

    let state = engine.current();
    let computed = backend.computed();
    let raw_term = args.keystrokes.last().map(String::as_str).unwrap_or("");

    let commit = args.down.and_then(|presses| {
        let mut cursor = SelectionCursor::new();
        for _ in 0..presses {
            cursor.handle(NavKey::ArrowDown, &state.suggestions, raw_term);
        }
        ctx.output
            .debug(&format!("Selection index after {} presses: {}", presses, cursor.index()));
        cursor.handle(NavKey::Enter, &state.suggestions, raw_term)
    });

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "computed": computed,
            "state": state,
            "commit": commit.as_ref().map(SearchCommit::path),
        }));
        return Ok(());
    }

    ctx.output.header("Computations");
    for term in &computed {
        ctx.output.list_item(term);
    }
    ctx.output.info(&format!(
        "{} of {} keystrokes reached the backend",
        computed.len(),
        total
    ));

    ctx.output.header(&format!("Suggestions for {:?}", state.term));
    if state.suggestions.is_empty() {
        ctx.output.info("No suggestions.");
    }
    for suggestion in &state.suggestions {
        let label = match &suggestion.category {
            Some(category) => format!("{}  {}", suggestion.title, console::style(category).dim()),
            None => format!("{}  {}", suggestion.title, console::style("category").dim()),
        };
        ctx.output.list_item(&label);
    }

    if args.down.is_some() {
        match commit {
            Some(commit) => ctx.output.success(&format!("Navigate to {}", commit.path())),
            None => ctx.output.warn("Nothing to commit"),
        }
    }

    Ok(())
}
