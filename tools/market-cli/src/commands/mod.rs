//! CLI command implementations.

pub mod config;
pub mod filters;
pub mod search;
pub mod suggest;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Listing URL query string (e.g. "?category=books&sortBy=price-low").
    #[arg(default_value = "")]
    pub query: String,

    /// JSON product file (default: [catalog] products from config).
    #[arg(short, long)]
    pub products: Option<String>,

    /// Press "Load More" this many times.
    #[arg(short, long, default_value = "0")]
    pub more: usize,

    /// Override the page size.
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Successive values of the search box, one per keystroke.
    #[arg(required = true)]
    pub keystrokes: Vec<String>,

    /// Milliseconds between keystrokes.
    #[arg(short, long, default_value = "100")]
    pub interval_ms: u64,

    /// Press ArrowDown this many times, then Enter.
    #[arg(short, long)]
    pub down: Option<usize>,
}

/// Arguments for the filters command.
#[derive(Args)]
pub struct FiltersArgs {
    /// Starting URL query string.
    #[arg(default_value = "")]
    pub query: String,

    /// Toggle a category (repeatable).
    #[arg(long)]
    pub category: Vec<String>,

    /// Toggle a condition tag (repeatable).
    #[arg(long)]
    pub condition: Vec<String>,

    /// Minimum price.
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Maximum price.
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Location substring.
    #[arg(long)]
    pub location: Option<String>,

    /// Sort order (newest, price-low, price-high, popular).
    #[arg(long)]
    pub sort: Option<String>,

    /// Search term, kept with the current filters.
    #[arg(short = 'q', long)]
    pub term: Option<String>,

    /// Submit a fresh search first. Clears filters and pushes a history entry.
    #[arg(long, conflicts_with = "term")]
    pub search: Option<String>,

    /// Clear all filters before applying the edits.
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Default product file to record.
        #[arg(short, long)]
        products: Option<String>,
    },
    /// Validate the config file.
    Validate,
}
