//! CLI configuration.

use anyhow::{Context, Result};
use market_core::ListingConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Listing page tunables.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Product catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where products come from when `--products` is not given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON product file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
}

/// Generate a default market.toml config file.
pub fn generate_default_config(products: Option<&str>) -> String {
    let products_line = match products {
        Some(path) => format!("products = \"{}\"", path),
        None => "# products = \"products.json\"".to_string(),
    };

    format!(
        r#"# Marketplace listing configuration

[listing]
# Items revealed initially and per "load more"
page_size = 12
# Quiet period before suggestions are computed
debounce_ms = 300
# Maximum suggestions shown
suggestion_limit = 3

[catalog]
{products_line}
"#,
        products_line = products_line
    )
}
