//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Init { force, products } => init_config(force, products.as_deref(), ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_file {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let listing = &ctx.config.listing;
    ctx.output.info("");
    ctx.output.info("[listing]");
    ctx.output.kv("page_size", &listing.page_size.to_string());
    ctx.output.kv("debounce_ms", &listing.debounce_ms.to_string());
    ctx.output.kv("suggestion_limit", &listing.suggestion_limit.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match &ctx.config.catalog.products {
        Some(products) => ctx.output.kv("products", products),
        None => ctx.output.kv("products", "(not set)"),
    }

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn init_config(force: bool, products: Option<&str>, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !overwrite {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    let content = generate_default_config(products);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.listing.validate() {
        errors.push(e.to_string());
    }

    if ctx.config.listing.debounce_ms == 0 {
        warnings.push("listing.debounce_ms is 0; every keystroke reaches the backend".to_string());
    }

    match &ctx.config.catalog.products {
        Some(products) => {
            let path = ctx.resolve_path(products);
            if !path.exists() {
                errors.push(format!("catalog.products not found: {}", path.display()));
            }
        }
        None => warnings.push("catalog.products is not set; search needs --products".to_string()),
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["listing", "page_size"] => Ok(config.listing.page_size.into()),
        ["listing", "debounce_ms"] => Ok(config.listing.debounce_ms.into()),
        ["listing", "suggestion_limit"] => Ok(config.listing.suggestion_limit.into()),
        ["catalog", "products"] => Ok(config
            .catalog
            .products
            .clone()
            .map(serde_json::Value::String)
            .unwrap_or(serde_json::Value::Null)),
        _ => bail!("Unknown config key: {}", key),
    }
}
