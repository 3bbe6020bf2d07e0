//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up armory CLI defaults.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(
    base_url: Option<String>,
    realm: Option<String>,
    items_db: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if base_url.is_none() && realm.is_none() && items_db.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, base_url, realm, items_db)?;
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }
    Ok(())
}

/// Apply requested changes, rejecting realms outside the configured list
fn apply(
    config: &mut Config,
    base_url: Option<String>,
    realm: Option<String>,
    items_db: Option<PathBuf>,
) -> Result<()> {
    if let Some(realm) = realm {
        match config.realms().resolve(&realm) {
            Some(resolved) => config.default_realm = resolved,
            None => bail!(
                "Unknown realm {}; expected one of: {}",
                realm,
                config.realms.join(", ")
            ),
        }
    }
    if let Some(url) = base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(db) = items_db {
        config.items_db = db;
    }
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Base URL:       {}", config.base_url);
    println!("Default realm:  {}", config.default_realm);
    println!("Realms:         {}", config.realms.join(", "));
    println!("Items database: {}", config.items_db.display());
    println!(
        "Requests:       {}s timeout, {} attempts, {}ms retry delay",
        config.timeout_secs, config.retries, config.retry_delay_ms
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file:    {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: armory configure --realm Lordaeron");
    println!("   or: armory configure --base-url http://armory.warmane.com");
    println!("   or: armory configure --items-db share/items.db");
    println!("   or: armory configure --show");
}
