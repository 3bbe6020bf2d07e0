//! One-shot report command handlers
//!
//! `report` prints a character report; `ask` answers one chat message.

use anyhow::{Context, Result};
use armory::{ArmoryClient, ReportBuilder, ReportOptions, Retrying, UreqTransport};
use armory_idb::{ItemsRepository, SharedSqliteDb, SqliteDb};

use crate::config::Config;
use crate::dispatch::{dispatch, Message, MessageContext};

pub type LiveBuilder = ReportBuilder<Retrying<UreqTransport>, SharedSqliteDb>;

/// Report builder backed by the network and the configured item store
pub fn live_builder(config: &Config) -> Result<LiveBuilder> {
    let db = SqliteDb::open(&config.items_db).with_context(|| {
        format!(
            "Failed to open items database at {}",
            config.items_db.display()
        )
    })?;
    db.init()?;
    if db.count()? == 0 {
        tracing::warn!(
            "Items database {} is empty; run `armory idb import` first",
            config.items_db.display()
        );
    }

    let client_config = config.client_config();
    let client = ArmoryClient::new(
        UreqTransport::with_retries(&client_config),
        client_config.base_url.clone(),
    );
    Ok(ReportBuilder::new(client, SharedSqliteDb::new(db)))
}

/// Handle `report`
pub async fn report(
    config: &Config,
    name: &str,
    realm: Option<&str>,
    achievements: bool,
    json: bool,
) -> Result<()> {
    let realm = match realm {
        Some(r) => config.realms().resolve(r).with_context(|| {
            format!(
                "Unknown realm {}; expected one of: {}",
                r,
                config.realms.join(", ")
            )
        })?,
        None => config.default_realm.clone(),
    };

    let builder = live_builder(config)?;
    let report = match builder
        .build(&realm, name, ReportOptions { achievements })
        .await
    {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Report for {} on {} failed: {}", name, realm, e);
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.summary);
    if let Some(table) = &report.achievements {
        println!("{}", table);
    }
    Ok(())
}

/// Handle `ask`
pub async fn ask(config: &Config, message: &str) -> Result<()> {
    let builder = live_builder(config)?;
    let realms = config.realms();
    let ctx = MessageContext {
        builder: &builder,
        realms: &realms,
        default_realm: &config.default_realm,
    };

    match dispatch(&ctx, &Message::new("cli", message)).await {
        Some(reply) => println!("{}", reply),
        None => println!("Not a command; messages start with '!'. Try \"!help\"."),
    }
    Ok(())
}
