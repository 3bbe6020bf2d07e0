mod cli;
mod commands;
mod config;
mod dispatch;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "armory=debug,armory_idb=debug,armory_cli=debug"
    } else {
        "armory=info,armory_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Configure {
            base_url,
            realm,
            items_db,
            show,
        } => {
            commands::configure::handle(base_url, realm, items_db, show)?;
        }

        Commands::Report {
            name,
            realm,
            achievements,
            json,
            overrides,
        } => {
            let config = Config::load()?.with_overrides(&overrides)?;
            commands::report::report(&config, &name, realm.as_deref(), achievements, json).await?;
        }

        Commands::Ask { message, overrides } => {
            let config = Config::load()?.with_overrides(&overrides)?;
            commands::report::ask(&config, &message).await?;
        }

        Commands::Chat { overrides } => {
            let config = Config::load()?.with_overrides(&overrides)?;
            commands::chat::run(&config).await?;
        }

        Commands::Idb { db, command } => {
            let db = match db {
                Some(db) => db,
                None => Config::load()?.items_db,
            };
            let db = db.as_path();

            match command {
                ItemsDbCommand::Init => commands::items_db::init(db)?,
                ItemsDbCommand::Import { file } => commands::items_db::import(db, &file)?,
                ItemsDbCommand::Show { id } => commands::items_db::show(db, id)?,
                ItemsDbCommand::Stats => commands::items_db::stats(db)?,
            }
        }
    }

    Ok(())
}
