//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::idb::ItemsDbCommand;

#[derive(Parser)]
#[command(name = "armory")]
#[command(about = "WotLK armory bot: gear score, enchants, gems and raid progress", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Per-invocation overrides of the config file
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Armory base URL
    #[arg(long, env = "ARMORY_BASE_URL")]
    pub base_url: Option<String>,

    /// Realm used when a command names none
    #[arg(long = "default-realm", env = "ARMORY_REALM")]
    pub default_realm: Option<String>,

    /// Path to the item reference database
    #[arg(long, env = "ARMORY_ITEMS_DB")]
    pub items_db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the armory base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Set the default realm
        #[arg(long)]
        realm: Option<String>,

        /// Set the item reference database path
        #[arg(long)]
        items_db: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },

    /// Print the report for one character
    #[command(visible_alias = "r")]
    Report {
        /// Character name (any capitalization)
        name: String,

        /// Realm (defaults to the configured realm)
        realm: Option<String>,

        /// Also fetch the raid achievements table
        #[arg(short, long)]
        achievements: bool,

        /// Print the whole report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Answer a single chat message, e.g. `armory ask "!gs Koch Lordaeron"`
    Ask {
        message: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Answer chat messages read line by line from stdin
    Chat {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Manage the item reference database
    Idb {
        /// Path to database file (can also set ARMORY_ITEMS_DB env var)
        #[arg(short, long, env = "ARMORY_ITEMS_DB")]
        db: Option<PathBuf>,

        #[command(subcommand)]
        command: ItemsDbCommand,
    },
}
