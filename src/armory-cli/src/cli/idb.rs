//! Items database command CLI definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ItemsDbCommand {
    /// Initialize the items database
    Init,

    /// Import a JSON array export of the item reference collection
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Show one item by id
    Show {
        /// Item id
        id: u32,
    },

    /// Show database statistics
    Stats,
}
