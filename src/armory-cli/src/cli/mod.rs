//! CLI argument definitions for armory
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod idb;

pub use core::{Cli, Commands, Overrides};
pub use idb::ItemsDbCommand;
