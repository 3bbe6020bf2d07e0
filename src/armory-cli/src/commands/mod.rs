//! Command handlers for armory CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod chat;
pub mod configure;
pub mod items_db;
pub mod report;
