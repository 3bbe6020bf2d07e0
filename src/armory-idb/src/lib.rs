//! Item Reference Database
//!
//! Read-mostly store of item metadata (base gear score, class/subclass,
//! inventory type, PVP flag, socket count) keyed by item id. The report
//! pipeline resolves equipped item ids against it through [`ItemLookup`].
//!
//! # Features
//!
//! - `sqlite-sync` (default) - SQLite backend using rusqlite
//!
//! # Example
//!
//! ```no_run
//! use armory_idb::{ItemsRepository, SqliteDb};
//!
//! let db = SqliteDb::open("items.db").unwrap();
//! db.init().unwrap();
//!
//! // Missing ids are simply not returned
//! let items = db.get_items(&[50730, 50605]).unwrap();
//! ```

pub mod memory;
pub mod repository;
pub mod shared;
pub mod types;

#[cfg(feature = "sqlite-sync")]
pub mod sqlite;

// Re-export types
pub use types::*;

// Re-export repository traits
pub use repository::{BulkRepository, ItemLookup, ItemsRepository, RepoError, RepoResult};

// Re-export implementations
pub use memory::MemoryDb;

#[cfg(feature = "sqlite-sync")]
pub use sqlite::{SharedSqliteDb, SqliteDb, DEFAULT_DB_PATH};
