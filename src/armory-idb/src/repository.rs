//! Repository traits for the item reference database.
//!
//! The sync traits are implemented by every backend; [`ItemLookup`] is the
//! async resolver the report pipeline consumes.

use crate::types::*;
use std::path::Path;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Item not found: {0}")]
    NotFound(u32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Item store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Trait for item reference operations (synchronous)
pub trait ItemsRepository {
    /// Initialize the database schema
    fn init(&self) -> RepoResult<()>;

    /// Insert or replace an item record
    fn upsert_item(&self, item: &ItemRecord) -> RepoResult<()>;

    /// Get an item by id
    fn get_item(&self, item_id: u32) -> RepoResult<Option<ItemRecord>>;

    /// Get the records for a set of ids.
    ///
    /// Duplicate ids are looked up once. Ids without a record are omitted
    /// from the result rather than reported as errors.
    fn get_items(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>>;

    /// Count stored items
    fn count(&self) -> RepoResult<i64>;

    /// Get database statistics
    fn stats(&self) -> RepoResult<DbStats>;
}

/// Extension trait for bulk operations
pub trait BulkRepository: ItemsRepository {
    /// Insert or replace many records at once
    fn upsert_items_bulk(&self, items: &[ItemRecord]) -> RepoResult<BulkResult>;

    /// Import a JSON array export of the reference collection
    fn import_json(&self, path: &Path) -> RepoResult<BulkResult> {
        let text = std::fs::read_to_string(path)?;
        let items: Vec<ItemRecord> = serde_json::from_str(&text)?;
        tracing::info!("Importing {} items from {}", items.len(), path.display());
        self.upsert_items_bulk(&items)
    }
}

/// Async resolver used by the report pipeline.
///
/// Fails only when the store itself cannot be reached; missing items are
/// simply absent from the returned list.
#[allow(async_fn_in_trait)]
pub trait ItemLookup {
    async fn lookup(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>>;
}

impl<T: ItemLookup + ?Sized> ItemLookup for &T {
    async fn lookup(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        (**self).lookup(item_ids).await
    }
}

impl<T: ItemLookup + ?Sized> ItemLookup for std::sync::Arc<T> {
    async fn lookup(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        (**self).lookup(item_ids).await
    }
}
