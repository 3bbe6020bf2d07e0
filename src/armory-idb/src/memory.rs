//! In-memory backend.
//!
//! Holds the whole reference collection in a map. Used for tests and for
//! small reference sets loaded straight from a JSON export.

use crate::repository::*;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// Map-backed item database
#[derive(Debug, Default)]
pub struct MemoryDb {
    items: RwLock<HashMap<u32, ItemRecord>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from a list of records (later duplicates win)
    pub fn from_items<I: IntoIterator<Item = ItemRecord>>(items: I) -> Self {
        let map = items.into_iter().map(|i| (i.item_id, i)).collect();
        Self {
            items: RwLock::new(map),
        }
    }

    /// Load a JSON array export
    pub fn from_json_file(path: &Path) -> RepoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let items: Vec<ItemRecord> = serde_json::from_str(&text)?;
        Ok(Self::from_items(items))
    }

    fn read(&self) -> RepoResult<std::sync::RwLockReadGuard<'_, HashMap<u32, ItemRecord>>> {
        self.items
            .read()
            .map_err(|e| RepoError::Unavailable(e.to_string()))
    }

    fn write(&self) -> RepoResult<std::sync::RwLockWriteGuard<'_, HashMap<u32, ItemRecord>>> {
        self.items
            .write()
            .map_err(|e| RepoError::Unavailable(e.to_string()))
    }
}

impl ItemsRepository for MemoryDb {
    fn init(&self) -> RepoResult<()> {
        Ok(())
    }

    fn upsert_item(&self, item: &ItemRecord) -> RepoResult<()> {
        self.write()?.insert(item.item_id, item.clone());
        Ok(())
    }

    fn get_item(&self, item_id: u32) -> RepoResult<Option<ItemRecord>> {
        Ok(self.read()?.get(&item_id).cloned())
    }

    fn get_items(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        let items = self.read()?;
        Ok(unique_ids(item_ids)
            .into_iter()
            .filter_map(|id| items.get(&id).cloned())
            .collect())
    }

    fn count(&self) -> RepoResult<i64> {
        Ok(self.read()?.len() as i64)
    }

    fn stats(&self) -> RepoResult<DbStats> {
        let items = self.read()?;
        Ok(DbStats {
            item_count: items.len() as i64,
            weapon_count: items.values().filter(|i| i.is_weapon()).count() as i64,
            pvp_count: items.values().filter(|i| i.pvp).count() as i64,
        })
    }
}

impl BulkRepository for MemoryDb {
    fn upsert_items_bulk(&self, items: &[ItemRecord]) -> RepoResult<BulkResult> {
        let mut map = self.write()?;
        for item in items {
            map.insert(item.item_id, item.clone());
        }
        Ok(BulkResult {
            succeeded: items.len(),
            ..Default::default()
        })
    }
}

impl ItemLookup for MemoryDb {
    async fn lookup(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        self.get_items(item_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, score: f64) -> ItemRecord {
        ItemRecord {
            item_id: id,
            name: format!("Item {}", id),
            gear_score: score,
            class: ITEM_CLASS_ARMOR,
            subclass: 4,
            item_type: 1,
            pvp: false,
            gems: 0,
        }
    }

    #[test]
    fn test_get_items_skips_missing_and_duplicates() {
        let db = MemoryDb::from_items([item(1, 10.0), item(2, 20.0)]);
        let found = db.get_items(&[2, 2, 3, 1]).unwrap();
        let ids: Vec<u32> = found.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_upsert_replaces() {
        let db = MemoryDb::new();
        db.upsert_item(&item(7, 1.0)).unwrap();
        db.upsert_item(&item(7, 2.0)).unwrap();
        assert_eq!(db.count().unwrap(), 1);
        let got = db.get_item(7).unwrap().unwrap();
        assert!((got.gear_score - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"itemID": 1, "GearScore": 5}, {"itemID": 2, "GearScore": 6, "PVP": 1}]"#,
        )
        .unwrap();
        let db = MemoryDb::from_json_file(&path).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.item_count, 2);
        assert_eq!(stats.pvp_count, 1);
    }

    #[tokio::test]
    async fn test_async_lookup() {
        let db = MemoryDb::from_items([item(1, 10.0)]);
        let found = db.lookup(&[1, 99]).await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
