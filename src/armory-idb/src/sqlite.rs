//! SQLite implementation using rusqlite (synchronous).
//!
//! [`SharedSqliteDb`] wraps a connection for the async pipeline by moving
//! each query onto tokio's blocking pool.

use crate::repository::*;
use crate::shared::{self, ITEM_SELECT_COLUMNS, MIGRATIONS};
use crate::types::*;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Default database location
pub const DEFAULT_DB_PATH: &str = "share/items.db";

/// SQLite-backed item database
pub struct SqliteDb {
    conn: Connection,
}

fn db_err(e: rusqlite::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemRecord> {
    Ok(ItemRecord {
        item_id: row.get(0)?,
        name: row.get(1)?,
        gear_score: row.get(2)?,
        class: row.get(3)?,
        subclass: row.get(4)?,
        item_type: row.get(5)?,
        pvp: row.get(6)?,
        gems: row.get(7)?,
    })
}

impl SqliteDb {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Check if a migration has been applied
    fn is_migration_applied(&self, version: &str) -> RepoResult<bool> {
        let result: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM schema_migrations WHERE version = ?1",
                params![version],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;
        Ok(result.is_some())
    }

    /// Run pending migrations
    fn run_migrations(&self) -> RepoResult<()> {
        for (version, sql) in MIGRATIONS {
            if self.is_migration_applied(version)? {
                continue;
            }
            self.conn.execute_batch(sql).map_err(db_err)?;
            self.conn
                .execute(
                    "INSERT INTO schema_migrations (version) VALUES (?1)",
                    params![version],
                )
                .map_err(db_err)?;
            tracing::info!("SQLite: Applied migration {}", version);
        }
        Ok(())
    }

    fn insert(conn: &Connection, item: &ItemRecord) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO items (item_id, name, gear_score, class, subclass, item_type, pvp, gems)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(item_id) DO UPDATE SET
                name = excluded.name,
                gear_score = excluded.gear_score,
                class = excluded.class,
                subclass = excluded.subclass,
                item_type = excluded.item_type,
                pvp = excluded.pvp,
                gems = excluded.gems",
            params![
                item.item_id,
                item.name,
                item.gear_score,
                item.class,
                item.subclass,
                item.item_type,
                item.pvp,
                item.gems
            ],
        )
    }

    fn count_where(&self, condition: &str) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM items WHERE {}", condition);
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(db_err)
    }
}

impl ItemsRepository for SqliteDb {
    fn init(&self) -> RepoResult<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS schema_migrations (
                    version TEXT PRIMARY KEY NOT NULL,
                    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .map_err(db_err)?;

        self.run_migrations()
    }

    fn upsert_item(&self, item: &ItemRecord) -> RepoResult<()> {
        Self::insert(&self.conn, item).map_err(db_err)?;
        Ok(())
    }

    fn get_item(&self, item_id: u32) -> RepoResult<Option<ItemRecord>> {
        let sql = format!("SELECT {} FROM items WHERE item_id = ?1", ITEM_SELECT_COLUMNS);
        self.conn
            .query_row(&sql, params![item_id], row_to_item)
            .optional()
            .map_err(db_err)
    }

    fn get_items(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        let ids = unique_ids(item_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM items WHERE item_id IN ({}) ORDER BY item_id",
            ITEM_SELECT_COLUMNS,
            shared::placeholders(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql).map_err(db_err)?;
        let items = stmt
            .query_map(params_from_iter(ids.iter()), row_to_item)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;

        if items.len() < ids.len() {
            tracing::debug!(
                "{} of {} requested items have no reference record",
                ids.len() - items.len(),
                ids.len()
            );
        }
        Ok(items)
    }

    fn count(&self) -> RepoResult<i64> {
        self.count_where("1 = 1")
    }

    fn stats(&self) -> RepoResult<DbStats> {
        Ok(DbStats {
            item_count: self.count()?,
            weapon_count: self.count_where(&format!("class = {}", ITEM_CLASS_WEAPON))?,
            pvp_count: self.count_where("pvp")?,
        })
    }
}

impl BulkRepository for SqliteDb {
    fn upsert_items_bulk(&self, items: &[ItemRecord]) -> RepoResult<BulkResult> {
        let tx = self.conn.unchecked_transaction().map_err(db_err)?;
        let mut result = BulkResult::default();

        for item in items {
            match Self::insert(&tx, item) {
                Ok(_) => result.succeeded += 1,
                Err(e) => {
                    result.failed += 1;
                    result.errors.push((item.item_id, e.to_string()));
                }
            }
        }

        tx.commit().map_err(db_err)?;
        Ok(result)
    }
}

/// Thread-safe handle for async callers
#[derive(Clone)]
pub struct SharedSqliteDb {
    inner: Arc<Mutex<SqliteDb>>,
}

impl SharedSqliteDb {
    pub fn new(db: SqliteDb) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Open an existing database file and make sure its schema is current
    pub fn open<P: AsRef<Path>>(path: P) -> RepoResult<Self> {
        let db = SqliteDb::open(path).map_err(|e| RepoError::Unavailable(e.to_string()))?;
        db.init()?;
        Ok(Self::new(db))
    }
}

impl ItemLookup for SharedSqliteDb {
    async fn lookup(&self, item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        let inner = Arc::clone(&self.inner);
        let ids = item_ids.to_vec();

        tokio::task::spawn_blocking(move || {
            let db = inner
                .lock()
                .map_err(|e| RepoError::Unavailable(e.to_string()))?;
            db.get_items(&ids)
        })
        .await
        .map_err(|e| RepoError::Unavailable(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> SqliteDb {
        let db = SqliteDb::open_in_memory().unwrap();
        db.init().unwrap();
        db
    }

    fn weapon(id: u32, score: f64, subclass: i64) -> ItemRecord {
        ItemRecord {
            item_id: id,
            name: format!("Weapon {}", id),
            gear_score: score,
            class: ITEM_CLASS_WEAPON,
            subclass,
            item_type: 13,
            pvp: false,
            gems: 1,
        }
    }

    #[test]
    fn test_init_creates_tables() {
        let db = setup_db();
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let db = setup_db();
        db.init().unwrap();
        let applied: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_upsert_and_get_item() {
        let db = setup_db();
        db.upsert_item(&weapon(50672, 232.0, 1)).unwrap();

        let item = db.get_item(50672).unwrap().unwrap();
        assert_eq!(item.name, "Weapon 50672");
        assert_eq!(item.subclass, 1);
        assert!(db.get_item(1).unwrap().is_none());
    }

    #[test]
    fn test_upsert_overwrites_existing() {
        let db = setup_db();
        db.upsert_item(&weapon(1, 10.0, 1)).unwrap();
        let mut updated = weapon(1, 20.0, 5);
        updated.pvp = true;
        db.upsert_item(&updated).unwrap();

        assert_eq!(db.count().unwrap(), 1);
        let item = db.get_item(1).unwrap().unwrap();
        assert_eq!(item.subclass, 5);
        assert!(item.pvp);
    }

    #[test]
    fn test_get_items_omits_missing() {
        let db = setup_db();
        db.upsert_item(&weapon(1, 10.0, 1)).unwrap();
        db.upsert_item(&weapon(2, 20.0, 1)).unwrap();

        let items = db.get_items(&[2, 1, 1, 404]).unwrap();
        let ids: Vec<u32> = items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(db.get_items(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bulk_and_stats() {
        let db = setup_db();
        let mut pvp = weapon(3, 30.0, 8);
        pvp.pvp = true;
        let mut armor = weapon(4, 40.0, 0);
        armor.class = ITEM_CLASS_ARMOR;

        let result = db
            .upsert_items_bulk(&[weapon(1, 10.0, 1), weapon(2, 20.0, 5), pvp, armor])
            .unwrap();
        assert_eq!(result.succeeded, 4);
        assert_eq!(result.failed, 0);

        let stats = db.stats().unwrap();
        assert_eq!(stats.item_count, 4);
        assert_eq!(stats.weapon_count, 3);
        assert_eq!(stats.pvp_count, 1);
    }

    #[test]
    fn test_import_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("items.db");
        let json_path = dir.path().join("items.json");
        std::fs::write(
            &json_path,
            r#"[
                {"itemID": 50605, "name": "Ring", "GearScore": 264, "class": 4, "subclass": 0, "type": 11, "PVP": 0, "gems": 0},
                {"itemID": 51377, "name": "Medallion", "GearScore": 264, "class": 4, "subclass": 0, "type": 2, "PVP": 1, "gems": 0}
            ]"#,
        )
        .unwrap();

        let db = SqliteDb::open(&db_path).unwrap();
        db.init().unwrap();
        let result = db.import_json(&json_path).unwrap();
        assert_eq!(result.succeeded, 2);

        // Reopen to make sure the data was committed
        let db = SqliteDb::open(&db_path).unwrap();
        assert_eq!(db.count().unwrap(), 2);
        assert!(db.get_item(51377).unwrap().unwrap().pvp);
    }

    #[test]
    fn test_import_invalid_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("broken.json");
        std::fs::write(&json_path, "{ not json").unwrap();

        let db = setup_db();
        assert!(matches!(
            db.import_json(&json_path),
            Err(RepoError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_shared_lookup() {
        let db = setup_db();
        db.upsert_item(&weapon(10, 100.0, 1)).unwrap();
        let shared = SharedSqliteDb::new(db);

        let found = shared.lookup(&[10, 11]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item_id, 10);
    }
}
