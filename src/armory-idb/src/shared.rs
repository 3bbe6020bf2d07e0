//! SQL constants shared by the database implementation and its tests.

/// Comma-separated column list for SELECT queries.
/// Order must match the positional indices used in row mapping.
pub const ITEM_SELECT_COLUMNS: &str =
    "item_id, name, gear_score, class, subclass, item_type, pvp, gems";

/// Schema migrations, applied in order and recorded in `schema_migrations`
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_items",
        r#"
        CREATE TABLE IF NOT EXISTS items (
            item_id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            gear_score REAL NOT NULL DEFAULT 0,
            class INTEGER NOT NULL DEFAULT 0,
            subclass INTEGER NOT NULL DEFAULT 0,
            item_type INTEGER NOT NULL DEFAULT 0,
            pvp BOOLEAN NOT NULL DEFAULT FALSE,
            gems INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "0002_items_indexes",
        r#"
        CREATE INDEX IF NOT EXISTS idx_items_class ON items(class, subclass);
        CREATE INDEX IF NOT EXISTS idx_items_pvp ON items(pvp);
        "#,
    ),
];

/// Build a `?1, ?2, ...` placeholder list for an IN clause
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
