//! Item reference database command handlers
//!
//! Handles the `idb` subcommands for creating, filling and inspecting the
//! SQLite item store the report pipeline reads from.

use anyhow::{Context, Result};
use armory::reference::inventory_type_name;
use armory_idb::{BulkRepository, ItemsRepository, SqliteDb};
use std::path::Path;

fn open(db: &Path) -> Result<SqliteDb> {
    let wdb = SqliteDb::open(db)
        .with_context(|| format!("Failed to open items database at {}", db.display()))?;
    wdb.init()?;
    Ok(wdb)
}

/// Handle `idb init`
pub fn init(db: &Path) -> Result<()> {
    if let Some(parent) = db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    open(db)?;
    println!("Your database is ready at {}", db.display());
    Ok(())
}

/// Handle `idb import`
pub fn import(db: &Path, file: &Path) -> Result<()> {
    if let Some(parent) = db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let wdb = open(db)?;
    let result = wdb
        .import_json(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!("Imported {} items ({} failed)", result.succeeded, result.failed);
    for (id, error) in result.errors.iter().take(10) {
        println!("  {} - {}", id, error);
    }
    if result.errors.len() > 10 {
        println!("  ... and {} more", result.errors.len() - 10);
    }
    Ok(())
}

/// Handle `idb show`
pub fn show(db: &Path, id: u32) -> Result<()> {
    let wdb = open(db)?;

    match wdb.get_item(id)? {
        Some(item) => {
            println!("Item ID:    {}", item.item_id);
            println!("Name:       {}", item.name);
            println!("GearScore:  {}", item.gear_score);
            println!("Class:      {}/{}", item.class, item.subclass);
            println!(
                "Type:       {} ({})",
                item.item_type,
                inventory_type_name(item.item_type)
            );
            println!("Sockets:    {}", item.gems);
            println!("PVP:        {}", if item.pvp { "yes" } else { "no" });
        }
        None => println!("Item {} not found", id),
    }
    Ok(())
}

/// Handle `idb stats`
pub fn stats(db: &Path) -> Result<()> {
    let wdb = open(db)?;
    let stats = wdb.stats()?;
    println!("Items Database Statistics");
    println!("  Items:   {}", stats.item_count);
    println!("  Weapons: {}", stats.weapon_count);
    println!("  PVP:     {}", stats.pvp_count);
    Ok(())
}
