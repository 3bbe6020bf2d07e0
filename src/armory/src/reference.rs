//! Reference data for WotLK characters and items
//!
//! Hardcoded tables for game concepts the pipeline needs to interpret API
//! and armory data: playable classes, realms, inventory type codes and the
//! raid achievements shown in the achievements table.

mod achievement;
mod class;
mod inventory;
mod realm;

pub use achievement::{
    RaidAchievement, RaidTier, ACHIEVEMENT_CATEGORIES, RAIDS, RAID_ACHIEVEMENTS,
};
pub use class::{class_in_label, is_hunter, is_offhand_caster, OFFHAND_CASTERS};
pub use inventory::{
    inventory_type_by_code, inventory_type_name, InventoryType, HUNTER_OFF_STAT_WEAPON_TYPES,
    INVENTORY_TYPES, INV_TYPE_RANGED_RIGHT,
};
pub use realm::{Realms, DEFAULT_REALM, DEFAULT_REALMS};
