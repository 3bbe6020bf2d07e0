//! Shared types for the item reference database.
//!
//! These types are backend-agnostic and used by all implementations.

use serde::{Deserialize, Deserializer, Serialize};

/// Item class code for weapons
pub const ITEM_CLASS_WEAPON: i64 = 2;

/// Item class code for armor
pub const ITEM_CLASS_ARMOR: i64 = 4;

/// Reference metadata for one item.
///
/// The serde names follow the exported reference collection
/// (`itemID`, `GearScore`, `PVP`, ...) so a dump can be imported as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "itemID", deserialize_with = "de::lenient_u32")]
    pub item_id: u32,

    #[serde(default)]
    pub name: String,

    /// Base gear score before any class or slot rule is applied
    #[serde(rename = "GearScore", default, deserialize_with = "de::lenient_f64")]
    pub gear_score: f64,

    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub class: i64,

    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub subclass: i64,

    /// Inventory type code (slot or weapon kind)
    #[serde(rename = "type", default, deserialize_with = "de::lenient_i64")]
    pub item_type: i64,

    #[serde(rename = "PVP", default, deserialize_with = "de::lenient_bool")]
    pub pvp: bool,

    /// Sockets the base item provides
    #[serde(default, deserialize_with = "de::lenient_u32")]
    pub gems: u32,
}

impl ItemRecord {
    pub fn is_weapon(&self) -> bool {
        self.class == ITEM_CLASS_WEAPON
    }
}

/// Database statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbStats {
    pub item_count: i64,
    pub weapon_count: i64,
    pub pvp_count: i64,
}

/// Result of a bulk operation
#[derive(Debug, Clone, Default)]
pub struct BulkResult {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(u32, String)>, // (item id, error message)
}

/// Deduplicate ids while keeping first-seen order
pub fn unique_ids(ids: &[u32]) -> Vec<u32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Lenient deserializers.
///
/// Reference dumps store numbers as either JSON numbers or strings, and the
/// PVP flag as `0`/`1` or a boolean.
mod de {
    use super::*;
    use serde_json::Value;

    fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            Value::Bool(b) => Ok(Some(if b { 1.0 } else { 0.0 })),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected number, got {}",
                other
            ))),
        }
    }

    pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(number(deserializer)?.unwrap_or_default())
    }

    pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(number(deserializer)?.unwrap_or_default() as i64)
    }

    pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let n = number(deserializer)?.unwrap_or_default();
        if n < 0.0 || n > f64::from(u32::MAX) {
            return Err(serde::de::Error::custom(format!("out of range: {}", n)));
        }
        Ok(n as u32)
    }

    pub fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(number(deserializer)?.is_some_and(|n| n != 0.0))
    }
}
