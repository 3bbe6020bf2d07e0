//! Gear score calculation.
//!
//! Sums the reference base score of every equipped item, with two
//! adjustments: hunters weight their ranged weapon up and melee weapons
//! down, and one-handed weapons are pooled so that a pair contributes the
//! average of the two instead of both.

use crate::character::CharacterSnapshot;
use crate::error::{ArmoryError, Result};
use crate::reference::{
    inventory_type_name, is_hunter, HUNTER_OFF_STAT_WEAPON_TYPES, INV_TYPE_RANGED_RIGHT,
};
use armory_idb::{ItemRecord, ITEM_CLASS_WEAPON};
use serde::Serialize;
use std::collections::HashMap;

/// Hunter ranged weapon weight, matched to the in-game scoring addon
pub const HUNTER_RANGED_MULTIPLIER: f64 = 5.3224;

/// Hunter melee weapon weight
pub const HUNTER_MELEE_MULTIPLIER: f64 = 0.3164;

/// Weapon subclasses pooled for dual-wield averaging
pub const POOLED_WEAPON_SUBCLASSES: &[i64] = &[1, 5, 8];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GearScore {
    pub score: u32,
    /// Equipped PVP items, labelled `"<Inventory type>: <name>"`
    pub pvp_items: Vec<String>,
    /// Equipped item ids with no reference record
    pub unresolved: Vec<u32>,
}

/// How one item adds to the total
#[derive(Debug, Clone, Copy, PartialEq)]
enum Contribution {
    Direct(f64),
    Pooled(f64),
}

fn contribution(item: &ItemRecord, hunter: bool) -> Contribution {
    if hunter && item.item_type == INV_TYPE_RANGED_RIGHT {
        Contribution::Direct(item.gear_score * HUNTER_RANGED_MULTIPLIER)
    } else if hunter && HUNTER_OFF_STAT_WEAPON_TYPES.contains(&item.item_type) {
        Contribution::Direct(item.gear_score * HUNTER_MELEE_MULTIPLIER)
    } else if item.class == ITEM_CLASS_WEAPON && POOLED_WEAPON_SUBCLASSES.contains(&item.subclass) {
        Contribution::Pooled(item.gear_score)
    } else {
        Contribution::Direct(item.gear_score)
    }
}

/// Score a character's equipment against resolved reference records.
///
/// Records may arrive in any order and may be missing for some items;
/// unresolved items are skipped.
pub fn calculate(character: &CharacterSnapshot, records: &[ItemRecord]) -> Result<GearScore> {
    if character.equipment.is_empty() {
        return Err(ArmoryError::NoEquipment {
            name: character.name.clone(),
        });
    }

    tracing::debug!("Calculating gear score for {}", character.name);

    let by_id: HashMap<u32, &ItemRecord> = records.iter().map(|r| (r.item_id, r)).collect();
    let hunter = is_hunter(&character.class);

    let mut total = 0.0_f64;
    let mut weapons: Vec<f64> = Vec::new();
    let mut result = GearScore::default();

    for id in character.equipped_ids() {
        let Some(item) = by_id.get(&id) else {
            tracing::warn!("Item {} has no reference record, skipping", id);
            result.unresolved.push(id);
            continue;
        };

        if item.pvp {
            result
                .pvp_items
                .push(format!("{}: {}", inventory_type_name(item.item_type), item.name));
        }

        match contribution(item, hunter) {
            Contribution::Direct(value) => total += value,
            Contribution::Pooled(value) => weapons.push(value),
        }
    }

    match weapons.as_slice() {
        [first, second] => total += ((first + second) / 2.0).floor(),
        [only] => total += only,
        _ => {}
    }

    result.score = total.ceil().max(0.0) as u32;
    tracing::info!("{} has gear score {}", character.name, result.score);
    Ok(result)
}
