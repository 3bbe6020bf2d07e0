//! Missing enchant and gem detection.

use crate::armory_page::{ArmoryPage, SlotLink};
use crate::character::CharacterSnapshot;
use crate::reference::{is_hunter, is_offhand_caster};
use crate::slot::{join_names, Slot};
use armory_idb::ItemRecord;
use serde::Serialize;
use std::collections::HashMap;

pub const BLACKSMITHING: &str = "Blacksmithing";
pub const ENCHANTING: &str = "Enchanting";

/// Slots flagged by one of the checks, in slot order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub missing: Vec<Slot>,
}

impl SlotReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn enchants_message(&self, name: &str) -> String {
        if self.is_clean() {
            format!("{} has all enchants! ✅", name)
        } else {
            format!(
                "{} is missing enchants from: {} ❌",
                name,
                join_names(&self.missing)
            )
        }
    }

    pub fn gems_message(&self, name: &str) -> String {
        if self.is_clean() {
            format!("{} has gemmed all their items! ✅", name)
        } else {
            format!("{} needs to gem {} ❌", name, join_names(&self.missing))
        }
    }
}

/// Whether a slot without an enchant should be reported
fn enchant_required(slot: Slot, page: &ArmoryPage) -> bool {
    match slot {
        _ if !slot.is_enchantable() => false,
        Slot::Ranged => is_hunter(&page.class_label),
        Slot::Ring1 | Slot::Ring2 => page.has_profession(ENCHANTING),
        Slot::OffHand => !is_offhand_caster(&page.class_label),
        _ => true,
    }
}

/// Flag rendered items that lack an enchant where one is expected
pub fn missing_enchants(page: &ArmoryPage) -> SlotReport {
    let missing = page
        .slots
        .iter()
        .filter(|link| !link.enchanted && enchant_required(link.slot, page))
        .map(|link| link.slot)
        .collect();
    let report = SlotReport { missing };
    tracing::debug!("Missing enchants: {:?}", report.missing);
    report
}

/// Sockets a slot must have filled, given the item's own socket count
fn gem_shortfall(link: &SlotLink, canonical: u32, blacksmith: bool) -> bool {
    let bonus_socket =
        link.slot == Slot::Belt || (blacksmith && matches!(link.slot, Slot::Gloves | Slot::Bracer));
    if bonus_socket {
        canonical + 1 != link.gems_socketed
    } else {
        canonical > link.gems_socketed
    }
}

/// Compare socketed gems against each item's canonical socket count.
///
/// Slots whose item has no reference record are skipped.
pub fn missing_gems(
    page: &ArmoryPage,
    character: &CharacterSnapshot,
    records: &[ItemRecord],
) -> SlotReport {
    let by_id: HashMap<u32, &ItemRecord> = records.iter().map(|r| (r.item_id, r)).collect();
    let blacksmith = character.has_profession(BLACKSMITHING);

    let missing = page
        .slots
        .iter()
        .filter(|link| {
            let Some(item) = link.item_id.and_then(|id| by_id.get(&id)) else {
                return false;
            };
            gem_shortfall(link, item.gems, blacksmith)
        })
        .map(|link| link.slot)
        .collect();
    let report = SlotReport { missing };
    tracing::debug!("Missing gems: {:?}", report.missing);
    report
}
