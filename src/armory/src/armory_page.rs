//! Armory profile page parsing.
//!
//! The page carries what the character API does not: per-slot gem and
//! enchant state (encoded in each item link's `rel` attribute), the class
//! label, and the profession list. Missing sections degrade to empty data.

use crate::html::{normalize_ws, Document};
use crate::slot::{Slot, SLOT_COUNT};
use serde::Serialize;

/// One rendered item link, attributed to its slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLink {
    pub slot: Slot,
    pub item_id: Option<u32>,
    /// Non-zero entries of the `gems=a:b:c` parameter
    pub gems_socketed: u32,
    /// Whether an `ench` token appears in the link
    pub enchanted: bool,
}

/// Data scraped from a character's armory page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArmoryPage {
    /// Lower-cased text of the level/race/class label
    pub class_label: String,
    pub professions: Vec<String>,
    pub slots: Vec<SlotLink>,
}

/// Decoded `rel` attribute of an item link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams {
    pub item: Option<u32>,
    pub gems: u32,
    pub enchanted: bool,
}

impl LinkParams {
    /// Parse `item=49964&ench=3817&gems=41398:40119:0`
    pub fn parse(rel: &str) -> LinkParams {
        let mut params = LinkParams {
            enchanted: rel.contains("ench"),
            ..Default::default()
        };

        for pair in rel.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key.trim() {
                "item" => params.item = value.trim().parse().ok(),
                "gems" => params.gems = count_gems(value),
                _ => {}
            }
        }
        params
    }
}

/// Count filled sockets in a colon-delimited gem list; `0` means empty
pub fn count_gems(encoded: &str) -> u32 {
    encoded
        .split(':')
        .map(str::trim)
        .filter(|g| !g.is_empty() && g.parse::<u64>().map_or(true, |id| id != 0))
        .count() as u32
}

impl ArmoryPage {
    pub fn parse(html: &str) -> ArmoryPage {
        let doc = Document::parse(html);

        let class_label = doc
            .select(".level-race-class")
            .first()
            .map(|e| normalize_ws(&e.text()).to_lowercase())
            .unwrap_or_default();
        if class_label.is_empty() {
            tracing::warn!("Armory page has no class label");
        }

        let professions: Vec<String> = doc
            .select(".profskills .text")
            .iter()
            .map(|e| normalize_ws(&e.own_text()))
            .filter(|p| !p.is_empty())
            .collect();

        let links = doc.select(".item-model a");
        if links.len() != SLOT_COUNT {
            tracing::warn!(
                "Armory page rendered {} item links, expected {}; slot attribution may be off",
                links.len(),
                SLOT_COUNT
            );
        }

        let slots = links
            .iter()
            .enumerate()
            .filter_map(|(i, link)| {
                let slot = Slot::from_index(i)?;
                let rel = link.attr("rel")?;
                let params = LinkParams::parse(rel);
                Some(SlotLink {
                    slot,
                    item_id: params.item,
                    gems_socketed: params.gems,
                    enchanted: params.enchanted,
                })
            })
            .collect();

        ArmoryPage {
            class_label,
            professions,
            slots,
        }
    }

    pub fn has_profession(&self, profession: &str) -> bool {
        self.professions.iter().any(|p| p == profession)
    }

    pub fn slot(&self, slot: Slot) -> Option<&SlotLink> {
        self.slots.iter().find(|s| s.slot == slot)
    }

    /// Item ids of every rendered slot, in slot order
    pub fn item_ids(&self) -> Vec<u32> {
        self.slots.iter().filter_map(|s| s.item_id).collect()
    }
}
