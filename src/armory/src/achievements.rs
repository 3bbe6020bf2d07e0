//! Raid achievement progress.
//!
//! The armory serves achievements one category at a time as a JSON reply
//! whose `content` field is an HTML fragment. Each fragment is scanned for
//! the known raid completion achievements and merged into one table keyed
//! by raid key, so the order categories are fetched in does not matter.

use crate::error::{ArmoryError, Result};
use crate::html::Document;
use crate::reference::{RaidAchievement, RaidTier, RAIDS, RAID_ACHIEVEMENTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DONE: &str = "✅";
pub const NOT_DONE: &str = "❌";

/// Both marks render two columns wide
const MARK_WIDTH: usize = 2;
const LABEL_WIDTH: usize = 7;
const COLUMN_WIDTH: usize = 4;

/// Grid columns: header, raid size, heroic
const COLUMNS: [(&str, u8, bool); 4] = [
    ("25HC", 25, true),
    ("25NM", 25, false),
    ("10HC", 10, true),
    ("10NM", 10, false),
];

/// Reply text used when the achievements could not be fetched
pub const ACHIEVEMENTS_UNAVAILABLE: &str = "Error retrieving achievements. Please try again later.";

/// Body of a category reply
#[derive(Debug, Deserialize)]
pub struct CategoryReply {
    #[serde(default)]
    pub content: String,
}

impl CategoryReply {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| ArmoryError::Parse(format!("achievements reply: {}", e)))
    }
}

/// Completion state per raid key (`ICC25HC`, `RS10`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievementTable {
    pub completed: BTreeMap<String, bool>,
}

impl AchievementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every known raid achievement present in a category fragment
    pub fn merge_fragment(&mut self, html: &str) {
        let doc = Document::parse(html);
        for node in doc.select(".achievement") {
            let Some(id) = node.attr("id") else { continue };
            let Some(raid) = RAID_ACHIEVEMENTS.iter().find(|a| a.node_id() == id) else {
                continue;
            };
            let done = !node.select(".date").is_empty();
            self.completed.insert(raid.key.to_string(), done);
        }
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.completed.get(key).copied().unwrap_or(false)
    }

    fn mark(&self, achievement: Option<&RaidAchievement>) -> &'static str {
        match achievement {
            Some(a) if self.is_completed(a.key) => DONE,
            _ => NOT_DONE,
        }
    }

    /// Render the fixed raid grid as a code block
    pub fn render(&self) -> String {
        let cell = |raid: RaidTier, size: u8, heroic: bool| {
            self.mark(
                RAID_ACHIEVEMENTS
                    .iter()
                    .find(|a| a.raid == raid && a.size == size && a.heroic == heroic),
            )
        };

        let mut out = String::from("```fix\n");
        out.push_str(&format!("{:<width$}|", "Raid", width = LABEL_WIDTH));
        for (header, _, _) in COLUMNS {
            out.push_str(&format!(" {:<width$}", header, width = COLUMN_WIDTH));
        }
        out.push('\n');
        out.push_str(&"-".repeat(LABEL_WIDTH + 1 + COLUMNS.len() * (COLUMN_WIDTH + 1)));
        out.push('\n');

        // Marks are right-aligned under their header
        let pad = " ".repeat(1 + COLUMN_WIDTH - MARK_WIDTH);
        for raid in RAIDS {
            out.push_str(&format!("{:<width$}|", raid.label(), width = LABEL_WIDTH));
            for (_, size, heroic) in COLUMNS {
                out.push_str(&pad);
                out.push_str(cell(*raid, size, heroic));
            }
            out.push('\n');
        }
        out.push_str("```");
        out
    }
}
