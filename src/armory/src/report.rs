//! Character report assembly.
//!
//! [`ReportBuilder::build`] is the single entry point used by the command
//! layer: it validates the snapshot, fetches the armory page and the item
//! records concurrently, then derives every report field from them.

use crate::achievements::ACHIEVEMENTS_UNAVAILABLE;
use crate::armory_page::ArmoryPage;
use crate::character::{normalize_name, CharacterSnapshot, Talent};
use crate::client::{ArmoryClient, Transport};
use crate::compliance::{missing_enchants, missing_gems};
use crate::error::{ArmoryError, Result};
use crate::gearscore;
use armory_idb::{ItemLookup, ItemRecord};
use serde::Serialize;
use std::collections::HashSet;

pub const NO_TALENTS: &str = "No talents found";
pub const NO_PROFESSIONS: &str = "No professions to show";
pub const NO_ITEMS: &str = "No items equipped";
pub const NO_PVP_ITEMS: &str = "None";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Also fetch the raid achievement categories
    pub achievements: bool,
}

/// Everything the bot can say about one character
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterReport {
    pub name: String,
    pub realm: String,
    pub character: CharacterSnapshot,
    /// `None` when nothing is equipped
    pub gear_score: Option<u32>,
    pub enchants: String,
    pub gems: String,
    pub talents: String,
    /// Markdown link to the armory profile
    pub armory: String,
    pub guild_link: Option<String>,
    pub pvp_gear: Vec<String>,
    pub achievements: Option<String>,
    pub summary: String,
}

impl CharacterReport {
    /// Gear score reply, or the no-equipment error for the command layer
    pub fn gear_score_reply(&self) -> Result<String> {
        match self.gear_score {
            Some(score) => Ok(format!("{}'s gear score is: {}", self.name, score)),
            None => Err(ArmoryError::NoEquipment {
                name: self.name.clone(),
            }),
        }
    }

    pub fn guild_reply(&self) -> String {
        match &self.guild_link {
            Some(link) => format!("{}'s guild: {}", self.name, link),
            None => no_guild(&self.name),
        }
    }

    pub fn armory_reply(&self) -> String {
        format!("{}'s armory: {}", self.name, self.armory)
    }

    pub fn achievements_reply(&self) -> String {
        format!(
            "**{}'s achievements**:\n{}",
            self.name,
            self.achievements.as_deref().unwrap_or(ACHIEVEMENTS_UNAVAILABLE)
        )
    }
}

fn no_guild(name: &str) -> String {
    format!("{} doesn't have a guild", name)
}

/// `Tree(a/b/c) and Tree(a/b/c)`; trees past the second are joined with `, `
pub fn format_talents(talents: &[Talent]) -> String {
    let mut out = String::new();
    for (i, talent) in talents.iter().enumerate() {
        match i {
            0 => {}
            1 => out.push_str(" and "),
            _ => out.push_str(", "),
        }
        out.push_str(&talent.tree);
        if let Some(points) = talent.points.as_deref().filter(|p| !p.is_empty()) {
            let joined: Vec<String> = points.iter().map(|p| p.to_string()).collect();
            out.push_str(&format!("({})", joined.join("/")));
        }
    }
    out
}

fn format_professions(character: &CharacterSnapshot) -> String {
    if character.professions.is_empty() {
        return NO_PROFESSIONS.to_string();
    }
    character
        .professions
        .iter()
        .map(|p| format!("{} {}", p.skill, p.name))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn format_pvp(items: &[String]) -> String {
    if items.is_empty() {
        NO_PVP_ITEMS.to_string()
    } else {
        items
            .iter()
            .map(|i| format!("\n\t\t● {}", i))
            .collect::<String>()
    }
}

/// Builds reports from the armory and an item store
pub struct ReportBuilder<T, L> {
    client: ArmoryClient<T>,
    items: L,
}

impl<T: Transport, L: ItemLookup> ReportBuilder<T, L> {
    pub fn new(client: ArmoryClient<T>, items: L) -> Self {
        Self { client, items }
    }

    /// Item records for both the equipment list and the page's links
    async fn resolve_items(
        &self,
        page: &ArmoryPage,
        mut records: Vec<ItemRecord>,
    ) -> Result<Vec<ItemRecord>> {
        let known: HashSet<u32> = records.iter().map(|r| r.item_id).collect();
        let extra: Vec<u32> = page
            .item_ids()
            .into_iter()
            .filter(|id| !known.contains(id))
            .collect();
        if !extra.is_empty() {
            tracing::debug!("Resolving {} items only listed on the armory page", extra.len());
            records.extend(self.items.lookup(&extra).await?);
        }
        Ok(records)
    }

    /// Fetch and assemble the report for `name` on `realm`
    pub async fn build(
        &self,
        realm: &str,
        name: &str,
        options: ReportOptions,
    ) -> Result<CharacterReport> {
        if name.trim().is_empty() {
            return Err(ArmoryError::MissingName);
        }
        let name = normalize_name(name.trim());
        let realm = normalize_name(realm.trim());
        tracing::debug!("Building report for {} on {}", name, realm);

        let character = self.client.character(&name, &realm).await?;
        if !character.is_valid() {
            return Err(ArmoryError::CharacterNotFound { name, realm });
        }

        let ids = character.equipped_ids();
        let (page, records) = tokio::join!(
            self.client.armory_page(&name, &realm),
            self.items.lookup(&ids)
        );
        let page = page?;
        let records = self.resolve_items(&page, records?).await?;

        let gear = if character.equipment.is_empty() {
            tracing::warn!("{} has no equipment", name);
            None
        } else {
            Some(gearscore::calculate(&character, &records)?)
        };

        let enchants = missing_enchants(&page).enchants_message(&name);
        let gems = missing_gems(&page, &character, &records).gems_message(&name);
        let talents = format_talents(&character.talents);
        let armory = format!("[{}]({})", name, self.client.profile_url(&name, &realm));
        let guild_link = character
            .guild
            .as_deref()
            .map(|g| format!("[{}]({})", g, self.client.guild_url(g, &realm)));

        let achievements = if options.achievements {
            match self.client.achievements(&name, &realm).await {
                Ok(table) => Some(table.render()),
                Err(e) => {
                    tracing::warn!("Achievements for {} unavailable: {}", name, e);
                    Some(ACHIEVEMENTS_UNAVAILABLE.to_string())
                }
            }
        } else {
            None
        };

        let mut report = CharacterReport {
            name,
            realm,
            gear_score: gear.as_ref().map(|g| g.score),
            pvp_gear: gear.map(|g| g.pvp_items).unwrap_or_default(),
            character,
            enchants,
            gems,
            talents,
            armory,
            guild_link,
            achievements,
            summary: String::new(),
        };
        report.summary = compose_summary(&report);

        tracing::info!(
            "Report for {} on {} ready (gear score {:?})",
            report.name,
            report.realm,
            report.gear_score
        );
        Ok(report)
    }
}

fn compose_summary(report: &CharacterReport) -> String {
    let c = &report.character;
    let lines = [
        format!("Here is a summary for **{}**:", report.name),
        format!(
            "**Status**: {}",
            if c.online { "Online ✅" } else { "Offline ❌" }
        ),
        format!(
            "**Character**: Level {} {} {} - {}",
            c.level, c.race, c.class, c.faction
        ),
        format!(
            "**Guild**: {}",
            report
                .guild_link
                .clone()
                .unwrap_or_else(|| no_guild(&report.name))
        ),
        format!(
            "**Specs**: {}",
            if report.talents.is_empty() {
                NO_TALENTS
            } else {
                report.talents.as_str()
            }
        ),
        format!("**Professions**: {}", format_professions(c)),
        format!("**Achievement Points**: {} 🏆", c.achievementpoints),
        format!("**Honorable Kills**: {} 💀", c.honorablekills),
        format!(
            "**Gear Score**: {}",
            report
                .gear_score
                .map_or_else(|| NO_ITEMS.to_string(), |s| s.to_string())
        ),
        format!("**Enchants**: {}", report.enchants),
        format!("**Gems**: {}", report.gems),
        format!("**Armory**: {}", report.armory),
        format!("**PVP Items**: {}", format_pvp(&report.pvp_gear)),
        format!(
            "**Achievements**: Type !achievements {} or !achi {}",
            report.name, report.name
        ),
    ];
    lines.join("\n")
}
