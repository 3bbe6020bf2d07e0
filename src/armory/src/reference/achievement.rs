//! Raid achievements shown in the achievements table

/// Raid rows of the achievements table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaidTier {
    IcecrownCitadel,
    RubySanctum,
    TrialOfTheCrusader,
    Ulduar,
}

/// All raid rows in display order
pub const RAIDS: &[RaidTier] = &[
    RaidTier::IcecrownCitadel,
    RaidTier::RubySanctum,
    RaidTier::TrialOfTheCrusader,
    RaidTier::Ulduar,
];

impl RaidTier {
    /// Short label used for keys and table rows
    pub fn label(self) -> &'static str {
        match self {
            Self::IcecrownCitadel => "ICC",
            Self::RubySanctum => "RS",
            Self::TrialOfTheCrusader => "TOC",
            Self::Ulduar => "ULDUAR",
        }
    }
}

/// A raid completion achievement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidAchievement {
    /// Table key, e.g. "ICC25HC"
    pub key: &'static str,
    pub raid: RaidTier,
    pub size: u8,
    pub heroic: bool,
    pub id: u32,
}

impl RaidAchievement {
    /// DOM id of the achievement node on the armory page
    pub fn node_id(&self) -> String {
        format!("ach{}", self.id)
    }
}

/// Achievement categories fetched from the armory, as (name, category id)
pub const ACHIEVEMENT_CATEGORIES: &[(&str, u32)] = &[
    ("ULDUAR10", 14961),
    ("ULDUAR25", 14962),
    ("TOC10", 15001),
    ("TOC25", 15002),
    ("ICC10", 15041),
    ("ICC25", 15042),
    ("RS10", 14922),
    ("RS25", 14923),
];

macro_rules! raid {
    ($key:literal, $raid:ident, $size:literal, $heroic:literal, $id:literal) => {
        RaidAchievement {
            key: $key,
            raid: RaidTier::$raid,
            size: $size,
            heroic: $heroic,
            id: $id,
        }
    };
}

/// Completion achievements per raid, size and difficulty
pub const RAID_ACHIEVEMENTS: &[RaidAchievement] = &[
    raid!("ICC10", IcecrownCitadel, 10, false, 4530),
    raid!("ICC25", IcecrownCitadel, 25, false, 4597),
    raid!("ICC10HC", IcecrownCitadel, 10, true, 4583),
    raid!("ICC25HC", IcecrownCitadel, 25, true, 4584),
    raid!("RS10", RubySanctum, 10, false, 4817),
    raid!("RS25", RubySanctum, 25, false, 4815),
    raid!("RS10HC", RubySanctum, 10, true, 4818),
    raid!("RS25HC", RubySanctum, 25, true, 4816),
    raid!("TOC10", TrialOfTheCrusader, 10, false, 3917),
    raid!("TOC25", TrialOfTheCrusader, 25, false, 3916),
    raid!("TOC10HC", TrialOfTheCrusader, 10, true, 3918),
    raid!("TOC25HC", TrialOfTheCrusader, 25, true, 3812),
    raid!("ULDUAR10", Ulduar, 10, false, 2894),
    raid!("ULDUAR25", Ulduar, 25, false, 2895),
    raid!("ULDUAR10HC", Ulduar, 10, true, 3159),
    raid!("ULDUAR25HC", Ulduar, 25, true, 3164),
];
