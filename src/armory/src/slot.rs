//! Equipment slot descriptors.
//!
//! Both the character API's equipment array and the armory page list the
//! equipped items in this order. Everything downstream keys on [`Slot`]
//! instead of on raw positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of equipment slots
pub const SLOT_COUNT: usize = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Head,
    Neck,
    Shoulders,
    Cloak,
    Chest,
    Shirt,
    Tabard,
    Bracer,
    Gloves,
    Belt,
    Legs,
    Boots,
    Ring1,
    Ring2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
    Ranged,
}

/// All slots in page order
pub const SLOTS: [Slot; SLOT_COUNT] = [
    Slot::Head,
    Slot::Neck,
    Slot::Shoulders,
    Slot::Cloak,
    Slot::Chest,
    Slot::Shirt,
    Slot::Tabard,
    Slot::Bracer,
    Slot::Gloves,
    Slot::Belt,
    Slot::Legs,
    Slot::Boots,
    Slot::Ring1,
    Slot::Ring2,
    Slot::Trinket1,
    Slot::Trinket2,
    Slot::MainHand,
    Slot::OffHand,
    Slot::Ranged,
];

impl Slot {
    /// Slot at a page position
    pub fn from_index(index: usize) -> Option<Slot> {
        SLOTS.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Neck => "Neck",
            Self::Shoulders => "Shoulders",
            Self::Cloak => "Cloak",
            Self::Chest => "Chest",
            Self::Shirt => "Shirt",
            Self::Tabard => "Tabard",
            Self::Bracer => "Bracer",
            Self::Gloves => "Gloves",
            Self::Belt => "Belt",
            Self::Legs => "Legs",
            Self::Boots => "Boots",
            Self::Ring1 => "Ring #1",
            Self::Ring2 => "Ring #2",
            Self::Trinket1 => "Trinket #1",
            Self::Trinket2 => "Trinket #2",
            Self::MainHand => "Main-hand",
            Self::OffHand => "Off-hand",
            Self::Ranged => "Ranged",
        }
    }

    /// Slots whose items cannot carry an enchant at all
    pub fn is_enchantable(self) -> bool {
        !matches!(
            self,
            Self::Neck | Self::Shirt | Self::Tabard | Self::Belt | Self::Trinket1 | Self::Trinket2
        )
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Join slot names for a reply line
pub fn join_names(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}
