//! Inventory type codes

/// Inventory type information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryType {
    pub code: i64,
    pub name: &'static str,
}

/// Ranged weapons held in the right hand (guns, crossbows, wands)
pub const INV_TYPE_RANGED_RIGHT: i64 = 26;

/// Melee weapon types a hunter only carries for stats: one-hand, two-hand,
/// main hand and off hand
pub const HUNTER_OFF_STAT_WEAPON_TYPES: &[i64] = &[13, 17, 21, 22];

/// All inventory types
pub const INVENTORY_TYPES: &[InventoryType] = &[
    InventoryType { code: 0, name: "Non-equippable" },
    InventoryType { code: 1, name: "Head" },
    InventoryType { code: 2, name: "Neck" },
    InventoryType { code: 3, name: "Shoulder" },
    InventoryType { code: 4, name: "Shirt" },
    InventoryType { code: 5, name: "Chest" },
    InventoryType { code: 6, name: "Waist" },
    InventoryType { code: 7, name: "Legs" },
    InventoryType { code: 8, name: "Feet" },
    InventoryType { code: 9, name: "Wrists" },
    InventoryType { code: 10, name: "Hands" },
    InventoryType { code: 11, name: "Finger" },
    InventoryType { code: 12, name: "Trinket" },
    InventoryType { code: 13, name: "One-Hand" },
    InventoryType { code: 14, name: "Shield" },
    InventoryType { code: 15, name: "Ranged" },
    InventoryType { code: 16, name: "Back" },
    InventoryType { code: 17, name: "Two-Hand" },
    InventoryType { code: 18, name: "Bag" },
    InventoryType { code: 19, name: "Tabard" },
    InventoryType { code: 20, name: "Robe" },
    InventoryType { code: 21, name: "Main Hand" },
    InventoryType { code: 22, name: "Off Hand" },
    InventoryType { code: 23, name: "Held In Off-hand" },
    InventoryType { code: 24, name: "Ammo" },
    InventoryType { code: 25, name: "Thrown" },
    InventoryType { code: 26, name: "Ranged" },
    InventoryType { code: 27, name: "Quiver" },
    InventoryType { code: 28, name: "Relic" },
];

/// Get inventory type by code
pub fn inventory_type_by_code(code: i64) -> Option<&'static InventoryType> {
    INVENTORY_TYPES.iter().find(|t| t.code == code)
}

/// Display name for a code, "Unknown" when the code is not in the table
pub fn inventory_type_name(code: i64) -> &'static str {
    inventory_type_by_code(code).map_or("Unknown", |t| t.name)
}
