//! Character snapshot from the character API.
//!
//! The API is loose about types (numbers arrive as strings, missing values
//! as `null` or empty strings), so every field deserializes leniently and a
//! response without a `name` is treated as "character not found".

use serde::{Deserialize, Deserializer, Serialize};

/// Capitalize the first letter and lowercase the rest.
///
/// The character API and the armory pages are case-sensitive, so names and
/// realms go through this before any remote call.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Base attributes and equipment of one character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSnapshot {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub realm: String,
    #[serde(deserialize_with = "de::boolean")]
    pub online: bool,
    #[serde(deserialize_with = "de::number")]
    pub level: u64,
    #[serde(deserialize_with = "de::string")]
    pub race: String,
    #[serde(deserialize_with = "de::string")]
    pub class: String,
    #[serde(deserialize_with = "de::string")]
    pub gender: String,
    #[serde(deserialize_with = "de::string")]
    pub faction: String,
    #[serde(deserialize_with = "de::optional_string")]
    pub guild: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub achievementpoints: u64,
    #[serde(deserialize_with = "de::number")]
    pub honorablekills: u64,
    #[serde(deserialize_with = "de::null_as_default")]
    pub talents: Vec<Talent>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub professions: Vec<Profession>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub equipment: Vec<EquippedItem>,
}

/// One talent specialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Talent {
    #[serde(deserialize_with = "de::string")]
    pub tree: String,
    pub points: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profession {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub skill: String,
}

/// An entry of the equipment array; its slot is implied by position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquippedItem {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub item: String,
    #[serde(deserialize_with = "de::optional_string")]
    pub transmog: Option<String>,
}

impl EquippedItem {
    pub fn item_id(&self) -> Option<u32> {
        self.item.trim().parse().ok()
    }
}

impl CharacterSnapshot {
    /// Parse an API response body
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// A response is usable only when it names the character
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Equipped item ids in equipment order, skipping unparseable entries
    pub fn equipped_ids(&self) -> Vec<u32> {
        self.equipment.iter().filter_map(EquippedItem::item_id).collect()
    }

    pub fn has_profession(&self, profession: &str) -> bool {
        self.professions
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(profession))
    }
}

mod de {
    use super::*;
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let s = string(deserializer)?;
        Ok(if s.trim().is_empty() { None } else { Some(s) })
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        })
    }

    pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_u64().is_some_and(|n| n != 0),
            Value::String(s) => matches!(s.trim(), "1" | "true" | "True"),
            _ => false,
        })
    }

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
