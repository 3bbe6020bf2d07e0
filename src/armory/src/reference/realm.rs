//! Realms the armory serves

use crate::character::normalize_name;

/// Realm used when a command names none
pub const DEFAULT_REALM: &str = "Icecrown";

/// Realms known at build time
pub const DEFAULT_REALMS: &[&str] = &["Icecrown", "Lordaeron", "Frostmourne", "Blackrock", "Onyxia"];

/// Set of accepted realm names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Realms {
    names: Vec<String>,
}

impl Default for Realms {
    fn default() -> Self {
        Self::new(DEFAULT_REALMS.iter().copied())
    }
}

impl Realms {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| normalize_name(n.as_ref())).collect(),
        }
    }

    /// Normalize and check a realm name, returning the canonical spelling
    pub fn resolve(&self, realm: &str) -> Option<String> {
        let normalized = normalize_name(realm.trim());
        self.names.iter().find(|n| **n == normalized).cloned()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
