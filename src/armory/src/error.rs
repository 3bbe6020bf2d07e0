//! Error taxonomy for the report pipeline.

use armory_idb::RepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArmoryError {
    /// The character API answered without a name for this character
    #[error("Character {name} not found in realm {realm}")]
    CharacterNotFound { name: String, realm: String },

    #[error("{name} has no items equipped")]
    NoEquipment { name: String },

    /// Network failure or non-success status after all retries
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Client error status; asking again gives the same answer
    #[error("Request to {url} was rejected with status {status}")]
    Rejected { url: String, status: u16 },

    /// The item reference store could not be reached
    #[error("Item lookup failed: {0}")]
    Lookup(#[from] RepoError),

    #[error("Invalid realm: {0}")]
    InvalidRealm(String),

    #[error("Character name is required")]
    MissingName,

    #[error("Unexpected response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ArmoryError>;

impl ArmoryError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Only transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Reply text shown to whoever asked for the report
    pub fn user_message(&self) -> String {
        match self {
            Self::CharacterNotFound { name, realm } => format!(
                "Unfortunately, the armory didn't return any information about {} from realm {}. Try again, please.",
                name, realm
            ),
            Self::NoEquipment { name } => format!(
                "{} does not have any items equipped. Maybe you typed the wrong name?",
                name
            ),
            Self::Transport { .. } | Self::Rejected { .. } | Self::Parse(_) => {
                "The armory is not responding right now. Please try again later.".to_string()
            }
            Self::Lookup(_) => {
                "The item database is unavailable right now. Please try again later.".to_string()
            }
            Self::InvalidRealm(realm) => format!("Invalid realm: {}", realm),
            Self::MissingName => "Character name is required".to_string(),
        }
    }
}
