//! # armory
//!
//! Character report pipeline for a WotLK private-server armory.
//!
//! This library provides functionality to:
//! - Load a character snapshot from the character API
//! - Scrape per-slot gem and enchant state from the armory profile page
//! - Compute gear score against an item reference store
//! - Report missing enchants and gems by slot
//! - Build the raid achievements table
//!
//! ## Example
//!
//! ```no_run
//! use armory::{ArmoryClient, ClientConfig, ReportBuilder, ReportOptions, UreqTransport};
//! use armory_idb::MemoryDb;
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! let client = ArmoryClient::new(UreqTransport::with_retries(&config), config.base_url.clone());
//! let items = MemoryDb::from_json_file(Path::new("share/items.json"))?;
//!
//! let builder = ReportBuilder::new(client, items);
//! let report = builder.build("Lordaeron", "koch", ReportOptions::default()).await?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

pub mod achievements;
pub mod armory_page;
pub mod character;
pub mod client;
pub mod compliance;
pub mod error;
pub mod gearscore;
pub mod html;
pub mod reference;
pub mod report;
pub mod slot;

#[doc(inline)]
pub use achievements::{AchievementTable, ACHIEVEMENTS_UNAVAILABLE};
#[doc(inline)]
pub use armory_page::{ArmoryPage, SlotLink};
#[doc(inline)]
pub use character::{normalize_name, CharacterSnapshot, EquippedItem, Profession, Talent};
#[doc(inline)]
pub use client::{ArmoryClient, ClientConfig, Retrying, Transport, UreqTransport};
#[doc(inline)]
pub use compliance::{missing_enchants, missing_gems, SlotReport};
#[doc(inline)]
pub use error::{ArmoryError, Result};
#[doc(inline)]
pub use gearscore::GearScore;
#[doc(inline)]
pub use report::{format_talents, CharacterReport, ReportBuilder, ReportOptions};
#[doc(inline)]
pub use slot::{Slot, SLOTS, SLOT_COUNT};

// Reference data (classes, realms, inventory types, raid achievements)
#[doc(inline)]
pub use reference::{Realms, DEFAULT_REALM, DEFAULT_REALMS};
