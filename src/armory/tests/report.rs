//! End-to-end report tests against an in-process armory and item store

use armory::{
    ArmoryClient, ArmoryError, CharacterReport, ReportBuilder, ReportOptions, Result, Slot,
    Transport,
};
use armory_idb::{
    ItemLookup, ItemRecord, MemoryDb, RepoError, RepoResult, ITEM_CLASS_ARMOR, ITEM_CLASS_WEAPON,
};
use std::cell::{Cell, RefCell};

const BASE: &str = "http://armory.test";

/// One equipped item: id, base score, class, subclass, inventory type,
/// canonical sockets, socketed gems on the page, enchanted on the page
struct Gear {
    id: u32,
    score: f64,
    class: i64,
    subclass: i64,
    item_type: i64,
    sockets: u32,
    socketed: u32,
    enchanted: bool,
}

const fn armor(id: u32, score: f64, item_type: i64, sockets: u32, socketed: u32, enchanted: bool) -> Gear {
    Gear {
        id,
        score,
        class: ITEM_CLASS_ARMOR,
        subclass: 3,
        item_type,
        sockets,
        socketed,
        enchanted,
    }
}

const fn weapon(id: u32, score: f64, subclass: i64, item_type: i64, enchanted: bool) -> Gear {
    Gear {
        id,
        score,
        class: ITEM_CLASS_WEAPON,
        subclass,
        item_type,
        sockets: 0,
        socketed: 0,
        enchanted,
    }
}

/// A hunter in page order: missing a legs and ranged enchant, one gem short on chest
const HUNTER_GEAR: [Gear; 19] = [
    armor(1001, 100.0, 1, 2, 2, true),
    armor(1002, 50.0, 2, 1, 1, false),
    armor(1003, 100.0, 3, 1, 1, true),
    armor(1004, 50.0, 16, 0, 0, true),
    armor(1005, 100.0, 5, 3, 2, true),
    armor(1006, 0.0, 4, 0, 0, false),
    armor(1007, 0.0, 19, 0, 0, false),
    armor(1008, 50.0, 9, 0, 1, true),
    armor(1009, 100.0, 10, 1, 1, true),
    armor(1010, 50.0, 6, 1, 2, false),
    armor(1011, 100.0, 7, 2, 2, false),
    armor(1012, 50.0, 8, 1, 1, true),
    armor(1013, 50.0, 11, 0, 0, false),
    armor(1014, 50.0, 11, 0, 0, false),
    armor(1015, 50.0, 12, 0, 0, false),
    armor(1016, 50.0, 12, 0, 0, false),
    weapon(1017, 100.0, 7, 13, true),
    weapon(1018, 100.0, 7, 13, true),
    weapon(1019, 100.0, 3, 26, false),
];

fn records(gear: &[Gear]) -> Vec<ItemRecord> {
    gear.iter()
        .map(|g| ItemRecord {
            item_id: g.id,
            name: format!("Item {}", g.id),
            gear_score: g.score,
            class: g.class,
            subclass: g.subclass,
            item_type: g.item_type,
            pvp: g.id == 1015,
            gems: g.sockets,
        })
        .collect()
}

fn character_json(name: &str, class: &str, guild: &str, gear: &[Gear]) -> String {
    let equipment: Vec<serde_json::Value> = gear
        .iter()
        .map(|g| serde_json::json!({"name": format!("Item {}", g.id), "item": g.id.to_string()}))
        .collect();
    serde_json::json!({
        "name": name,
        "realm": "Lordaeron",
        "online": true,
        "level": "80",
        "faction": "Horde",
        "gender": "Male",
        "race": "Orc",
        "class": class,
        "honorablekills": "4412",
        "guild": guild,
        "achievementpoints": "8450",
        "equipment": equipment,
        "talents": [
            {"tree": "Marksmanship", "points": [7, 57, 7]},
            {"tree": "Survival", "points": [0, 15, 56]}
        ],
        "professions": [
            {"name": "Leatherworking", "skill": "450"},
            {"name": "Skinning", "skill": "450"}
        ]
    })
    .to_string()
}

fn page_html(class_label: &str, professions: &[&str], gear: &[Gear]) -> String {
    let mut html = format!(
        r#"<html><body><div class="information"><div class="level-race-class">{}</div></div>
        <div class="profskills">"#,
        class_label
    );
    for p in professions {
        html.push_str(&format!(
            r#"<div class="stub"><div class="text">{}<span class="value">450</span></div></div>"#,
            p
        ));
    }
    html.push_str("</div><div class=\"item-left\">");
    for g in gear {
        let mut gems: Vec<String> = (0..g.socketed).map(|_| "40117".to_string()).collect();
        while gems.len() < 3 {
            gems.push("0".into());
        }
        let ench = if g.enchanted { "&amp;ench=3817" } else { "" };
        html.push_str(&format!(
            r#"<div class="item-slot"><div class="item-model"><a href="http://wotlk.cavernoftime.com/item={id}" rel="item={id}{ench}&amp;gems={gems}"><img src="x.png"></a></div></div>"#,
            id = g.id,
            ench = ench,
            gems = gems.join(":")
        ));
    }
    html.push_str("</div></body></html>");
    html
}

fn achievements_json(fragment: &str) -> String {
    serde_json::json!({ "content": fragment }).to_string()
}

/// Serves fixtures by URL and records every request
#[derive(Default)]
struct FakeArmory {
    character: String,
    page: String,
    /// Category id to fragment; unknown categories answer with no achievements
    achievements: Vec<(String, String)>,
    fail_page: bool,
    fail_achievements: bool,
    requests: RefCell<Vec<String>>,
}

impl Transport for FakeArmory {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(format!("GET {}", url));
        if url.contains("/api/character/") {
            Ok(self.character.clone())
        } else if self.fail_page {
            Err(ArmoryError::transport(url, "connection reset"))
        } else {
            Ok(self.page.clone())
        }
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        self.requests.borrow_mut().push(format!("POST {}", url));
        if self.fail_achievements {
            return Err(ArmoryError::transport(url, "timed out"));
        }
        let category = form
            .iter()
            .find(|(k, _)| *k == "category")
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();
        let fragment = self
            .achievements
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, f)| f.as_str())
            .unwrap_or("");
        Ok(achievements_json(fragment))
    }
}

fn hunter_armory() -> FakeArmory {
    FakeArmory {
        character: character_json("Koch", "Hunter", "Mad Men", &HUNTER_GEAR),
        page: page_html(
            "Level 80 Orc Hunter, Lordaeron",
            &["Leatherworking", "Skinning"],
            &HUNTER_GEAR,
        ),
        ..Default::default()
    }
}

async fn build(
    armory: &FakeArmory,
    items: &MemoryDb,
    name: &str,
    options: ReportOptions,
) -> Result<CharacterReport> {
    let builder = ReportBuilder::new(ArmoryClient::new(armory, BASE), items);
    builder.build("lordaeron", name, options).await
}

#[tokio::test]
async fn test_hunter_report() {
    let armory = hunter_armory();
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let report = build(&armory, &items, "kOCH", ReportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.name, "Koch");
    assert_eq!(report.realm, "Lordaeron");
    // 950 armor + 2 * 31.64 melee + 532.24 ranged
    assert_eq!(report.gear_score, Some(1546));
    assert_eq!(
        report.enchants,
        "Koch is missing enchants from: Legs, Ranged ❌"
    );
    assert_eq!(report.gems, "Koch needs to gem Chest ❌");
    assert_eq!(report.talents, "Marksmanship(7/57/7) and Survival(0/15/56)");
    assert_eq!(
        report.armory,
        "[Koch](http://armory.test/character/Koch/Lordaeron/)"
    );
    assert_eq!(
        report.guild_link.as_deref(),
        Some("[Mad Men](http://armory.test/guild/Mad+Men/Lordaeron)")
    );
    assert_eq!(report.pvp_gear, vec!["Trinket: Item 1015"]);
    assert_eq!(report.achievements, None);

    let requests = armory.requests.borrow();
    assert_eq!(
        requests[0],
        "GET http://armory.test/api/character/Koch/Lordaeron/"
    );
    assert!(requests.iter().all(|r| !r.starts_with("POST")));
}

#[tokio::test]
async fn test_summary_lines() {
    let armory = hunter_armory();
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let report = build(&armory, &items, "koch", ReportOptions::default())
        .await
        .unwrap();

    let summary = &report.summary;
    assert!(summary.starts_with("Here is a summary for **Koch**:\n"));
    assert!(summary.contains("**Status**: Online ✅"));
    assert!(summary.contains("**Character**: Level 80 Orc Hunter - Horde"));
    assert!(summary.contains("**Professions**: 450 Leatherworking and 450 Skinning"));
    assert!(summary.contains("**Gear Score**: 1546"));
    assert!(summary.contains("**PVP Items**: \n\t\t● Trinket: Item 1015"));
    assert!(summary.ends_with("**Achievements**: Type !achievements Koch or !achi Koch"));
}

#[tokio::test]
async fn test_report_is_deterministic() {
    let armory = hunter_armory();
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let first = build(&armory, &items, "koch", ReportOptions::default())
        .await
        .unwrap();
    let second = build(&armory, &items, "KOCH", ReportOptions::default())
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.summary, second.summary);
}

#[tokio::test]
async fn test_unknown_character() {
    let armory = FakeArmory {
        character: r#"{"error": "Character does not exist."}"#.into(),
        ..Default::default()
    };
    let items = MemoryDb::new();
    let err = build(&armory, &items, "nobody", ReportOptions::default())
        .await
        .unwrap_err();

    match &err {
        ArmoryError::CharacterNotFound { name, realm } => {
            assert_eq!(name, "Nobody");
            assert_eq!(realm, "Lordaeron");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.user_message().contains("Nobody"));
    // Nothing past the character API was touched
    assert_eq!(armory.requests.borrow().len(), 1);
}

#[tokio::test]
async fn test_missing_name() {
    let armory = hunter_armory();
    let items = MemoryDb::new();
    let err = build(&armory, &items, "  ", ReportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ArmoryError::MissingName));
    assert!(armory.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_naked_character() {
    let armory = FakeArmory {
        character: character_json("Koch", "Hunter", "", &[]),
        page: page_html("Level 80 Orc Hunter", &[], &[]),
        ..Default::default()
    };
    let items = MemoryDb::new();
    let report = build(&armory, &items, "koch", ReportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.gear_score, None);
    assert!(matches!(
        report.gear_score_reply(),
        Err(ArmoryError::NoEquipment { .. })
    ));
    assert_eq!(report.guild_link, None);
    assert_eq!(report.guild_reply(), "Koch doesn't have a guild");
    assert!(report.summary.contains("**Gear Score**: No items equipped"));
    assert!(report.summary.contains("**PVP Items**: None"));
}

#[tokio::test]
async fn test_items_missing_from_store_are_skipped() {
    let armory = hunter_armory();
    // Only the ranged weapon is known
    let items = MemoryDb::from_items(records(&HUNTER_GEAR[18..]));
    let report = build(&armory, &items, "koch", ReportOptions::default())
        .await
        .unwrap();
    assert_eq!(report.gear_score, Some(533));
    assert_eq!(report.gems, "Koch has gemmed all their items! ✅");
}

#[tokio::test]
async fn test_page_failure_is_a_transport_error() {
    let armory = FakeArmory {
        fail_page: true,
        ..hunter_armory()
    };
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let err = build(&armory, &items, "koch", ReportOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(err.user_message().contains("try again later"));
}

/// Item store that is down, optionally after answering `healthy_calls` lookups with nothing
struct FailingStore {
    healthy_calls: u32,
    calls: Cell<u32>,
}

impl FailingStore {
    fn new(healthy_calls: u32) -> Self {
        Self {
            healthy_calls,
            calls: Cell::new(0),
        }
    }
}

impl ItemLookup for FailingStore {
    async fn lookup(&self, _item_ids: &[u32]) -> RepoResult<Vec<ItemRecord>> {
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() <= self.healthy_calls {
            Ok(Vec::new())
        } else {
            Err(RepoError::Unavailable("database is locked".into()))
        }
    }
}

#[tokio::test]
async fn test_store_outage_is_a_lookup_error() {
    let armory = hunter_armory();
    let store = FailingStore::new(0);
    let builder = ReportBuilder::new(ArmoryClient::new(&armory, BASE), &store);
    let err = builder
        .build("lordaeron", "koch", ReportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ArmoryError::Lookup(_)));
    assert!(!err.is_retryable());
    assert!(err.user_message().contains("item database is unavailable"));
    assert_eq!(store.calls.get(), 1);
}

#[tokio::test]
async fn test_store_outage_while_resolving_page_items() {
    let armory = hunter_armory();
    // The equipment lookup finds nothing, so every page id is looked up again
    let store = FailingStore::new(1);
    let builder = ReportBuilder::new(ArmoryClient::new(&armory, BASE), &store);
    let err = builder
        .build("lordaeron", "koch", ReportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ArmoryError::Lookup(RepoError::Unavailable(_))));
    assert!(err.user_message().contains("item database is unavailable"));
    assert_eq!(store.calls.get(), 2);
}

#[tokio::test]
async fn test_offhand_for_casters() {
    let gear = [armor(2001, 200.0, 1, 0, 0, true), armor(2002, 100.0, 23, 0, 0, false)];
    let mut priest_page = page_html("Level 80 Human Priest", &[], &gear);
    // Pad the page so the second link lands in the off-hand position
    let filler: String = (0..16)
        .map(|_| r#"<div class="item-model"><a href="x"></a></div>"#)
        .collect();
    priest_page = priest_page.replacen(
        r#"<div class="item-slot"><div class="item-model"><a href="http://wotlk.cavernoftime.com/item=2002""#,
        &format!(
            r#"{}<div class="item-slot"><div class="item-model"><a href="http://wotlk.cavernoftime.com/item=2002""#,
            filler
        ),
        1,
    );
    let items = MemoryDb::from_items(records(&gear));

    let priest = FakeArmory {
        character: character_json("Cly", "Priest", "", &gear),
        page: priest_page.clone(),
        ..Default::default()
    };
    let report = build(&priest, &items, "cly", ReportOptions::default())
        .await
        .unwrap();
    assert_eq!(report.enchants, "Cly has all enchants! ✅");

    let warrior = FakeArmory {
        character: character_json("Cly", "Warrior", "", &gear),
        page: priest_page.replace("Priest", "Warrior"),
        ..Default::default()
    };
    let report = build(&warrior, &items, "cly", ReportOptions::default())
        .await
        .unwrap();
    assert_eq!(
        report.enchants,
        format!("Cly is missing enchants from: {} ❌", Slot::OffHand)
    );
}

#[tokio::test]
async fn test_achievements_table() {
    let armory = FakeArmory {
        achievements: vec![
            (
                "15042".into(),
                r#"<div class="achievement" id="ach4597"><div class="date">12/03/2023</div></div>
                   <div class="achievement" id="ach4584"></div>"#
                    .into(),
            ),
            (
                "14922".into(),
                r#"<div class="achievement" id="ach4817"><div class="date">01/05/2024</div></div>"#
                    .into(),
            ),
        ],
        ..hunter_armory()
    };
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let report = build(&armory, &items, "koch", ReportOptions { achievements: true })
        .await
        .unwrap();

    let table = report.achievements.clone().unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[3], "ICC    |   ❌   ✅   ❌   ❌");
    assert_eq!(lines[4], "RS     |   ❌   ❌   ❌   ✅");
    assert!(report.achievements_reply().starts_with("**Koch's achievements**:\n```fix"));

    let posts = armory
        .requests
        .borrow()
        .iter()
        .filter(|r| r.starts_with("POST http://armory.test/character/Koch/Lordaeron/achievements"))
        .count();
    assert_eq!(posts, 8);
}

#[tokio::test]
async fn test_achievements_failure_degrades() {
    let armory = FakeArmory {
        fail_achievements: true,
        ..hunter_armory()
    };
    let items = MemoryDb::from_items(records(&HUNTER_GEAR));
    let report = build(&armory, &items, "koch", ReportOptions { achievements: true })
        .await
        .unwrap();
    assert_eq!(
        report.achievements.as_deref(),
        Some("Error retrieving achievements. Please try again later.")
    );
    assert_eq!(report.gear_score, Some(1546));
}
