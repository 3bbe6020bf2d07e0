//! Playable classes

/// Classes that usually hold an off-hand frill or relic, which takes no enchant
pub const OFFHAND_CASTERS: &[&str] = &["mage", "warlock", "druid", "priest"];

/// Loose class match against a page label.
///
/// The armory renders the class inside a longer label such as
/// "80 Blood Elf Hunter", so this is a case-insensitive substring test.
pub fn class_in_label(label: &str, class: &str) -> bool {
    label
        .to_lowercase()
        .contains(&class.to_lowercase())
}

pub fn is_hunter(label: &str) -> bool {
    class_in_label(label, "hunter")
}

pub fn is_offhand_caster(label: &str) -> bool {
    OFFHAND_CASTERS.iter().any(|c| class_in_label(label, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_matching() {
        assert!(is_hunter("Level 80 Orc Hunter, Icecrown"));
        assert!(is_hunter("80 dwarf HUNTER"));
        assert!(!is_hunter("80 Human Warrior"));
        assert!(is_offhand_caster("80 Undead Priest"));
        assert!(is_offhand_caster("80 Tauren Druid"));
        assert!(!is_offhand_caster("80 Human Warrior"));
        assert!(!is_offhand_caster(""));
    }
}
