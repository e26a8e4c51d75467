//! Fixed classification tables: the three business-unit sheets and the
//! product category slugs understood by the WordPress plugin.

/// Business unit a product belongs to, stored upstream as a `product_sheet`
/// taxonomy term. The term ids are fixed in the WordPress install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Keln,
    Cocconiel,
    Signpost,
}

impl Sheet {
    pub const ALL: [Sheet; 3] = [Sheet::Keln, Sheet::Cocconiel, Sheet::Signpost];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Sheet::Keln => "keln",
            Sheet::Cocconiel => "cocconiel",
            Sheet::Signpost => "signpost",
        }
    }

    /// Taxonomy term id in the WordPress install.
    #[must_use]
    pub fn term_id(self) -> i64 {
        match self {
            Sheet::Keln => 3,
            Sheet::Cocconiel => 4,
            Sheet::Signpost => 5,
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Sheet> {
        Sheet::ALL.into_iter().find(|s| s.key() == key)
    }

    #[must_use]
    pub fn from_term_id(id: i64) -> Option<Sheet> {
        Sheet::ALL.into_iter().find(|s| s.term_id() == id)
    }
}

/// Category slug → display label, matching the plugin's taxonomy.
pub const CATEGORY_LABELS: [(&str, &str); 10] = [
    ("game-console", "game&console"),
    ("household", "Household goods"),
    ("toys", "Toys & Hobbies"),
    ("electronics", "electronic goods & Camera"),
    ("wristwatch", "wristwatch"),
    ("fishing", "fishing gear"),
    ("anime", "Animation Merchandise"),
    ("pokemon", "Pokémon"),
    ("fashion", "Fashion items"),
    ("other", "Other"),
];

#[must_use]
pub fn category_label(slug: &str) -> Option<&'static str> {
    CATEGORY_LABELS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
}

#[must_use]
pub fn is_known_category(slug: &str) -> bool {
    category_label(slug).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_keys_and_term_ids_round_trip() {
        for sheet in Sheet::ALL {
            assert_eq!(Sheet::from_key(sheet.key()), Some(sheet));
            assert_eq!(Sheet::from_term_id(sheet.term_id()), Some(sheet));
        }
    }

    #[test]
    fn sheet_term_ids_match_install() {
        assert_eq!(Sheet::Keln.term_id(), 3);
        assert_eq!(Sheet::Cocconiel.term_id(), 4);
        assert_eq!(Sheet::Signpost.term_id(), 5);
    }

    #[test]
    fn unknown_sheet_key_is_none() {
        assert_eq!(Sheet::from_key("warehouse"), None);
        assert_eq!(Sheet::from_term_id(99), None);
    }

    #[test]
    fn category_label_lookup() {
        assert_eq!(category_label("toys"), Some("Toys & Hobbies"));
        assert_eq!(category_label("pokemon"), Some("Pokémon"));
        assert_eq!(category_label("vintage"), None);
    }

    #[test]
    fn is_known_category_covers_all_slugs() {
        for (slug, _) in CATEGORY_LABELS {
            assert!(is_known_category(slug), "{slug} should be known");
        }
        assert!(!is_known_category(""));
    }
}
