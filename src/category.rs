//! Category identifiers, localized labels and the canonical category map
//!
//! The six known categories have labels in every supported language.
//! Any other category key found in the dataset is kept verbatim and shown
//! without a localized label.

use crate::language::Language;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryId {
    Fruits,
    Vegetables,
    Greens,
    Tubers,
    Herbal,
    Units,
    /// Category key present in the data but outside the known set
    Other(String),
}

pub const KNOWN_CATEGORIES: [CategoryId; 6] = [
    CategoryId::Fruits,
    CategoryId::Vegetables,
    CategoryId::Greens,
    CategoryId::Tubers,
    CategoryId::Herbal,
    CategoryId::Units,
];

impl CategoryId {
    /// Map a dataset key to a category (exact match on the known keys)
    pub fn from_key(key: &str) -> Self {
        match key {
            "Fruits" => CategoryId::Fruits,
            "Vegetables" => CategoryId::Vegetables,
            "Greens" => CategoryId::Greens,
            "Tubers" => CategoryId::Tubers,
            "Herbal" => CategoryId::Herbal,
            "Units" => CategoryId::Units,
            other => CategoryId::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryId::Fruits => "Fruits",
            CategoryId::Vegetables => "Vegetables",
            CategoryId::Greens => "Greens",
            CategoryId::Tubers => "Tubers",
            CategoryId::Herbal => "Herbal",
            CategoryId::Units => "Units",
            CategoryId::Other(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CategoryId::Other(_))
    }

    /// Localized label; `None` for categories outside the known set
    pub fn label(&self, language: Language) -> Option<&'static str> {
        let labels: [&'static str; 6] = match self {
            CategoryId::Fruits => ["Fruits", "பழங்கள்", "పండ్లు", "फल", "ಹಣ್ಣುಗಳು", "പഴങ്ങൾ"],
            CategoryId::Vegetables => ["Vegetables", "காய்கறிகள்", "కూరగాయలు", "सब्जियाँ", "ತರಕಾರಿಗಳು", "പച്ചക്കറികൾ"],
            CategoryId::Greens => ["Greens", "கீரைகள்", "ఆకుకూరలు", "साग", "ಸೊಪ್ಪುಗಳು", "ഇലക്കറികൾ"],
            CategoryId::Tubers => ["Tubers", "கிழங்குகள்", "దుంపలు", "कंद", "ಗೆಡ್ಡೆಗಳು", "കിഴങ്ങുകൾ"],
            CategoryId::Herbal => ["Herbal", "மூலிகைகள்", "మూలికలు", "जड़ी-बूटियाँ", "ಗಿಡಮೂಲಿಕೆಗಳು", "ഔഷധസസ്യങ്ങൾ"],
            CategoryId::Units => ["Units", "அலகுகள்", "యూనిట్లు", "इकाइयाँ", "ಘಟಕಗಳು", "യൂണിറ്റുകൾ"],
            CategoryId::Other(_) => return None,
        };
        let idx = match language {
            Language::English => 0,
            Language::Tamil => 1,
            Language::Telugu => 2,
            Language::Hindi => 3,
            Language::Kannada => 4,
            Language::Malayalam => 5,
        };
        Some(labels[idx])
    }

    /// Localized label, or the raw key for unrecognized categories
    pub fn display_label(&self, language: Language) -> Cow<'_, str> {
        match self.label(language) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Borrowed(self.as_str()),
        }
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Canonical category map
// ============================================================================

static CANONICAL_ENTRIES: &[(CategoryId, &[&str])] = &[
    (CategoryId::Fruits, &["Papaya", "Banana", "Guava", "Pomegranate"]),
    (
        CategoryId::Vegetables,
        &[
            "Brinjal", "Bitter Gourd", "Bottle Gourd", "Pumpkin", "Bhendi (Okra)", "Carrot",
            "Cabbage", "Cauliflower", "Beans", "Beetroot", "Broccoli", "Moringa",
        ],
    ),
    (CategoryId::Greens, &["Palak", "Amaranthus", "Lettuce", "Spinach"]),
    (CategoryId::Tubers, &["Potato", "Sweet Potato", "Cassava"]),
    (
        CategoryId::Herbal,
        &["Ashwagandha", "Aloe Vera", "Tulsi", "Curry Leaves", "Fenugreek", "Vetiver", "Coriander"],
    ),
    (
        CategoryId::Units,
        &["Vermicompost Unit", "Poultry Unit", "Goat Unit", "Dairy Unit", "Azolla Unit"],
    ),
];

/// Frozen English name -> category map, built on first use
pub fn canonical_category_map() -> &'static FxHashMap<&'static str, CategoryId> {
    static MAP: OnceLock<FxHashMap<&'static str, CategoryId>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map = FxHashMap::default();
        for (category, names) in CANONICAL_ENTRIES {
            for name in names.iter() {
                map.insert(*name, category.clone());
            }
        }
        map
    })
}

/// Expected category for a canonical English name, if it is a known entry
pub fn expected_category(name: &str) -> Option<&'static CategoryId> {
    canonical_category_map().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_keeps_unknown_verbatim() {
        assert_eq!(CategoryId::from_key("Greens"), CategoryId::Greens);
        let other = CategoryId::from_key("Value-Added Products");
        assert_eq!(other.as_str(), "Value-Added Products");
        assert!(!other.is_known());
        assert_eq!(other.label(Language::Tamil), None);
        assert_eq!(other.display_label(Language::Tamil), "Value-Added Products");
    }

    #[test]
    fn test_labels() {
        assert_eq!(CategoryId::Fruits.label(Language::English), Some("Fruits"));
        assert_eq!(CategoryId::Fruits.label(Language::Tamil), Some("பழங்கள்"));
        for category in KNOWN_CATEGORIES.iter() {
            assert!(category.label(Language::Malayalam).is_some());
        }
    }

    #[test]
    fn test_canonical_map() {
        assert_eq!(expected_category("Bitter Gourd"), Some(&CategoryId::Vegetables));
        assert_eq!(expected_category("Azolla Unit"), Some(&CategoryId::Units));
        assert_eq!(expected_category("Dragon Fruit"), None);
        // case-sensitive on the canonical English name
        assert_eq!(expected_category("banana"), None);
        assert_eq!(canonical_category_map().len(), 35);
    }
}
