//! Catalog Data Loading and Storage
//!
//! Parses the denormalized catalog document
//! `{ "Fruits": [ { "English": .., "Tamil": .., .. }, .. ], .. }`
//! into an immutable [`CatalogSnapshot`], and holds the live snapshot in a
//! [`CatalogStore`] that readers load and reloads replace wholesale.
//!
//! Loading is all-or-nothing: any shape error fails the whole document.

use crate::category::CategoryId;
use crate::error::{CatalogError, Result};
use crate::language::{Language, ALL_LANGUAGES};
use crate::utils::vernacular::usable;
use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Column names the botanical name may arrive under
const BOTANICAL_COLUMNS: [&str; 2] = ["BOTANICAL NAME", "Botanical Name"];

// ============================================================================
// Entry
// ============================================================================

/// One catalog record: per-language names plus the category it was filed under
///
/// Values are stored trimmed but otherwise verbatim, including the `"nan"`
/// sentinel; absence is decided on read by [`usable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub category: CategoryId,
    names: FxHashMap<Language, String>,
    botanical_name: Option<String>,
}

impl Entry {
    pub fn new(category: CategoryId, english: &str) -> Self {
        let mut names = FxHashMap::default();
        names.insert(Language::English, english.trim().to_string());
        Self {
            category,
            names,
            botanical_name: None,
        }
    }

    pub fn with_name(mut self, language: Language, value: &str) -> Self {
        self.names.insert(language, value.trim().to_string());
        self
    }

    pub fn with_botanical_name(mut self, value: &str) -> Self {
        self.botanical_name = Some(value.trim().to_string());
        self
    }

    /// Build an entry from one JSON record of the source document
    ///
    /// Numbers and booleans are stringified, `null` and nested values count
    /// as missing. Columns other than the six languages and the botanical
    /// name (e.g. `S.No`) are ignored.
    pub fn from_record(category: CategoryId, record: &Map<String, Value>) -> Self {
        let mut names = FxHashMap::default();
        for language in ALL_LANGUAGES {
            if let Some(value) = record.get(language.label()).and_then(scalar_text) {
                names.insert(language, value);
            }
        }

        let botanical_name = BOTANICAL_COLUMNS
            .iter()
            .find_map(|column| record.get(*column).and_then(scalar_text));

        Self {
            category,
            names,
            botanical_name,
        }
    }

    /// Canonical English name ("" when the record has none)
    pub fn english(&self) -> &str {
        self.names
            .get(&Language::English)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Stored value for a language, sentinel included
    pub fn raw_name(&self, language: Language) -> Option<&str> {
        self.names.get(&language).map(|s| s.as_str())
    }

    /// Value for a language if it is present and not the absence sentinel
    pub fn name(&self, language: Language) -> Option<&str> {
        usable(self.raw_name(language))
    }

    pub fn botanical_name(&self) -> Option<&str> {
        usable(self.botanical_name.as_deref())
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for language in ALL_LANGUAGES {
            if let Some(value) = self.names.get(&language) {
                map.serialize_entry(language.label(), value)?;
            }
        }
        if let Some(botanical) = &self.botanical_name {
            map.serialize_entry(BOTANICAL_COLUMNS[0], botanical)?;
        }
        map.end()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Immutable category -> entries mapping in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    categories: Vec<(CategoryId, Vec<Entry>)>,
}

impl CatalogSnapshot {
    pub fn new(categories: Vec<(CategoryId, Vec<Entry>)>) -> Self {
        Self { categories }
    }

    /// Parse a catalog document from raw bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    /// Read and parse a catalog document from disk
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CatalogError::data_unavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let document = value.as_object().ok_or_else(|| {
            CatalogError::data_unavailable("Expected a JSON object keyed by category")
        })?;

        let mut categories = Vec::with_capacity(document.len());
        for (key, items) in document {
            let items = items.as_array().ok_or_else(|| {
                CatalogError::data_unavailable(format!("Category {} is not a list of entries", key))
            })?;

            let category = CategoryId::from_key(key);
            let mut entries = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let record = item.as_object().ok_or_else(|| {
                    CatalogError::data_unavailable(format!(
                        "Entry {} of category {} is not an object",
                        idx, key
                    ))
                })?;
                entries.push(Entry::from_record(category.clone(), record));
            }
            categories.push((category, entries));
        }

        Ok(Self { categories })
    }

    /// Every category key in the document, recognized or not
    pub fn categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter().map(|(category, _)| category)
    }

    /// Entries filed under `category`; empty for categories not in the document
    pub fn entries_of(&self, category: &CategoryId) -> &[Entry] {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Same as [`entries_of`](Self::entries_of), by raw dataset key
    pub fn entries_of_key(&self, key: &str) -> &[Entry] {
        self.entries_of(&CategoryId::from_key(key))
    }

    /// All entries across categories, in document order
    pub fn iter_entries(&self) -> impl Iterator<Item = &Entry> {
        self.categories.iter().flat_map(|(_, entries)| entries.iter())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn total_entries(&self) -> usize {
        self.categories.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Per-category entry counts (raw, before any display filtering)
    pub fn category_counts(&self) -> Vec<(&CategoryId, usize)> {
        self.categories
            .iter()
            .map(|(category, entries)| (category, entries.len()))
            .collect()
    }
}

impl Serialize for CatalogSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, entries) in &self.categories {
            map.serialize_entry(category.as_str(), entries)?;
        }
        map.end()
    }
}

// ============================================================================
// Store
// ============================================================================

/// Live snapshot tagged with the generation it was installed under
struct Live {
    generation: u64,
    snapshot: Arc<CatalogSnapshot>,
}

/// Holder of the live snapshot
///
/// Readers get an `Arc` to a complete snapshot; a reload builds a new
/// snapshot off to the side and swaps the pointer, so no reader observes a
/// partially loaded catalog. Every swap gets a fresh generation, which
/// callers use to key anything derived from a snapshot. Reload sequencing
/// (fetch then swap) is the caller's to serialize.
pub struct CatalogStore {
    current: ArcSwap<Live>,
    next_generation: AtomicU64,
}

impl CatalogStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(Live {
                generation: 0,
                snapshot: Arc::new(snapshot),
            }),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Current snapshot; stays valid even if a reload swaps it out meanwhile
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.load().snapshot)
    }

    /// Current snapshot together with its generation, read atomically
    pub fn current(&self) -> (u64, Arc<CatalogSnapshot>) {
        let live = self.current.load();
        (live.generation, Arc::clone(&live.snapshot))
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    /// Swap in a fully built snapshot, returning the previous one
    pub fn replace(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let previous = self.current.swap(Arc::new(Live {
            generation,
            snapshot: Arc::new(snapshot),
        }));
        Arc::clone(&previous.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "Vegetables": [
                {"S.No": 1, "English": " Carrot ", "Tamil": "nan"},
                {"S.No": 2, "English": "Beans", "Tamil": "பீன்ஸ்", "BOTANICAL NAME": "Phaseolus vulgaris"}
            ],
            "Fruits": [
                {"English": "Banana", "Tamil": "வாழை", "Kannada": null}
            ],
            "Value-Added Products": []
        })
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let snapshot = CatalogSnapshot::from_value(&sample()).unwrap();
        let keys: Vec<&str> = snapshot.categories().map(|c| c.as_str()).collect();
        assert_eq!(keys, vec!["Vegetables", "Fruits", "Value-Added Products"]);

        let veg: Vec<&str> = snapshot.entries_of(&CategoryId::Vegetables).iter().map(|e| e.english()).collect();
        assert_eq!(veg, vec!["Carrot", "Beans"]);
        assert_eq!(snapshot.total_entries(), 3);
    }

    #[test]
    fn test_entry_fields() {
        let snapshot = CatalogSnapshot::from_value(&sample()).unwrap();
        let carrot = &snapshot.entries_of_key("Vegetables")[0];
        assert_eq!(carrot.raw_name(Language::Tamil), Some("nan"));
        assert_eq!(carrot.name(Language::Tamil), None);
        assert_eq!(carrot.botanical_name(), None);

        let beans = &snapshot.entries_of_key("Vegetables")[1];
        assert_eq!(beans.botanical_name(), Some("Phaseolus vulgaris"));
        assert_eq!(beans.category, CategoryId::Vegetables);

        let banana = &snapshot.entries_of_key("Fruits")[0];
        assert_eq!(banana.raw_name(Language::Kannada), None);
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let snapshot = CatalogSnapshot::from_value(&sample()).unwrap();
        assert!(snapshot.entries_of(&CategoryId::Tubers).is_empty());
        assert!(snapshot.entries_of_key("Nope").is_empty());
        assert!(snapshot.entries_of_key("Value-Added Products").is_empty());
    }

    #[test]
    fn test_bad_shape_fails_whole_load() {
        let not_object = CatalogSnapshot::from_value(&json!([1, 2]));
        assert!(matches!(not_object, Err(CatalogError::DataUnavailable(_))));

        let not_list = CatalogSnapshot::from_value(&json!({"Fruits": {"English": "Banana"}}));
        assert!(matches!(not_list, Err(CatalogError::DataUnavailable(_))));

        let bad_item = CatalogSnapshot::from_value(&json!({
            "Fruits": [{"English": "Banana"}],
            "Greens": ["Palak"]
        }));
        assert!(matches!(bad_item, Err(CatalogError::DataUnavailable(_))));

        let garbage = CatalogSnapshot::from_json_slice(b"{ not json");
        assert!(matches!(garbage, Err(CatalogError::DataUnavailable(_))));
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let result = CatalogSnapshot::load_file("/definitely/not/here/crops_data.json");
        assert!(matches!(result, Err(CatalogError::DataUnavailable(_))));
    }

    #[test]
    fn test_store_swap_keeps_old_readers_valid() {
        let store = CatalogStore::new(CatalogSnapshot::from_value(&sample()).unwrap());
        let before = store.snapshot();

        let previous = store.replace(CatalogSnapshot::default());
        assert_eq!(previous.total_entries(), 3);
        assert_eq!(before.total_entries(), 3);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_each_replace_gets_new_generation() {
        let store = CatalogStore::new(CatalogSnapshot::from_value(&sample()).unwrap());
        let (first, snapshot) = store.current();
        assert_eq!(snapshot.total_entries(), 3);

        store.replace(CatalogSnapshot::default());
        let (second, snapshot) = store.current();
        assert_ne!(first, second);
        assert!(snapshot.is_empty());

        store.replace(CatalogSnapshot::from_value(&sample()).unwrap());
        assert_ne!(store.generation(), first);
        assert_ne!(store.generation(), second);
    }

    #[test]
    fn test_serialize_round_shape() {
        let snapshot = CatalogSnapshot::from_value(&sample()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["Vegetables"][1]["English"], "Beans");
        assert_eq!(value["Vegetables"][1]["BOTANICAL NAME"], "Phaseolus vulgaris");
        assert!(value["Value-Added Products"].as_array().unwrap().is_empty());
    }
}
