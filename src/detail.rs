//! Detail Assembler
//!
//! Builds the full record shown when a card is opened: canonical name,
//! botanical name, the six-language name grid and the resolved image.
//! Grid cells show `"—"` for a missing language instead of substituting
//! English, so the reader sees exactly which translations exist.

use crate::assets::{AssetProbe, AssetResolver};
use crate::category::CategoryId;
use crate::data::{CatalogSnapshot, Entry};
use crate::error::{CatalogError, Result};
use crate::language::{Language, ALL_LANGUAGES};
use crate::resolver::is_catalog_item;
use crate::utils::vernacular::grid_value;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Ordered language -> name grid, serialized as a JSON object keyed by label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGrid(Vec<(Language, String)>);

impl LanguageGrid {
    pub fn from_entry(entry: &Entry) -> Self {
        Self(
            ALL_LANGUAGES
                .iter()
                .map(|&language| (language, grid_value(entry, language).to_string()))
                .collect(),
        )
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| *l == language)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> {
        self.0.iter().map(|(l, value)| (*l, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LanguageGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, value) in &self.0 {
            map.serialize_entry(language.label(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub name: String,
    pub category: CategoryId,
    pub botanical_name: Option<String>,
    pub language_grid: LanguageGrid,
    /// Resolved image, or the placeholder when none exists
    pub image_path: String,
    pub image_found: bool,
}

/// Find an entry by exact English name, falling back to exact Tamil name
///
/// English matches win over Tamil matches anywhere in the catalog; within
/// each pass the first entry in snapshot order is returned. Header rows and
/// rows without an English name are never matched.
pub fn find_entry<'a>(snapshot: &'a CatalogSnapshot, name: &str) -> Option<&'a Entry> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let items = || snapshot.iter_entries().filter(|entry| is_catalog_item(entry));
    items()
        .find(|entry| entry.name(Language::English) == Some(name))
        .or_else(|| items().find(|entry| entry.name(Language::Tamil) == Some(name)))
}

/// Assemble the detail record for `name`
pub fn assemble<P: AssetProbe>(
    snapshot: &CatalogSnapshot,
    assets: &AssetResolver<P>,
    name: &str,
) -> Result<DetailRecord> {
    let entry = find_entry(snapshot, name).ok_or_else(|| CatalogError::entry_not_found(name))?;

    let image = assets.resolve_or_placeholder(entry.category.as_str(), entry.english());

    Ok(DetailRecord {
        name: entry.english().to_string(),
        category: entry.category.clone(),
        botanical_name: entry.botanical_name().map(str::to_string),
        language_grid: LanguageGrid::from_entry(entry),
        image_path: image.path,
        image_found: image.found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::vernacular::GRID_PLACEHOLDER;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            (
                CategoryId::Fruits,
                vec![
                    Entry::new(CategoryId::Fruits, "Fruits").with_name(Language::Tamil, "பழங்கள்"),
                    Entry::new(CategoryId::Fruits, "Banana")
                        .with_name(Language::Tamil, "வாழை")
                        .with_name(Language::Hindi, "केला")
                        .with_name(Language::Kannada, "nan")
                        .with_botanical_name("Musa paradisiaca"),
                ],
            ),
            (
                CategoryId::Vegetables,
                vec![
                    Entry::new(CategoryId::Vegetables, "Beans").with_name(Language::Tamil, "பீன்ஸ்"),
                    Entry::new(CategoryId::Vegetables, "Banana Flower").with_name(Language::Tamil, "Banana"),
                    Entry::new(CategoryId::Vegetables, "nan").with_name(Language::Tamil, "தெரியாது"),
                ],
            ),
        ])
    }

    fn resolver() -> AssetResolver<impl Fn(&str) -> bool> {
        AssetResolver::new(
            |path: &str| path == "images/fruits/banana/b1.jpg",
            vec!["jpg".to_string()],
            "images/placeholder.png",
        )
    }

    #[test]
    fn test_assemble_by_english_name() {
        let detail = assemble(&snapshot(), &resolver(), "Banana").unwrap();
        assert_eq!(detail.name, "Banana");
        assert_eq!(detail.category, CategoryId::Fruits);
        assert_eq!(detail.botanical_name.as_deref(), Some("Musa paradisiaca"));
        assert_eq!(detail.image_path, "images/fruits/banana/b1.jpg");
        assert!(detail.image_found);
    }

    #[test]
    fn test_grid_marks_each_missing_language() {
        let detail = assemble(&snapshot(), &resolver(), "Banana").unwrap();
        let grid = &detail.language_grid;
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.get(Language::English), Some("Banana"));
        assert_eq!(grid.get(Language::Tamil), Some("வாழை"));
        assert_eq!(grid.get(Language::Hindi), Some("केला"));
        assert_eq!(grid.get(Language::Kannada), Some(GRID_PLACEHOLDER));
        assert_eq!(grid.get(Language::Telugu), Some(GRID_PLACEHOLDER));
        assert_eq!(grid.get(Language::Malayalam), Some(GRID_PLACEHOLDER));

        let labels: Vec<Language> = grid.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ALL_LANGUAGES.to_vec());
    }

    #[test]
    fn test_lookup_by_tamil_name() {
        let detail = assemble(&snapshot(), &resolver(), "பீன்ஸ்").unwrap();
        assert_eq!(detail.name, "Beans");
        assert_eq!(detail.image_path, "images/placeholder.png");
        assert!(!detail.image_found);
    }

    #[test]
    fn test_english_match_wins_over_tamil() {
        let snap = snapshot();
        let entry = find_entry(&snap, "Banana").unwrap();
        assert_eq!(entry.category, CategoryId::Fruits);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(find_entry(&snapshot(), "banana").is_none());
    }

    #[test]
    fn test_unknown_entry() {
        let result = assemble(&snapshot(), &resolver(), "Unknown Crop");
        assert!(matches!(result, Err(CatalogError::EntryNotFound(name)) if name == "Unknown Crop"));
    }

    #[test]
    fn test_grid_serializes_in_layout_order() {
        let detail = assemble(&snapshot(), &resolver(), "Banana").unwrap();
        let json = serde_json::to_string(&detail.language_grid).unwrap();
        let english = json.find("English").unwrap();
        let malayalam = json.find("Malayalam").unwrap();
        assert!(english < malayalam);
    }

    #[test]
    fn test_header_and_nameless_rows_are_not_found() {
        let snap = snapshot();
        assert!(find_entry(&snap, "Fruits").is_none());
        assert!(find_entry(&snap, "பழங்கள்").is_none());
        assert!(find_entry(&snap, "தெரியாது").is_none());
        assert!(matches!(
            assemble(&snap, &resolver(), "Fruits"),
            Err(CatalogError::EntryNotFound(_))
        ));
    }
}
