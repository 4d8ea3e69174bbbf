//! Vernacular name handling utility
//!
//! One absence rule for every component: a name is missing when it is not
//! in the record, blank after trimming, or the literal `"nan"` left behind by
//! the spreadsheet export.
//!
//! Two display policies are built on top of it:
//! 1. List view ([`project`]): requested language, else English, else `"-"`
//! 2. Detail grid ([`grid_value`]): requested language, else `"—"`

use crate::data::Entry;
use crate::language::Language;

/// Absence sentinel written by the export pipeline
pub const ABSENT_SENTINEL: &str = "nan";

/// List view placeholder when even the English name is missing
pub const LIST_PLACEHOLDER: &str = "-";

/// Detail grid marker for a language with no value
pub const GRID_PLACEHOLDER: &str = "—";

/// True when a name value should be treated as missing
pub fn is_absent(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => {
            let v = v.trim();
            v.is_empty() || v.eq_ignore_ascii_case(ABSENT_SENTINEL)
        }
    }
}

/// The value itself when present, `None` otherwise
pub fn usable(value: Option<&str>) -> Option<&str> {
    if is_absent(value) {
        None
    } else {
        value
    }
}

/// Best display name for the list view
///
/// Strictly two levels: requested language, then English. Never borrows a
/// third language.
pub fn project(entry: &Entry, language: Language) -> &str {
    entry
        .name(language)
        .or_else(|| entry.name(Language::English))
        .unwrap_or(LIST_PLACEHOLDER)
}

/// Exact value for one cell of the detail grid
pub fn grid_value(entry: &Entry, language: Language) -> &str {
    entry.name(language).unwrap_or(GRID_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryId;

    #[test]
    fn test_is_absent() {
        assert!(is_absent(None));
        assert!(is_absent(Some("")));
        assert!(is_absent(Some("   ")));
        assert!(is_absent(Some("nan")));
        assert!(is_absent(Some(" NaN ")));
        assert!(!is_absent(Some("Nanjil")));
        assert!(!is_absent(Some("வாழை")));
    }

    #[test]
    fn test_project_falls_back_to_english_only() {
        let entry = Entry::new(CategoryId::Vegetables, "Carrot")
            .with_name(Language::Tamil, "nan")
            .with_name(Language::Hindi, "गाजर");

        assert_eq!(project(&entry, Language::Hindi), "गाजर");
        assert_eq!(project(&entry, Language::Tamil), "Carrot");
        // Kannada missing: English, never Hindi
        assert_eq!(project(&entry, Language::Kannada), "Carrot");
        assert_eq!(project(&entry, Language::English), "Carrot");
    }

    #[test]
    fn test_project_placeholder_without_english() {
        let entry = Entry::new(CategoryId::Greens, "").with_name(Language::Telugu, "");
        assert_eq!(project(&entry, Language::Telugu), LIST_PLACEHOLDER);
    }

    #[test]
    fn test_grid_value_never_substitutes_english() {
        let entry = Entry::new(CategoryId::Fruits, "Banana").with_name(Language::Tamil, "வாழை");
        assert_eq!(grid_value(&entry, Language::Tamil), "வாழை");
        assert_eq!(grid_value(&entry, Language::Kannada), GRID_PLACEHOLDER);
        assert_eq!(grid_value(&entry, Language::English), "Banana");
    }
}
