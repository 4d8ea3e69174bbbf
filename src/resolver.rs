//! Entry Resolver
//!
//! Produces the display list for one category in one language. An entry
//! is dropped when any of these hold, checked in order:
//! 1. Its English name is the category's own name (a header row that
//!    leaked from the spreadsheet)
//! 2. Its English name is missing
//! 3. The field the language's list view depends on is missing
//!    (Tamil for English and Tamil cards)
//!
//! Languages that only exist in the UI resolve to
//! [`Resolution::NotYetAvailable`] so the caller can show a
//! "no data in this language yet" message instead of an empty grid.

use crate::category::CategoryId;
use crate::data::{CatalogSnapshot, Entry};
use crate::language::{Language, ListSupport};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Filtered entries in snapshot order
    Listed(Vec<&'a Entry>),
    /// The dataset has no names in this language yet
    NotYetAvailable(Language),
}

impl<'a> Resolution<'a> {
    /// Entries to display; always empty for an unavailable language
    pub fn entries(&self) -> &[&'a Entry] {
        match self {
            Resolution::Listed(entries) => entries,
            Resolution::NotYetAvailable(_) => &[],
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Resolution::Listed(_))
    }
}

/// Resolve the display list for `category` in `language`
pub fn resolve<'a>(
    snapshot: &'a CatalogSnapshot,
    category: &CategoryId,
    language: Language,
) -> Resolution<'a> {
    let required = match language.list_support() {
        ListSupport::RequiresField(required) => required,
        ListSupport::UiOnly => return Resolution::NotYetAvailable(language),
    };

    let entries = snapshot
        .entries_of(category)
        .iter()
        .filter(|entry| is_displayable(entry, category, required))
        .collect();

    Resolution::Listed(entries)
}

/// Whether `entry` survives the list filter for `category`
pub fn is_displayable(entry: &Entry, category: &CategoryId, required: Language) -> bool {
    if is_header_row(entry, category) {
        return false;
    }
    if entry.name(Language::English).is_none() {
        return false;
    }
    entry.name(required).is_some()
}

/// Whether `entry` is a real catalog item in any language: not a leaked
/// header row of the category it is filed under, and named in English
pub fn is_catalog_item(entry: &Entry) -> bool {
    !is_header_row(entry, &entry.category) && entry.name(Language::English).is_some()
}

/// English name equal to the category key (case-insensitive, trimmed)
pub fn is_header_row(entry: &Entry, category: &CategoryId) -> bool {
    entry.english().trim().eq_ignore_ascii_case(category.as_str().trim())
}
