//! Supported display languages
//!
//! The dataset carries exactly six name columns. English is the canonical
//! key; Tamil is the only translation populated across the dataset, so the
//! list view is restricted for the languages that only exist in the UI.

use crate::error::CatalogError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Language {
    English,
    Tamil,
    Telugu,
    Hindi,
    Kannada,
    Malayalam,
}

/// Fixed grid layout used by the detail view
pub const ALL_LANGUAGES: [Language; 6] = [
    Language::English,
    Language::Tamil,
    Language::Telugu,
    Language::Hindi,
    Language::Kannada,
    Language::Malayalam,
];

/// How the list view treats a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSupport {
    /// Entries are kept only when this language's field is usable
    RequiresField(Language),
    /// No data in this language yet; the list is empty by construction
    UiOnly,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Hindi => "hi",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
        }
    }

    /// Column name in the source dataset, also the detail grid label
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Hindi => "हिन्दी",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Malayalam => "മലയാളം",
        }
    }

    /// English and Tamil cards both show the Tamil name, so both filter on it.
    pub fn list_support(&self) -> ListSupport {
        match self {
            Language::English | Language::Tamil => ListSupport::RequiresField(Language::Tamil),
            Language::Malayalam => ListSupport::RequiresField(Language::Malayalam),
            Language::Telugu | Language::Hindi | Language::Kannada => ListSupport::UiOnly,
        }
    }

    /// Parse a code (`ta`) or dataset label (`Tamil`), case-insensitive
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        let normalized = value.trim().to_ascii_lowercase();
        ALL_LANGUAGES
            .iter()
            .copied()
            .find(|lang| normalized == lang.code() || normalized == lang.label().to_ascii_lowercase())
            .ok_or_else(|| CatalogError::UnsupportedLanguage(value.to_string()))
    }

    /// Parse, treating an unknown language as a caller bug that defaults to English
    pub fn parse_or_english(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Language::English;
        };
        match Language::parse(value) {
            Ok(lang) => lang,
            Err(e) => {
                tracing::warn!("{}; falling back to English", e);
                Language::English
            }
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
