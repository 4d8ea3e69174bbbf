//! Error types for the catalog resolution layer
//!
//! - `DataUnavailable`: load-time, fatal to serving until the next reload
//! - `EntryNotFound`: detail lookup on an unknown name
//! - `AssetNotFound`: no image on disk; callers substitute a placeholder
//! - `UnsupportedLanguage`: language outside the fixed set; callers fall back to English

use thiserror::Error;

/// Errors raised by the catalog core
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source unreachable or not shaped as `{ category: [ {..}, .. ] }`
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// No entry with this English or Tamil name in any category
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Neither the primary nor the fallback image candidate exists
    #[error("No image asset for {name} in {category}")]
    AssetNotFound { category: String, name: String },

    /// Language code or label outside the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl CatalogError {
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable(message.into())
    }

    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound(name.into())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::DataUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::DataUnavailable(format!("Invalid catalog JSON: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
