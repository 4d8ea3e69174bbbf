//! Crop Catalog Resolution Layer
//!
//! Serves a multilingual agricultural catalog loaded from a loosely
//! validated JSON document.
//!
//! - `data/`: catalog snapshot parsing and the swappable live store
//! - `validator`: category mismatch diagnostics
//! - `resolver`: per-language display lists
//! - `utils/`: absence rule, display-name policies, path normalization
//! - `assets`: image path derivation and fallback
//! - `detail`: six-language detail records
//! - `query`: the read-only operations the UI consumes
//! - `api_server` (feature `api`): Axum HTTP surface

pub mod assets;
pub mod category;
pub mod config;
pub mod data;
pub mod detail;
pub mod error;
pub mod language;
pub mod query;
pub mod resolver;
pub mod utils;
pub mod validator;

pub mod source;
pub mod api_server;

// Re-export commonly used types
pub use assets::{AssetProbe, AssetResolver, FsAssetProbe};
pub use category::CategoryId;
pub use config::Config;
pub use data::{CatalogSnapshot, CatalogStore, Entry};
pub use detail::{DetailRecord, LanguageGrid};
pub use error::CatalogError;
pub use language::Language;
pub use query::CatalogQueries;
pub use resolver::{resolve, Resolution};
pub use utils::vernacular::project;
pub use validator::{validate, MismatchReport};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use source::CatalogSource;
