//! Catalog queries consumed by the UI
//!
//! Four read-only operations over the live snapshot, each returning owned,
//! serializable data:
//! - [`CatalogQueries::list_categories`]
//! - [`CatalogQueries::list_entries`]
//! - [`CatalogQueries::project_name`]
//! - [`CatalogQueries::detail`]

use crate::assets::{AssetProbe, AssetResolver};
use crate::category::CategoryId;
use crate::data::{CatalogSnapshot, CatalogStore};
use crate::detail::{self, DetailRecord};
use crate::error::{CatalogError, Result};
use crate::language::Language;
use crate::resolver::{self, Resolution};
use crate::utils::vernacular::project;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    /// Localized label, or the raw key for unrecognized categories
    pub label: String,
    pub localized: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedEntry {
    pub name: String,
    pub display_name: String,
    pub tamil_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryListing {
    pub category: CategoryId,
    pub language: Language,
    pub supported: bool,
    pub entries: Vec<ListedEntry>,
    /// Set when the language has no data yet
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedName {
    pub name: String,
    pub language: Language,
    pub display_name: String,
}

pub struct CatalogQueries<P> {
    store: Arc<CatalogStore>,
    assets: AssetResolver<P>,
}

impl<P: AssetProbe> CatalogQueries<P> {
    pub fn new(store: Arc<CatalogStore>, assets: AssetResolver<P>) -> Self {
        Self { store, assets }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.store.snapshot()
    }

    /// Categories in document order with localized labels
    ///
    /// `count` is the number of catalog items filed under the category:
    /// header rows and rows without an English name are not counted. It is
    /// independent of the language, so it can exceed a language's list.
    pub fn list_categories(&self, language: Language) -> Vec<CategorySummary> {
        let snapshot = self.store.snapshot();
        snapshot
            .categories()
            .map(|category| CategorySummary {
                id: category.clone(),
                label: category.display_label(language).into_owned(),
                localized: category.is_known(),
                count: snapshot
                    .entries_of(category)
                    .iter()
                    .filter(|entry| resolver::is_catalog_item(entry))
                    .count(),
            })
            .collect()
    }

    /// Display list for a category key in a language
    pub fn list_entries(&self, category_key: &str, language: Language) -> EntryListing {
        let snapshot = self.store.snapshot();
        let category = CategoryId::from_key(category_key);

        match resolver::resolve(&snapshot, &category, language) {
            Resolution::Listed(entries) => EntryListing {
                category,
                language,
                supported: true,
                entries: entries
                    .into_iter()
                    .map(|entry| ListedEntry {
                        name: entry.english().to_string(),
                        display_name: project(entry, language).to_string(),
                        tamil_name: entry.name(Language::Tamil).map(str::to_string),
                    })
                    .collect(),
                message: None,
            },
            Resolution::NotYetAvailable(language) => EntryListing {
                category,
                language,
                supported: false,
                entries: Vec::new(),
                message: Some(format!(
                    "No crop data available in {} ({}) yet",
                    language.label(),
                    language.native_name()
                )),
            },
        }
    }

    /// Display name of one entry in a language
    pub fn project_name(&self, name: &str, language: Language) -> Result<ProjectedName> {
        let snapshot = self.store.snapshot();
        let entry =
            detail::find_entry(&snapshot, name).ok_or_else(|| CatalogError::entry_not_found(name))?;
        Ok(ProjectedName {
            name: entry.english().to_string(),
            language,
            display_name: project(entry, language).to_string(),
        })
    }

    pub fn detail(&self, name: &str) -> Result<DetailRecord> {
        self.detail_in(&self.store.snapshot(), name)
    }

    /// Detail record from a snapshot the caller already holds
    pub fn detail_in(&self, snapshot: &CatalogSnapshot, name: &str) -> Result<DetailRecord> {
        detail::assemble(snapshot, &self.assets, name)
    }
}
