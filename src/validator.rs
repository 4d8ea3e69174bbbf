//! Category Validator
//!
//! Cross-checks where each entry was filed against the canonical category
//! map. Purely diagnostic: nothing is moved or dropped, serving continues
//! with the data as stored.

use crate::category::{expected_category, CategoryId};
use crate::data::CatalogSnapshot;
use crate::language::Language;
use crate::resolver::is_header_row;
use serde::Serialize;

/// A known entry filed under the wrong category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchReport {
    pub name: String,
    pub stored_category: CategoryId,
    pub expected_category: CategoryId,
}

/// A named entry the canonical map does not know about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedEntry {
    pub name: String,
    pub category: CategoryId,
}

/// One report per entry whose canonical category disagrees with where it is stored
pub fn validate(snapshot: &CatalogSnapshot) -> Vec<MismatchReport> {
    snapshot
        .iter_entries()
        .filter_map(|entry| {
            let expected = expected_category(entry.english())?;
            if *expected == entry.category {
                return None;
            }
            Some(MismatchReport {
                name: entry.english().to_string(),
                stored_category: entry.category.clone(),
                expected_category: expected.clone(),
            })
        })
        .collect()
}

/// Named entries outside the canonical map (unknown, not wrong)
///
/// Header rows and nameless rows are skipped; they are not catalog items.
pub fn unrecognized(snapshot: &CatalogSnapshot) -> Vec<UnrecognizedEntry> {
    snapshot
        .iter_entries()
        .filter(|entry| entry.name(Language::English).is_some())
        .filter(|entry| !is_header_row(entry, &entry.category))
        .filter(|entry| expected_category(entry.english()).is_none())
        .map(|entry| UnrecognizedEntry {
            name: entry.english().to_string(),
            category: entry.category.clone(),
        })
        .collect()
}

/// Run validation and write the findings to the log
///
/// Called after every successful load.
pub fn log_validation(snapshot: &CatalogSnapshot) -> Vec<MismatchReport> {
    let mismatches = validate(snapshot);
    for report in &mismatches {
        tracing::warn!(
            "{} is filed under {} but belongs to {}",
            report.name,
            report.stored_category,
            report.expected_category
        );
    }

    let unknown = unrecognized(snapshot);
    for entry in &unknown {
        tracing::debug!("Unrecognized entry: {} under {}", entry.name, entry.category);
    }

    tracing::info!(
        "Validation: {} mismatches, {} unrecognized entries",
        mismatches.len(),
        unknown.len()
    );
    mismatches
}
