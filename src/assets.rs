//! Asset Resolver
//!
//! Image paths are derived from the category and the English name:
//!
//! ```text
//! images/{category}/{entry}/{first letter}1.{ext}
//! images/fruits/bitter_gourd/b1.jpg
//! ```
//!
//! Candidates are tried in order: the primary derivation for each
//! configured extension, then one fallback derivation. The primary
//! lower-cases both the category and the entry name in ASCII only; the
//! fallback lower-cases both in full Unicode. The category keeps its own
//! spacing and punctuation, only the entry name is normalized. The fallback
//! is skipped when it derives the same folder, which is always the case for
//! ASCII keys and names.

use crate::error::{CatalogError, Result};
use crate::utils::normalization::{path_segment, path_segment_full};
use serde::Serialize;
use std::path::PathBuf;

/// Existence check for a path relative to the asset root
pub trait AssetProbe {
    fn exists(&self, relative_path: &str) -> bool;
}

impl<F> AssetProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, relative_path: &str) -> bool {
        self(relative_path)
    }
}

/// Probe backed by the filesystem
#[derive(Debug, Clone)]
pub struct FsAssetProbe {
    root: PathBuf,
}

impl FsAssetProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetProbe for FsAssetProbe {
    fn exists(&self, relative_path: &str) -> bool {
        self.root.join(relative_path).is_file()
    }
}

/// Folder and file stem of one derivation, extension pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCandidate {
    pub folder: String,
    pub stem: String,
}

impl AssetCandidate {
    fn derive(category: &str, entry_name: &str, full_case: bool) -> Self {
        let category = category.trim();
        let (category, entry) = if full_case {
            (category.to_lowercase(), path_segment_full(entry_name.trim()))
        } else {
            (category.to_ascii_lowercase(), path_segment(entry_name.trim()))
        };
        let first = entry.chars().next().unwrap_or('x');
        Self {
            folder: format!("images/{}/{}", category, entry),
            stem: format!("{}1", first),
        }
    }

    pub fn with_extension(&self, ext: &str) -> String {
        format!("{}/{}.{}", self.folder, self.stem, ext)
    }
}

/// Primary derivation (ASCII lower-casing)
pub fn primary_candidate(category: &str, entry_name: &str) -> AssetCandidate {
    AssetCandidate::derive(category, entry_name, false)
}

/// Fallback derivation, or `None` when it would repeat the primary
pub fn fallback_candidate(category: &str, entry_name: &str) -> Option<AssetCandidate> {
    let fallback = AssetCandidate::derive(category, entry_name, true);
    if fallback == primary_candidate(category, entry_name) {
        None
    } else {
        Some(fallback)
    }
}

/// Every path to try, in order
pub fn candidate_paths(category: &str, entry_name: &str, extensions: &[String]) -> Vec<String> {
    let mut derivations = vec![primary_candidate(category, entry_name)];
    derivations.extend(fallback_candidate(category, entry_name));

    derivations
        .iter()
        .flat_map(|candidate| extensions.iter().map(move |ext| candidate.with_extension(ext)))
        .collect()
}

/// Outcome of resolving an image for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub path: String,
    /// False when `path` is the placeholder
    pub found: bool,
}

pub struct AssetResolver<P> {
    probe: P,
    extensions: Vec<String>,
    placeholder: String,
}

impl<P: AssetProbe> AssetResolver<P> {
    pub fn new(probe: P, extensions: Vec<String>, placeholder: impl Into<String>) -> Self {
        Self {
            probe,
            extensions,
            placeholder: placeholder.into(),
        }
    }

    /// First candidate that exists, or `AssetNotFound`
    pub fn resolve_path(&self, category: &str, entry_name: &str) -> Result<String> {
        candidate_paths(category, entry_name, &self.extensions)
            .into_iter()
            .find(|path| self.probe.exists(path))
            .ok_or_else(|| CatalogError::AssetNotFound {
                category: category.to_string(),
                name: entry_name.to_string(),
            })
    }

    /// Resolved path, or the placeholder when nothing exists
    pub fn resolve_or_placeholder(&self, category: &str, entry_name: &str) -> ResolvedImage {
        match self.resolve_path(category, entry_name) {
            Ok(path) => ResolvedImage { path, found: true },
            Err(e) => {
                tracing::debug!("{}; using placeholder", e);
                ResolvedImage {
                    path: self.placeholder.clone(),
                    found: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn exts() -> Vec<String> {
        vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
    }

    #[test]
    fn test_primary_candidate() {
        let candidate = primary_candidate("Fruits", "Bitter Gourd");
        assert_eq!(candidate.folder, "images/fruits/bitter_gourd");
        assert_eq!(candidate.with_extension("jpg"), "images/fruits/bitter_gourd/b1.jpg");

        let okra = primary_candidate("Vegetables", "Bhendi (Okra)");
        assert_eq!(okra.with_extension("png"), "images/vegetables/bhendi_okra/b1.png");
    }

    #[test]
    fn test_fallback_is_noop_for_ascii() {
        assert_eq!(fallback_candidate("Fruits", "Bitter Gourd"), None);
        assert_eq!(
            candidate_paths("Fruits", "Bitter Gourd", &exts()),
            vec![
                "images/fruits/bitter_gourd/b1.jpg",
                "images/fruits/bitter_gourd/b1.jpeg",
                "images/fruits/bitter_gourd/b1.png",
            ]
        );
    }

    #[test]
    fn test_fallback_for_non_ascii() {
        let fallback = fallback_candidate("Tubers", "Ñame").unwrap();
        assert_eq!(fallback.with_extension("jpg"), "images/tubers/ñame/ñ1.jpg");
        let paths = candidate_paths("Tubers", "Ñame", &["jpg".to_string()]);
        assert_eq!(paths, vec!["images/tubers/Ñame/Ñ1.jpg", "images/tubers/ñame/ñ1.jpg"]);
    }

    #[test]
    fn test_category_follows_same_case_folding() {
        let primary = primary_candidate("Épices", "Pepper");
        assert_eq!(primary.folder, "images/Épices/pepper");

        let fallback = fallback_candidate("Épices", "Pepper").unwrap();
        assert_eq!(fallback.folder, "images/épices/pepper");

        let other = primary_candidate("Value-Added Products", "Banana Chips");
        assert_eq!(other.folder, "images/value-added products/banana_chips");
    }

    #[test]
    fn test_resolve_picks_first_existing() {
        let probed = RefCell::new(Vec::new());
        let probe = |path: &str| {
            probed.borrow_mut().push(path.to_string());
            path.ends_with(".png")
        };
        let resolver = AssetResolver::new(probe, exts(), "images/placeholder.png");
        let path = resolver.resolve_path("Fruits", "Bitter Gourd").unwrap();
        assert_eq!(path, "images/fruits/bitter_gourd/b1.png");
        assert_eq!(probed.borrow().len(), 3);
    }

    #[test]
    fn test_missing_asset_uses_placeholder() {
        let resolver = AssetResolver::new(|_: &str| false, exts(), "images/placeholder.png");
        assert!(matches!(
            resolver.resolve_path("Greens", "Palak"),
            Err(CatalogError::AssetNotFound { .. })
        ));
        let image = resolver.resolve_or_placeholder("Greens", "Palak");
        assert_eq!(image.path, "images/placeholder.png");
        assert!(!image.found);
    }

    #[test]
    fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("images/vegetables/bhendi_okra");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("b1.jpeg"), b"jpeg").unwrap();

        let resolver = AssetResolver::new(FsAssetProbe::new(dir.path()), exts(), "images/placeholder.png");
        let image = resolver.resolve_or_placeholder("Vegetables", "Bhendi (Okra)");
        assert_eq!(image.path, "images/vegetables/bhendi_okra/b1.jpeg");
        assert!(image.found);
    }
}
