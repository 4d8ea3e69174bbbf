//! Catalog sources
//!
//! The catalog document comes from a local file or an HTTP endpoint. Every
//! fetch is bounded by a timeout; any failure is `DataUnavailable` and no
//! retry is attempted here.

#[cfg(feature = "api")]
use crate::data::CatalogSnapshot;
#[cfg(feature = "api")]
use crate::error::{CatalogError, Result};
#[cfg(feature = "api")]
use std::path::PathBuf;
#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http { url: String },
}

#[cfg(feature = "api")]
impl CatalogSource {
    /// `http://` and `https://` locations are fetched over HTTP, anything else is a path
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            CatalogSource::Http {
                url: location.to_string(),
            }
        } else {
            CatalogSource::File(PathBuf::from(location))
        }
    }

    /// Fetch and parse a complete snapshot
    pub async fn fetch(&self, timeout: Duration) -> Result<CatalogSnapshot> {
        let start = std::time::Instant::now();
        let bytes = match self {
            CatalogSource::File(path) => {
                tracing::info!("Reading catalog from {}", path.display());
                tokio::time::timeout(timeout, tokio::fs::read(path))
                    .await
                    .map_err(|_| CatalogError::data_unavailable(format!("Timed out reading {}", path.display())))?
                    .map_err(|e| {
                        CatalogError::data_unavailable(format!("Failed to read {}: {}", path.display(), e))
                    })?
            }
            CatalogSource::Http { url } => {
                tracing::info!("Fetching catalog from {}", url);
                fetch_http(url, timeout).await?
            }
        };

        let snapshot = CatalogSnapshot::from_json_slice(&bytes)?;
        tracing::info!(
            "Loaded {} entries across {} categories in {:?}",
            snapshot.total_entries(),
            snapshot.category_count(),
            start.elapsed()
        );
        for (category, count) in snapshot.category_counts() {
            tracing::debug!("  {}: {} entries", category, count);
        }
        Ok(snapshot)
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Http { url } => url.clone(),
        }
    }
}

#[cfg(feature = "api")]
async fn fetch_http(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::data_unavailable(format!("HTTP client error: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CatalogError::data_unavailable(format!("Failed to fetch {}: {}", url, e)))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| CatalogError::data_unavailable(format!("Failed to read body from {}: {}", url, e)))?;

    Ok(bytes.to_vec())
}
