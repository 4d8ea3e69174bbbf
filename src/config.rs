//! Runtime configuration
//!
//! Read from environment variables with local-development defaults:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATA_SOURCE` | `crops_data.json` (file path or `http(s)://` URL) |
//! | `ASSET_ROOT` | `static` |
//! | `PLACEHOLDER_IMAGE` | `images/placeholder.png` |
//! | `IMAGE_EXTENSIONS` | `jpg,jpeg,png` |
//! | `FETCH_TIMEOUT_SECS` | `10` |
//! | `CACHE_TTL_SECS` | `300` |
//! | `PORT` | `5000` |

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_source: String,
    pub asset_root: PathBuf,
    pub placeholder_image: String,
    pub image_extensions: Vec<String>,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key -> value lookup; unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str, default: u64| {
            Duration::from_secs(get(key).and_then(|v| v.parse().ok()).unwrap_or(default))
        };

        let image_extensions = get("IMAGE_EXTENSIONS")
            .map(|v| {
                v.split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|exts| !exts.is_empty())
            .unwrap_or_else(|| vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]);

        Self {
            data_source: get("DATA_SOURCE").unwrap_or_else(|| "crops_data.json".to_string()),
            asset_root: PathBuf::from(get("ASSET_ROOT").unwrap_or_else(|| "static".to_string())),
            placeholder_image: get("PLACEHOLDER_IMAGE")
                .unwrap_or_else(|| "images/placeholder.png".to_string()),
            image_extensions,
            fetch_timeout: secs("FETCH_TIMEOUT_SECS", 10),
            cache_ttl: secs("CACHE_TTL_SECS", 300),
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(5000),
        }
    }
}
