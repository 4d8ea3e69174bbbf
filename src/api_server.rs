// Axum API Server Module
//
// Purpose: JSON query surface over the crop catalog for the card UI
// Routes mirror the catalog viewer: /data, /categories, /crop/:name, /health

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::assets::{AssetResolver, FsAssetProbe};

#[cfg(feature = "api")]
use crate::config::Config;

#[cfg(feature = "api")]
use crate::data::{CatalogSnapshot, CatalogStore};

#[cfg(feature = "api")]
use crate::error::CatalogError;

#[cfg(feature = "api")]
use crate::language::Language;

#[cfg(feature = "api")]
use crate::query::CatalogQueries;

#[cfg(feature = "api")]
use crate::source::CatalogSource;

#[cfg(feature = "api")]
use crate::validator;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<CatalogQueries<FsAssetProbe>>,
    pub source: Arc<CatalogSource>,
    pub fetch_timeout: Duration,
    /// Serializes reloads; readers never take it
    pub reload_lock: Arc<tokio::sync::Mutex<()>>,
    pub cache: Cache<String, serde_json::Value>,
    pub asset_root: std::path::PathBuf,
}

#[cfg(feature = "api")]
impl AppState {
    /// Fetch the catalog from the configured source and build the state
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let source = CatalogSource::from_location(&config.data_source);

        tracing::info!("Loading catalog from {}...", source.describe());
        let snapshot = source.fetch(config.fetch_timeout).await?;

        Ok(Self::with_snapshot(snapshot, source, config))
    }

    /// Build the state around an already loaded snapshot
    pub fn with_snapshot(snapshot: CatalogSnapshot, source: CatalogSource, config: &Config) -> Self {
        validator::log_validation(&snapshot);

        let assets = AssetResolver::new(
            FsAssetProbe::new(&config.asset_root),
            config.image_extensions.clone(),
            config.placeholder_image.clone(),
        );
        let store = Arc::new(CatalogStore::new(snapshot));

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            queries: Arc::new(CatalogQueries::new(store, assets)),
            source: Arc::new(source),
            fetch_timeout: config.fetch_timeout,
            reload_lock: Arc::new(tokio::sync::Mutex::new(())),
            cache,
            asset_root: config.asset_root.clone(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.asset_root);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog endpoints
        .route("/data", get(get_data))
        .route("/categories", get(get_categories))
        .route("/crop/:name", get(get_crop_details))

        // Query endpoints
        .route("/api/categories/:category/entries", get(list_entries))
        .route("/api/entries/:name/name", get(project_name))
        .route("/api/validation", get(get_validation))
        .route("/api/reload", post(reload_catalog))

        // Image tree (resolved paths are relative to this root)
        .nest_service("/static", static_files)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

#[cfg(feature = "api")]
impl LanguageQuery {
    fn language(&self) -> Language {
        Language::parse_or_english(self.lang.as_deref())
    }
}

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "Crop catalog is running",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_data(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let snapshot = state.queries.snapshot();
    let data = serde_json::to_value(snapshot.as_ref())
        .map_err(|e| AppError::Internal(format!("Failed to serialize catalog: {}", e)))?;
    Ok(Json(data))
}

#[cfg(feature = "api")]
async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<LanguageQuery>,
) -> Json<serde_json::Value> {
    let language = params.language();
    let summaries = state.queries.list_categories(language);

    let categories: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
    let counts: serde_json::Map<String, serde_json::Value> = summaries
        .iter()
        .map(|s| (s.id.as_str().to_string(), serde_json::Value::from(s.count)))
        .collect();
    let labels: serde_json::Map<String, serde_json::Value> = summaries
        .iter()
        .map(|s| (s.id.as_str().to_string(), serde_json::Value::from(s.label.clone())))
        .collect();

    Json(serde_json::json!({
        "language": language.code(),
        "categories": categories,
        "counts": counts,
        "labels": labels,
    }))
}

#[cfg(feature = "api")]
async fn list_entries(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<LanguageQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let listing = state.queries.list_entries(&category, params.language());
    tracing::debug!(
        "Listed {} entries for {} ({})",
        listing.entries.len(),
        category,
        listing.language
    );
    let body = serde_json::to_value(&listing)
        .map_err(|e| AppError::Internal(format!("Failed to serialize listing: {}", e)))?;
    Ok(Json(body))
}

#[cfg(feature = "api")]
async fn project_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<LanguageQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let projected = state.queries.project_name(&name, params.language())?;
    let body = serde_json::to_value(&projected)
        .map_err(|e| AppError::Internal(format!("Failed to serialize name: {}", e)))?;
    Ok(Json(body))
}

/// Detail cache key; entries built from an older snapshot generation never match
#[cfg(feature = "api")]
pub fn detail_cache_key(generation: u64, name: &str) -> String {
    format!("crop:{}:{}", generation, name)
}

#[cfg(feature = "api")]
async fn get_crop_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (generation, snapshot) = state.queries.store().current();
    let cache_key = detail_cache_key(generation, &name);

    // Check cache
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for crop {}", name);
        return Ok(Json(cached));
    }

    let detail = state.queries.detail_in(&snapshot, &name)?;
    tracing::debug!(
        "Crop {} ({}), image {}",
        detail.name,
        detail.category,
        detail.image_path
    );

    let mut result = serde_json::to_value(&detail)
        .map_err(|e| AppError::Internal(format!("Failed to serialize detail: {}", e)))?;
    result["image_url"] = serde_json::Value::from(format!("/static/{}", detail.image_path));

    // Cache result
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

#[cfg(feature = "api")]
async fn get_validation(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.queries.snapshot();
    let mismatches = validator::validate(&snapshot);
    let unrecognized = validator::unrecognized(&snapshot);

    Json(serde_json::json!({
        "mismatch_count": mismatches.len(),
        "mismatches": mismatches,
        "unrecognized": unrecognized,
    }))
}

/// Re-fetch the catalog and swap it in; the old snapshot keeps serving on failure
#[cfg(feature = "api")]
async fn reload_catalog(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = state.reload_lock.lock().await;

    tracing::info!("Reloading catalog from {}...", state.source.describe());
    let snapshot = state.source.fetch(state.fetch_timeout).await.map_err(|e| {
        tracing::error!("Reload failed, keeping current catalog: {}", e);
        AppError::from(e)
    })?;

    let mismatches = validator::log_validation(&snapshot);
    let categories = snapshot.category_count();
    let entries = snapshot.total_entries();

    state.queries.store().replace(snapshot);
    // Drop entries keyed to old generations
    state.cache.invalidate_all();

    Ok(Json(serde_json::json!({
        "status": "reloaded",
        "categories": categories,
        "entries": entries,
        "mismatches": mismatches.len(),
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EntryNotFound(_) | CatalogError::AssetNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            CatalogError::UnsupportedLanguage(_) => AppError::BadRequest(err.to_string()),
            CatalogError::DataUnavailable(_) => AppError::Unavailable(err.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
