//! API Handlers
//!
//! HTTP request handlers for each preflight cache endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{extract::State, Json};
use tracing::debug;

use crate::cache::PreflightCache;
use crate::error::{PreflightError, Result};
use crate::models::{
    AppendEntryRequest, AppendEntryResponse, CheckRequest, CheckResponse, HealthResponse,
    PurgeRequest, PurgeResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Every cache operation runs under the single write lock; read-only
/// endpoints take the read lock.
#[derive(Clone)]
pub struct AppState {
    /// Shared preflight cache
    pub cache: Arc<RwLock<PreflightCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: PreflightCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PreflightCache::new())
    }
}

/// Handler for POST /entries
///
/// Caches a parsed preflight result for (origin, url).
pub async fn append_entry_handler(
    State(state): State<AppState>,
    Json(req): Json<AppendEntryRequest>,
) -> Result<Json<AppendEntryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(PreflightError::InvalidRequest(error_msg));
    }

    let result = req.to_result();
    state
        .cache
        .write()
        .await
        .append_entry(&req.origin, &req.url, result);

    Ok(Json(AppendEntryResponse::new(req.origin, req.url)))
}

/// Handler for POST /check
///
/// Reports whether the described request may skip its preflight.
pub async fn check_handler(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(PreflightError::InvalidRequest(error_msg));
    }

    // Write lock: an expired entry is removed in the same critical section
    // that evaluates it
    let mut cache = state.cache.write().await;
    let can_skip_preflight = cache.check_if_request_can_skip_preflight(
        &req.origin,
        &req.url,
        req.credentials_mode,
        &req.method,
        &req.headers,
        req.is_revalidating,
    );

    Ok(Json(CheckResponse { can_skip_preflight }))
}

/// Handler for POST /purge
pub async fn purge_handler(
    State(state): State<AppState>,
    Json(req): Json<PurgeRequest>,
) -> Json<PurgeResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.may_purge(req.max_entries);
    debug!(removed, max_entries = req.max_entries, "purge requested");

    Json(PurgeResponse {
        removed,
        total_entries: cache.entry_count(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
