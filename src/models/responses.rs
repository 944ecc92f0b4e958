//! Response DTOs for the preflight cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for POST /entries
#[derive(Debug, Clone, Serialize)]
pub struct AppendEntryResponse {
    /// Success message
    pub message: String,
    pub origin: String,
    pub url: String,
}

impl AppendEntryResponse {
    /// Creates a new AppendEntryResponse
    pub fn new(origin: impl Into<String>, url: impl Into<String>) -> Self {
        let origin = origin.into();
        let url = url.into();
        Self {
            message: format!("Preflight result cached for '{}' -> '{}'", origin, url),
            origin,
            url,
        }
    }
}

/// Response body for POST /check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    /// False means a preflight must be sent
    pub can_skip_preflight: bool,
}

/// Response body for POST /purge
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    /// Entries removed by this purge
    pub removed: usize,
    /// Entries left afterwards
    pub total_entries: usize,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// hits / lookups
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
