//! Request DTOs for the preflight cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::{CredentialsMode, PreflightResult, RequestHeaders};

/// Request body for POST /entries
///
/// Carries an already-parsed preflight response for (origin, url).
#[derive(Debug, Clone, Deserialize)]
pub struct AppendEntryRequest {
    /// Origin that issued the preflight
    pub origin: String,
    /// Target URL key
    pub url: String,
    /// Methods from `Access-Control-Allow-Methods`
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    /// Header names from `Access-Control-Allow-Headers`
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    /// Whether `Access-Control-Allow-Credentials` was `true`
    #[serde(default)]
    pub credentials_permitted: bool,
    /// `Access-Control-Max-Age` in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl AppendEntryRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.origin, &self.url)
    }

    /// Builds the immutable result this request describes.
    pub fn to_result(&self) -> PreflightResult {
        PreflightResult::new(
            self.allowed_methods.iter().cloned(),
            &self.allowed_headers,
            self.credentials_permitted,
            self.max_age.map(Duration::from_secs),
        )
    }
}

/// Request body for POST /check
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub origin: String,
    pub url: String,
    #[serde(default)]
    pub credentials_mode: CredentialsMode,
    pub method: String,
    /// `[name, value]` pairs in request order
    #[serde(default)]
    pub headers: RequestHeaders,
    #[serde(default)]
    pub is_revalidating: bool,
}

impl CheckRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.method.is_empty() {
            return Some("Method cannot be empty".to_string());
        }
        validate_key(&self.origin, &self.url)
    }
}

/// Request body for POST /purge
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeRequest {
    /// Entry count to purge down to
    pub max_entries: usize,
}

fn validate_key(origin: &str, url: &str) -> Option<String> {
    if origin.is_empty() {
        return Some("Origin cannot be empty".to_string());
    }
    if url.is_empty() {
        return Some("Url cannot be empty".to_string());
    }
    None
}
