//! Preflight Cache - CORS-preflight result cache
//!
//! Remembers what earlier preflights permitted per (origin, url) and answers
//! whether a later request can skip its own preflight. Expired records are
//! dropped on lookup; a capacity purge bounds memory.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CredentialsMode, PreflightCache, PreflightResult, RequestHeaders};
pub use config::Config;
pub use tasks::{spawn_metrics_task, MetricsReporter, TracingReporter};
