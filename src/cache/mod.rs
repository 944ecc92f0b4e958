//! Cache Module
//!
//! Remembers CORS-preflight outcomes per (origin, url) and decides whether
//! a later request can skip its preflight.

mod request;
mod result;
pub mod safelist;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use request::{CredentialsMode, RequestHeaders};
pub use result::PreflightResult;
pub use stats::CacheStats;
pub use store::PreflightCache;

// == Public Constants ==
/// Lifetime of a result whose response carried no max-age
pub const DEFAULT_CACHE_AGE: Duration = Duration::from_secs(5);

/// Upper bound on any result's lifetime
pub const MAX_CACHE_AGE: Duration = Duration::from_secs(2 * 60 * 60);

/// Entry limit applied by housekeeping purges
pub const DEFAULT_MAX_ENTRIES: usize = 1024;
