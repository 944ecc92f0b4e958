//! API Module
//!
//! HTTP handlers and routing for the preflight cache service.
//!
//! # Endpoints
//! - `POST /entries` - Cache a parsed preflight result
//! - `POST /check` - Ask whether a request can skip its preflight
//! - `POST /purge` - Purge down to an entry limit
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
