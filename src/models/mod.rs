//! Request and Response models for the preflight cache API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AppendEntryRequest, CheckRequest, PurgeRequest};
pub use responses::{
    AppendEntryResponse, CheckResponse, ErrorResponse, HealthResponse, PurgeResponse,
    StatsResponse,
};
