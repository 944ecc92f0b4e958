//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Housekeeping: reports cache sizes and optionally enforces the entry limit

mod metrics;

pub use metrics::{
    run_housekeeping, spawn_metrics_task, MetricsReporter, MetricsSnapshot, TracingReporter,
};
