//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_MAX_ENTRIES;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entry limit enforced by the housekeeping purge
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Housekeeping interval in seconds
    pub metrics_interval: u64,
    /// Whether each housekeeping tick purges down to `max_entries`
    pub purge_on_tick: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Purge limit (default: 1024)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `METRICS_INTERVAL` - Housekeeping interval in seconds (default: 300)
    /// - `PURGE_ON_TICK` - Purge during housekeeping (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            metrics_interval: parse_var::<u64>("METRICS_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.metrics_interval),
            purge_on_tick: parse_var("PURGE_ON_TICK").unwrap_or(defaults.purge_on_tick),
        }
    }

    /// Housekeeping interval as a Duration.
    pub fn metrics_period(&self) -> Duration {
        Duration::from_secs(self.metrics_interval)
    }

    /// Limit handed to the housekeeping task, if purging is enabled.
    pub fn purge_limit(&self) -> Option<usize> {
        self.purge_on_tick.then_some(self.max_entries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            server_port: 3000,
            metrics_interval: 300,
            purge_on_tick: true,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
