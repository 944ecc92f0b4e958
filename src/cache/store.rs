//! Cache Store Module
//!
//! Two-level map (origin -> url -> result) with lazy expiry on lookup and
//! an on-demand capacity purge.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::cache::{CacheStats, CredentialsMode, PreflightResult, RequestHeaders};

// == Preflight Cache ==
/// CORS-preflight result cache keyed by (origin, url).
///
/// Every per-origin map that exists holds at least one entry. Expired
/// entries are only removed when a lookup hits them or a purge runs.
#[derive(Debug, Default)]
pub struct PreflightCache {
    /// origin -> url -> result
    cache: HashMap<String, HashMap<String, PreflightResult>>,
    /// Lookup and removal counters
    stats: CacheStats,
}

impl PreflightCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Append Entry ==
    /// Stores `result` for (origin, url), replacing any previous record.
    pub fn append_entry(&mut self, origin: &str, url: &str, result: PreflightResult) {
        trace!(origin, url, expiry = %result.absolute_expiry(), "caching preflight result");
        self.cache
            .entry(origin.to_string())
            .or_default()
            .insert(url.to_string(), result);
    }

    // == Check ==
    /// Decides whether the described request can skip its preflight.
    ///
    /// Any missing or expired record answers `false`. An expired record is
    /// removed; a record that merely fails to cover the request is kept.
    pub fn check_if_request_can_skip_preflight(
        &mut self,
        origin: &str,
        url: &str,
        credentials_mode: CredentialsMode,
        method: &str,
        headers: &RequestHeaders,
        is_revalidating: bool,
    ) -> bool {
        self.check_if_request_can_skip_preflight_at(
            origin,
            url,
            credentials_mode,
            method,
            headers,
            is_revalidating,
            Utc::now(),
        )
    }

    /// Same as [`check_if_request_can_skip_preflight`](Self::check_if_request_can_skip_preflight)
    /// with an explicit current time.
    #[allow(clippy::too_many_arguments)]
    pub fn check_if_request_can_skip_preflight_at(
        &mut self,
        origin: &str,
        url: &str,
        credentials_mode: CredentialsMode,
        method: &str,
        headers: &RequestHeaders,
        is_revalidating: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(result) = self.cache.get(origin).and_then(|urls| urls.get(url)) else {
            self.stats.record_miss();
            debug!(origin, url, "no cached preflight result");
            return false;
        };

        if result.is_expired(now) {
            self.remove_entry(origin, url);
            self.stats.record_expiration();
            debug!(origin, url, "cached preflight result expired");
            return false;
        }

        let allowed = result.allows(credentials_mode, method, headers, is_revalidating, now);
        if allowed {
            self.stats.record_hit();
        } else {
            self.stats.record_denial();
            debug!(origin, url, method, "cached preflight result does not cover request");
        }
        allowed
    }

    // == Purge ==
    /// Removes entries until at most `max_entries` remain.
    ///
    /// Entries closest to expiry go first; ties are broken by origin, then
    /// url. Returns the number of entries removed.
    pub fn may_purge(&mut self, max_entries: usize) -> usize {
        let count = self.entry_count();
        if count <= max_entries {
            return 0;
        }

        let mut candidates: Vec<(DateTime<Utc>, &str, &str)> = self
            .cache
            .iter()
            .flat_map(|(origin, urls)| {
                urls.iter().map(move |(url, result)| {
                    (result.absolute_expiry(), origin.as_str(), url.as_str())
                })
            })
            .collect();
        candidates.sort_unstable();

        let excess = count - max_entries;
        let victims: Vec<(String, String)> = candidates
            .into_iter()
            .take(excess)
            .map(|(_, origin, url)| (origin.to_string(), url.to_string()))
            .collect();

        for (origin, url) in &victims {
            self.remove_entry(origin, url);
        }
        self.stats.record_evictions(victims.len());

        debug!(
            removed = victims.len(),
            remaining = self.entry_count(),
            "purged preflight cache"
        );
        victims.len()
    }

    /// Runs [`may_purge`](Self::may_purge), discarding the count.
    pub fn may_purge_for_testing(&mut self, max_entries: usize) {
        self.may_purge(max_entries);
    }

    // == Clear ==
    /// Drops every cached result, e.g. after a network configuration change.
    pub fn clear(&mut self) {
        let removed = self.entry_count();
        self.cache.clear();
        debug!(removed, "cleared preflight cache");
    }

    // == Counts ==
    /// Number of origins with at least one entry.
    pub fn origin_count(&self) -> usize {
        self.cache.len()
    }

    /// Number of entries across all origins.
    pub fn entry_count(&self) -> usize {
        self.cache.values().map(HashMap::len).sum()
    }

    pub fn count_origins_for_testing(&self) -> usize {
        self.origin_count()
    }

    pub fn count_entries_for_testing(&self) -> usize {
        self.entry_count()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_sizes(self.origin_count(), self.entry_count());
        stats
    }

    fn remove_entry(&mut self, origin: &str, url: &str) -> Option<PreflightResult> {
        let urls = self.cache.get_mut(origin)?;
        let removed = urls.remove(url);
        if urls.is_empty() {
            self.cache.remove(origin);
        }
        removed
    }
}
