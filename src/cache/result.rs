//! Preflight Result Module
//!
//! An immutable record of what a prior preflight response permitted.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::safelist::{
    cors_unsafe_header_names, is_revalidation_header, is_safelisted_method, normalize_lower,
};
use crate::cache::{CredentialsMode, RequestHeaders, DEFAULT_CACHE_AGE, MAX_CACHE_AGE};

const WILDCARD: &str = "*";

// == Preflight Result ==
/// Permissions granted by one preflight exchange for an (origin, url) pair.
///
/// All fields are fixed at construction. Replacing a cached record means
/// building a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    /// Methods as delivered (case-sensitive)
    allowed_methods: HashSet<String>,
    /// Header names, lower-cased
    allowed_headers: HashSet<String>,
    credentials_permitted: bool,
    absolute_expiry: DateTime<Utc>,
}

impl PreflightResult {
    // == Constructors ==
    /// Creates a record that expires `max_age` from now.
    ///
    /// A missing `max_age` falls back to [`DEFAULT_CACHE_AGE`]; anything above
    /// [`MAX_CACHE_AGE`] is clamped to it.
    pub fn new<M, H>(
        allowed_methods: M,
        allowed_headers: H,
        credentials_permitted: bool,
        max_age: Option<Duration>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let age = max_age.unwrap_or(DEFAULT_CACHE_AGE).min(MAX_CACHE_AGE);
        let expiry = Utc::now() + chrono::Duration::milliseconds(age.as_millis() as i64);
        Self::with_expiry(allowed_methods, allowed_headers, credentials_permitted, expiry)
    }

    /// Creates a record with an explicit absolute expiry.
    pub fn with_expiry<M, H>(
        allowed_methods: M,
        allowed_headers: H,
        credentials_permitted: bool,
        absolute_expiry: DateTime<Utc>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        Self {
            allowed_methods: allowed_methods.into_iter().map(Into::into).collect(),
            allowed_headers: allowed_headers
                .into_iter()
                .map(|name| normalize_lower(name.as_ref()))
                .collect(),
            credentials_permitted,
            absolute_expiry,
        }
    }

    // == Accessors ==
    pub fn allowed_methods(&self) -> &HashSet<String> {
        &self.allowed_methods
    }

    /// Allowed header names, lower-cased.
    pub fn allowed_headers(&self) -> &HashSet<String> {
        &self.allowed_headers
    }

    pub fn credentials_permitted(&self) -> bool {
        self.credentials_permitted
    }

    pub fn absolute_expiry(&self) -> DateTime<Utc> {
        self.absolute_expiry
    }

    // == Expiry ==
    /// Returns true once `now` has reached the absolute expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.absolute_expiry
    }

    /// Remaining lifetime at `now`, zero once expired.
    pub fn time_to_live(&self, now: DateTime<Utc>) -> Duration {
        (self.absolute_expiry - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    // == Permission Checks ==
    /// Credentials only matter for `include` requests.
    pub fn allows_credentials(&self, credentials_mode: CredentialsMode) -> bool {
        !credentials_mode.is_include() || self.credentials_permitted
    }

    /// Returns true if `method` is safelisted or was explicitly allowed.
    ///
    /// A `*` entry allows any method, except for credentialed requests where
    /// it only matches a literal `*`.
    pub fn allows_method(&self, method: &str, credentials_mode: CredentialsMode) -> bool {
        if is_safelisted_method(method) || self.allowed_methods.contains(method) {
            return true;
        }
        !credentials_mode.is_include() && self.allowed_methods.contains(WILDCARD)
    }

    /// Returns true if every non-safelisted request header was allowed.
    ///
    /// Repeated names are judged on their joined value, and safelisting is
    /// lost once the safelisted values together grow too large. Revalidation
    /// requests may additionally carry the conditional header
    /// family. A `*` entry covers every name except `authorization`, and
    /// never applies to credentialed requests.
    pub fn allows_headers(
        &self,
        headers: &RequestHeaders,
        credentials_mode: CredentialsMode,
        is_revalidating: bool,
    ) -> bool {
        let wildcard = !credentials_mode.is_include() && self.allowed_headers.contains(WILDCARD);

        let combined = headers.combined();
        cors_unsafe_header_names(&combined).into_iter().all(|name| {
            if is_revalidating && is_revalidation_header(name) {
                return true;
            }
            self.allowed_headers.contains(name) || (wildcard && name != "authorization")
        })
    }

    /// Returns true if this record still covers the described request.
    pub fn allows(
        &self,
        credentials_mode: CredentialsMode,
        method: &str,
        headers: &RequestHeaders,
        is_revalidating: bool,
        now: DateTime<Utc>,
    ) -> bool {
        !self.is_expired(now)
            && self.allows_credentials(credentials_mode)
            && self.allows_method(method, credentials_mode)
            && self.allows_headers(headers, credentials_mode, is_revalidating)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn custom_result(credentials_permitted: bool) -> PreflightResult {
        PreflightResult::new(
            ["PUT"],
            ["X-Custom"],
            credentials_permitted,
            Some(Duration::from_secs(60)),
        )
    }

    fn headers(pairs: &[(&str, &str)]) -> RequestHeaders {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_default_max_age() {
        let before = Utc::now();
        let result = PreflightResult::new(Vec::<String>::new(), Vec::<String>::new(), false, None);
        let ttl = result.absolute_expiry() - before;

        assert!(ttl >= chrono::Duration::seconds(5));
        assert!(ttl <= chrono::Duration::seconds(6));
    }

    #[test]
    fn test_max_age_is_clamped() {
        let result = PreflightResult::new(
            Vec::<String>::new(),
            Vec::<String>::new(),
            false,
            Some(Duration::from_secs(86_400)),
        );
        assert!(result.time_to_live(Utc::now()) <= MAX_CACHE_AGE);
        assert!(result.time_to_live(Utc::now()) > MAX_CACHE_AGE - Duration::from_secs(5));
    }

    #[test]
    fn test_expiry_boundary() {
        let expiry = Utc::now();
        let result = PreflightResult::with_expiry(["PUT"], ["x-a"], false, expiry);

        assert!(result.is_expired(expiry));
        assert!(!result.is_expired(expiry - chrono::Duration::milliseconds(1)));
        assert_eq!(result.time_to_live(expiry + chrono::Duration::seconds(1)), Duration::ZERO);
    }

    #[test]
    fn test_credentials() {
        let denied = custom_result(false);
        assert!(denied.allows_credentials(CredentialsMode::Omit));
        assert!(denied.allows_credentials(CredentialsMode::SameOrigin));
        assert!(!denied.allows_credentials(CredentialsMode::Include));

        assert!(custom_result(true).allows_credentials(CredentialsMode::Include));
    }

    #[test]
    fn test_methods() {
        let result = custom_result(false);
        assert!(result.allows_method("PUT", CredentialsMode::Omit));
        assert!(result.allows_method("GET", CredentialsMode::Omit));
        assert!(result.allows_method("POST", CredentialsMode::Include));
        assert!(!result.allows_method("put", CredentialsMode::Omit));
        assert!(!result.allows_method("DELETE", CredentialsMode::Omit));
    }

    #[test]
    fn test_method_wildcard_ignored_for_credentialed_requests() {
        let result = PreflightResult::new(["*"], Vec::<String>::new(), true, None);
        assert!(result.allows_method("DELETE", CredentialsMode::SameOrigin));
        assert!(!result.allows_method("DELETE", CredentialsMode::Include));
    }

    #[test]
    fn test_headers_case_insensitive() {
        let result = custom_result(false);
        let omit = CredentialsMode::Omit;
        assert!(result.allows_headers(&headers(&[("x-custom", "1")]), omit, false));
        assert!(result.allows_headers(&headers(&[("X-CUSTOM", "1")]), omit, false));
        assert!(!result.allows_headers(&headers(&[("X-Other", "1")]), omit, false));
    }

    #[test]
    fn test_safelisted_headers_need_no_permission() {
        let result = PreflightResult::new(["PUT"], Vec::<String>::new(), false, None);
        let request = headers(&[("Accept", "*/*"), ("Content-Type", "text/plain")]);
        assert!(result.allows_headers(&request, CredentialsMode::Omit, false));

        let json = headers(&[("Content-Type", "application/json")]);
        assert!(!result.allows_headers(&json, CredentialsMode::Omit, false));
    }

    #[test]
    fn test_repeated_safelisted_header_is_joined() {
        let result = PreflightResult::new(["PUT"], Vec::<String>::new(), false, None);
        let value = "a".repeat(100);
        let once = headers(&[("Accept", value.as_str())]);
        let twice = headers(&[("Accept", value.as_str()), ("accept", value.as_str())]);

        assert!(result.allows_headers(&once, CredentialsMode::Omit, false));
        // "a…a, a…a" is 202 bytes, over the per-header limit.
        assert!(!result.allows_headers(&twice, CredentialsMode::Omit, false));
    }

    #[test]
    fn test_many_safelisted_headers_over_total_size() {
        let result = PreflightResult::new(["PUT"], Vec::<String>::new(), false, None);
        let value = "a".repeat(120);
        let request: RequestHeaders = (0..9).map(|_| ("Accept", value.as_str())).collect();

        assert!(!result.allows_headers(&request, CredentialsMode::Omit, false));
        assert!(!result.allows(CredentialsMode::Omit, "PUT", &request, false, Utc::now()));
    }

    #[test]
    fn test_repeated_header_allowed_when_authorized() {
        let result = PreflightResult::new(["PUT"], ["Accept"], false, None);
        let value = "a".repeat(100);
        let twice = headers(&[("Accept", value.as_str()), ("Accept", value.as_str())]);

        assert!(result.allows_headers(&twice, CredentialsMode::Omit, false));
    }

    #[test]
    fn test_revalidation_headers() {
        let result = custom_result(false);
        let request = headers(&[("X-Custom", "1"), ("If-None-Match", "\"etag\"")]);

        assert!(result.allows_headers(&request, CredentialsMode::Omit, true));
        assert!(!result.allows_headers(&request, CredentialsMode::Omit, false));
    }

    #[test]
    fn test_header_wildcard() {
        let result = PreflightResult::new(["PUT"], ["*"], true, None);
        let custom = headers(&[("X-Anything", "1")]);
        let auth = headers(&[("Authorization", "Bearer t")]);

        assert!(result.allows_headers(&custom, CredentialsMode::Omit, false));
        assert!(!result.allows_headers(&custom, CredentialsMode::Include, false));
        assert!(!result.allows_headers(&auth, CredentialsMode::Omit, false));
    }

    #[test]
    fn test_allows_requires_every_condition() {
        let now = Utc::now();
        let result = custom_result(true);
        let request = headers(&[("x-custom", "1")]);

        assert!(result.allows(CredentialsMode::Include, "PUT", &request, false, now));
        assert!(!result.allows(CredentialsMode::Include, "DELETE", &request, false, now));
        assert!(!result.allows(
            CredentialsMode::Include,
            "PUT",
            &request,
            false,
            result.absolute_expiry()
        ));
        assert!(!custom_result(false).allows(
            CredentialsMode::Include,
            "PUT",
            &request,
            false,
            now
        ));
    }
}
