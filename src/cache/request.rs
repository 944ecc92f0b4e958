//! Request Shape Module
//!
//! The parameters of an actual request that are matched against a cached
//! preflight result.

use serde::{Deserialize, Serialize};

use crate::cache::safelist::normalize_lower;

// == Credentials Mode ==
/// Whether a request may carry cookies or auth credentials across origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    /// Never send credentials
    Omit,
    /// Send credentials only to the same origin
    #[default]
    SameOrigin,
    /// Always send credentials
    Include,
}

impl CredentialsMode {
    /// Returns true for `include`, the only mode the credentials permission
    /// applies to.
    pub fn is_include(self) -> bool {
        matches!(self, CredentialsMode::Include)
    }
}

// == Request Headers ==
/// Ordered collection of request headers.
///
/// Names keep the caller's casing; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, keeping insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Lower-cased names with repeated values joined by `", "`, in order of
    /// first appearance.
    pub fn combined(&self) -> Vec<(String, String)> {
        let mut combined: Vec<(String, String)> = Vec::new();
        for (name, value) in self.iter() {
            let name = normalize_lower(name);
            match combined.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, joined)) => {
                    joined.push_str(", ");
                    joined.push_str(value);
                }
                None => combined.push((name, value.to_string())),
            }
        }
        combined
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for RequestHeaders
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_mode_serde() {
        let mode: CredentialsMode = serde_json::from_str(r#""same-origin""#).unwrap();
        assert_eq!(mode, CredentialsMode::SameOrigin);
        assert_eq!(
            serde_json::to_string(&CredentialsMode::Include).unwrap(),
            r#""include""#
        );
    }

    #[test]
    fn test_only_include_is_include() {
        assert!(CredentialsMode::Include.is_include());
        assert!(!CredentialsMode::Omit.is_include());
        assert!(!CredentialsMode::SameOrigin.is_include());
    }

    #[test]
    fn test_headers_case_insensitive_lookup() {
        let headers: RequestHeaders = [("X-Custom", "1"), ("Accept", "*/*")]
            .into_iter()
            .collect();

        assert!(headers.contains("x-custom"));
        assert_eq!(headers.get("ACCEPT"), Some("*/*"));
        assert!(!headers.contains("content-type"));
    }

    #[test]
    fn test_headers_keep_order() {
        let mut headers = RequestHeaders::new();
        headers.insert("B", "2");
        headers.insert("A", "1");

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_headers_combined_by_name() {
        let headers: RequestHeaders = [("Accept", "a"), ("X-One", "1"), ("accept", "b")]
            .into_iter()
            .collect();

        assert_eq!(
            headers.combined(),
            vec![
                ("accept".to_string(), "a, b".to_string()),
                ("x-one".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_deserialize_from_pairs() {
        let headers: RequestHeaders =
            serde_json::from_str(r#"[["X-Custom", "1"], ["If-None-Match", "\"abc\""]]"#).unwrap();
        assert_eq!(headers.get("if-none-match"), Some("\"abc\""));
    }
}
