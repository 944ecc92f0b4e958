//! CORS Safelist Module
//!
//! Methods and request headers that never require explicit authorization
//! from a preflight response, plus the revalidation header family.

// == Constants ==
/// Methods permitted without a preflight.
pub const SAFELISTED_METHODS: [&str; 3] = ["GET", "HEAD", "POST"];

/// Header names a revalidation request may carry without authorization.
pub const REVALIDATION_HEADERS: [&str; 3] = ["if-modified-since", "if-none-match", "cache-control"];

/// Longest value a safelisted request header may have.
pub const MAX_SAFELISTED_VALUE_LENGTH: usize = 128;

/// Cap on the summed length of all safelisted header values.
pub const MAX_SAFELISTED_TOTAL_SIZE: usize = 1024;

const SAFELISTED_CONTENT_TYPES: [&str; 3] = [
    "application/x-www-form-urlencoded",
    "multipart/form-data",
    "text/plain",
];

// == Case Helpers ==
/// Lower-cases a header name, avoiding the Unicode path for ASCII input.
pub fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.to_lowercase()
    }
}

// == Methods ==
/// Returns true if `method` is a CORS-safelisted method.
///
/// Comparison is case-sensitive: `get` is not safelisted.
pub fn is_safelisted_method(method: &str) -> bool {
    SAFELISTED_METHODS.contains(&method)
}

// == Headers ==
/// Returns true if the header is a CORS-safelisted request header.
///
/// Both the name and the value are checked; `content-type: application/json`
/// is not safelisted even though the name is.
pub fn is_safelisted_header(name: &str, value: &str) -> bool {
    if value.len() > MAX_SAFELISTED_VALUE_LENGTH {
        return false;
    }

    match normalize_lower(name).as_str() {
        "accept" => !value.bytes().any(is_unsafe_byte),
        "accept-language" | "content-language" => value.bytes().all(is_language_byte),
        "content-type" => {
            if value.bytes().any(is_unsafe_byte) {
                return false;
            }
            let essence = value.split(';').next().unwrap_or_default().trim();
            SAFELISTED_CONTENT_TYPES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(essence))
        }
        _ => false,
    }
}

/// Names in `combined` that need explicit authorization.
///
/// `combined` holds lower-cased names with repeated values already joined,
/// as produced by `RequestHeaders::combined`. Once the safelisted
/// values together exceed [`MAX_SAFELISTED_TOTAL_SIZE`], none of them count
/// as safelisted.
pub fn cors_unsafe_header_names(combined: &[(String, String)]) -> Vec<&str> {
    let safelisted: Vec<bool> = combined
        .iter()
        .map(|(name, value)| is_safelisted_header(name, value))
        .collect();
    let safelisted_size: usize = combined
        .iter()
        .zip(&safelisted)
        .filter(|(_, safe)| **safe)
        .map(|((_, value), _)| value.len())
        .sum();
    let over_budget = safelisted_size > MAX_SAFELISTED_TOTAL_SIZE;

    combined
        .iter()
        .zip(safelisted)
        .filter(|(_, safe)| over_budget || !safe)
        .map(|((name, _), _)| name.as_str())
        .collect()
}

/// Returns true if `name` belongs to the conditional revalidation family.
pub fn is_revalidation_header(name: &str) -> bool {
    REVALIDATION_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

fn is_unsafe_byte(byte: u8) -> bool {
    (byte < 0x20 && byte != b'\t')
        || matches!(
            byte,
            b'"' | b'(' | b')' | b':' | b'<' | b'>' | b'?' | b'@' | b'[' | b'\\' | b']' | b'{'
                | b'}' | 0x7F
        )
}

fn is_language_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b' ' | b'*' | b',' | b'-' | b'.' | b';' | b'=')
}
