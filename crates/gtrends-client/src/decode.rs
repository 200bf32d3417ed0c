//! Guard-prefix repair and typed decoding.
//!
//! Upstream prefixes JSON bodies with a non-JSON token to defeat direct script
//! inclusion. Explore and picker responses use [`EXPLORE_GUARD`]; widget-data
//! and autocomplete responses use [`WIDGET_GUARD`], which carries a trailing
//! comma.

use serde::de::DeserializeOwned;

use crate::error::TrendsError;

pub const EXPLORE_GUARD: &str = ")]}'";
pub const WIDGET_GUARD: &str = ")]}',";

/// Removes the first occurrence of `guard` from `body`.
#[must_use]
pub fn strip_guard(body: &str, guard: &str) -> String {
    body.replacen(guard, "", 1)
}

/// Strips `guard` from `body` and deserializes the remainder.
///
/// # Errors
///
/// Returns [`TrendsError::Deserialize`] if the repaired body is not valid JSON
/// for `T`. `context` names the endpoint in the error message.
pub fn decode_guarded<T: DeserializeOwned>(
    body: &[u8],
    guard: &str,
    context: &str,
) -> Result<T, TrendsError> {
    let text = String::from_utf8_lossy(body);
    let repaired = strip_guard(&text, guard);
    serde_json::from_str(&repaired).map_err(|e| TrendsError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
