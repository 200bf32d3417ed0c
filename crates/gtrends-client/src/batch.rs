//! Extraction of trending terms from batch-execute responses.
//!
//! A batch-execute body is line oriented. The line of interest is a JSON array
//! of more than two envelopes whose first entry is itself an array like
//! `["wrb.fr", "i0OFE", "<json string>", ...]`; the third element is a string
//! holding a second JSON document. In that inner array, element `1` is the list
//! of trend items and each item's head is the term text.
//!
//! Every step below is a pattern match that returns `None` on mismatch so a
//! malformed line is skipped rather than aborting the scan.

use serde_json::Value;

use crate::error::TrendsError;

/// RPC id of the daily trending-searches call.
pub const TRENDING_RPC_ID: &str = "i0OFE";

/// Builds the form body for the trending-searches RPC for `geo`.
#[must_use]
pub fn batch_payload(geo: &str) -> String {
    format!("f.req=[[[{TRENDING_RPC_ID},\"[null, null, \\\"{geo}\\\", 0, null, 48]\"]]]")
}

/// Scans `text` line by line and returns the terms from the first line that
/// yields any.
///
/// # Errors
///
/// Returns [`TrendsError::NoValidJson`] if no line has the expected shape or
/// every matching line carries zero terms.
pub fn extract_trending_terms(text: &str) -> Result<Vec<String>, TrendsError> {
    for line in text.lines() {
        let trimmed = line.trim();
        if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
            continue;
        }
        match terms_from_line(trimmed) {
            Some(terms) if !terms.is_empty() => {
                tracing::debug!(count = terms.len(), "batch response: extracted trending terms");
                return Ok(terms);
            }
            Some(_) => tracing::debug!("batch response: matching line carried no terms"),
            None => tracing::debug!("batch response: line did not match expected shape"),
        }
    }
    Err(TrendsError::NoValidJson)
}

fn terms_from_line(line: &str) -> Option<Vec<String>> {
    let outer: Value = serde_json::from_str(line).ok()?;
    let inner_json = envelope_payload(&outer)?;
    let data: Value = serde_json::from_str(inner_json).ok()?;
    items(&data)
}

/// `outer[0][2]` as a string. Lines with two or fewer envelopes are status
/// trailers, not payloads.
fn envelope_payload(outer: &Value) -> Option<&str> {
    let Value::Array(entries) = outer else {
        return None;
    };
    if entries.len() <= 2 {
        return None;
    }
    let Some(Value::Array(first)) = entries.first() else {
        return None;
    };
    match first.get(2) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Heads of the items in `data[1]`. Items that are not non-empty arrays with
/// a string head are skipped.
fn items(data: &Value) -> Option<Vec<String>> {
    let Value::Array(fields) = data else {
        return None;
    };
    let Some(Value::Array(items)) = fields.get(1) else {
        return None;
    };
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::Array(parts) => match parts.first() {
                    Some(Value::String(term)) => Some(term.clone()),
                    _ => None,
                },
                _ => None,
            })
            .collect(),
    )
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
