//! Canonical document hashing.
//!
//! ```text
//! document_hash = hex(BLAKE3(canonical_json(document)))
//! ```
//!
//! Canonical JSON sorts object keys and drops whitespace, so two documents
//! hash equal exactly when their serialized records are equal.

use serde_json::Value;

use crate::error::SchemaError;
use crate::extension::NormalizedDocument;

/// Computes the canonical BLAKE3 hash of a normalized document.
///
/// Returns a 64-character lowercase hexadecimal string.
pub fn document_hash(document: &NormalizedDocument) -> Result<String, SchemaError> {
    let value = document.to_value()?;
    Ok(value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn value_hash(value: &Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Serializes `value` with lexicographically sorted object keys and no
/// insignificant whitespace.
pub fn canonicalize_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| {
                    format!("{}:{}", Value::String(key.clone()), canonicalize_json(value))
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        // Scalars already have a single compact rendering.
        scalar => scalar.to_string(),
    }
}
