//! Format detection for configuration documents
//!
//! Distinguishes the legacy flat-attribute class shape from the normalized
//! JSON Schema shape. Detection is purely structural, never mutates its
//! input, and is total over any JSON value. Normalized markers win: a
//! document carrying `$schema`, `$id`, `properties`, or the document-type
//! extension is never treated as legacy, even when a list-shaped
//! `attributes` field is also present.

use serde_json::Value;

use crate::constants::{ATTRIBUTES_KEY, ID_KEY, PROPERTIES_KEY, SCHEMA_KEY, X_DOCUMENT_TYPE};

/// Returns true if `data` is in the legacy flat-attribute format.
///
/// A sequence is judged by its first element, since class lists are
/// homogeneous in practice; an empty sequence has nothing to migrate and
/// reports false. Null and scalars are never legacy.
pub fn is_legacy_format(data: &Value) -> bool {
    match data {
        Value::Array(items) => items.first().map(is_legacy_format).unwrap_or(false),
        Value::Object(obj) => {
            if obj.contains_key(SCHEMA_KEY)
                || obj.contains_key(ID_KEY)
                || obj.contains_key(PROPERTIES_KEY)
                || obj.contains_key(X_DOCUMENT_TYPE)
            {
                return false;
            }
            match obj.get(ATTRIBUTES_KEY) {
                Some(attributes) => attributes.is_array(),
                None => false,
            }
        }
        _ => false,
    }
}

/// Returns true if `data` is already in normalized JSON Schema format.
///
/// Null is neither format. Everything else is normalized exactly when it is
/// not legacy, so a migrate-if-legacy pass leaves it untouched.
pub fn is_schema_format(data: &Value) -> bool {
    !data.is_null() && !is_legacy_format(data)
}
