//! Response normalization: single-object or array bodies become an ordered
//! record sequence.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::HttpError;

/// Coerce a decoded body into an ordered list of JSON objects.
///
/// Arrays keep their order (non-object elements are skipped); a single
/// object becomes a one-element list; `null` or an empty array is an empty
/// list — "no matches" is not an error.
pub(crate) fn normalize(value: Value) -> Vec<Map<String, Value>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect(),
        Value::Object(obj) => vec![obj],
        _ => Vec::new(),
    }
}

/// Normalize and decode into typed records.
///
/// Unknown upstream fields survive via each record type's flattened extra
/// map; a record that fails the typed decode is a [`HttpError::Decode`].
pub(crate) fn decode_records<T: DeserializeOwned>(
    endpoint: &str,
    value: Value,
) -> Result<Vec<T>, HttpError> {
    normalize(value)
        .into_iter()
        .map(|obj| {
            let raw = Value::Object(obj);
            T::deserialize(&raw)
                .map_err(|e| HttpError::decode(endpoint, &e.to_string(), &raw.to_string()))
        })
        .collect()
}
