//! serde encoding for [`JsonValue`].
//!
//! Arrays are written with `serialize_seq`, objects with `serialize_map` (keys in
//! ascending order), and `None` entries with `serialize_none`, which self-describing
//! formats render as their null marker. Serializer errors are returned unchanged.
//!
//! # Example
//! ```
//! use composite_json::{to_json_string, JsonValue};
//!
//! let value: JsonValue = [("a".to_string(), Some(JsonValue::array(vec![None])))]
//!     .into_iter()
//!     .collect();
//! assert_eq!(to_json_string(&value).unwrap(), r#"{"a":[null]}"#);
//! ```

use crate::error::Result;
use crate::value::JsonValue;
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::Write;

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Array(values) => values.serialize(serializer),
            JsonValue::Object(properties) => properties.serialize(serializer),
        }
    }
}

/// Encode a [`JsonValue`] into any serde format.
pub fn encode<S>(value: &JsonValue, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.serialize(serializer)
}

/// Compact JSON text.
pub fn to_json_string(value: &JsonValue) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Indented JSON text.
pub fn to_json_string_pretty(value: &JsonValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write compact JSON to `writer`. I/O failures surface as [`crate::CompositeError::Json`].
pub fn to_json_writer<W: Write>(writer: W, value: &JsonValue) -> Result<()> {
    Ok(serde_json::to_writer(writer, value)?)
}

/// Compact JSON text.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
