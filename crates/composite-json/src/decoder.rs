//! serde decoding for [`JsonValue`], with shape guessing.
//!
//! The incoming value is read once through `deserialize_any` into a small buffered tree,
//! then probed:
//!
//! 1. **Object**: a map whose keys are all strings.
//! 2. **Array**: a sequence.
//!
//! The object probe always runs first; if it fails, its error is dropped and the array
//! probe runs. Every child is either `null` (`None`) or must itself resolve through the
//! same two probes. When neither probe succeeds, decoding fails with
//! [`CompositeError::TypeMismatch`] for the value being decoded, whatever failed below
//! it. The discarded child failures are logged at `trace` level.
//!
//! # Example
//! ```
//! use composite_json::{from_json_str, CompositeError};
//!
//! let value = from_json_str(r#"{"a":[null,{}]}"#).unwrap();
//! assert!(value.is_object());
//!
//! let err = from_json_str("42").unwrap_err();
//! assert!(matches!(err, CompositeError::TypeMismatch { found: "integer", .. }));
//! ```

use crate::error::{CompositeError, Result};
use crate::path::{DecodePath, PathSegment};
use crate::value::{JsonArray, JsonObject, JsonValue};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use std::fmt;

const EXPECTED: &str = "JsonValue";
const EXPECTING: &str = "a JSON object or array";

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = Content::deserialize(deserializer)?;
        resolve(&content, &DecodePath::root())
            .map_err(|_| de::Error::invalid_type(content.unexpected(), &EXPECTING))
    }
}

/// Decode a [`JsonValue`] from any self-describing serde format.
///
/// Errors reported by the format itself become [`CompositeError::Format`]; use
/// [`from_json_str`] to keep serde_json errors typed.
pub fn decode<'de, D>(deserializer: D) -> Result<JsonValue>
where
    D: Deserializer<'de>,
{
    let content =
        Content::deserialize(deserializer).map_err(|e| CompositeError::Format(e.to_string()))?;
    resolve(&content, &DecodePath::root())
}

/// Parse JSON text into a [`JsonValue`].
pub fn from_json_str(json: &str) -> Result<JsonValue> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let content = Content::deserialize(&mut deserializer)?;
    deserializer.end()?;
    resolve(&content, &DecodePath::root())
}

/// Parse JSON bytes into a [`JsonValue`].
pub fn from_json_slice(json: &[u8]) -> Result<JsonValue> {
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let content = Content::deserialize(&mut deserializer)?;
    deserializer.end()?;
    resolve(&content, &DecodePath::root())
}

// ============================================================================
// Probing
// ============================================================================

/// A buffered node as seen by the two shape probes.
trait Shape: Sized {
    /// Entries, if the node is a map with string keys.
    fn mapping(&self) -> Option<Vec<(&str, &Self)>>;
    /// Elements, if the node is a sequence.
    fn sequence(&self) -> Option<Vec<&Self>>;
    fn is_null(&self) -> bool;
    fn describe(&self) -> &'static str;
}

fn resolve<N: Shape>(node: &N, path: &DecodePath) -> Result<JsonValue> {
    if let Some(entries) = node.mapping() {
        match resolve_mapping(entries, path) {
            Ok(properties) => return Ok(JsonValue::Object(properties)),
            Err(err) => {
                tracing::trace!(%path, error = %err, "object reading failed; trying array");
            }
        }
    }
    if let Some(elements) = node.sequence() {
        match resolve_sequence(elements, path) {
            Ok(values) => return Ok(JsonValue::Array(values)),
            Err(err) => {
                tracing::trace!(%path, error = %err, "array reading failed");
            }
        }
    }

    let err = CompositeError::TypeMismatch {
        expected: EXPECTED,
        found: node.describe(),
        path: path.clone(),
    };
    if path.is_root() {
        tracing::debug!(error = %err, "value matched neither object nor array");
    }
    Err(err)
}

fn resolve_child<N: Shape>(node: &N, path: &DecodePath) -> Result<Option<JsonValue>> {
    if node.is_null() {
        return Ok(None);
    }
    resolve(node, path).map(Some)
}

fn resolve_mapping<N: Shape>(
    entries: Vec<(&str, &N)>,
    path: &DecodePath,
) -> Result<JsonObject> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let child = resolve_child(value, &path.child(PathSegment::Key(key.to_owned())))?;
            Ok((key.to_owned(), child))
        })
        .collect()
}

fn resolve_sequence<N: Shape>(elements: Vec<&N>, path: &DecodePath) -> Result<JsonArray> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| resolve_child(element, &path.child(PathSegment::Index(index))))
        .collect()
}

// ============================================================================
// Buffered content
// ============================================================================

/// Everything a self-describing format can hand to `deserialize_any`, kept just long
/// enough to probe it more than once.
#[derive(Debug, Clone, PartialEq)]
enum Content {
    Null,
    Bool(bool),
    U64(u64),
    I64(i64),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Content>),
    Map(Vec<(Content, Content)>),
}

impl Content {
    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Content::Null => Unexpected::Unit,
            Content::Bool(b) => Unexpected::Bool(*b),
            Content::U64(n) => Unexpected::Unsigned(*n),
            Content::I64(n) => Unexpected::Signed(*n),
            Content::F64(n) => Unexpected::Float(*n),
            Content::Str(s) => Unexpected::Str(s),
            Content::Bytes(b) => Unexpected::Bytes(b),
            Content::Seq(_) => Unexpected::Seq,
            Content::Map(_) => Unexpected::Map,
        }
    }
}

impl Shape for Content {
    fn mapping(&self) -> Option<Vec<(&str, &Self)>> {
        let Content::Map(entries) = self else {
            return None;
        };
        entries
            .iter()
            .map(|(key, value)| match key {
                Content::Str(key) => Some((key.as_str(), value)),
                _ => None,
            })
            .collect()
    }

    fn sequence(&self) -> Option<Vec<&Self>> {
        match self {
            Content::Seq(elements) => Some(elements.iter().collect()),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Content::Null)
    }

    fn describe(&self) -> &'static str {
        match self {
            Content::Null => "null",
            Content::Bool(_) => "boolean",
            Content::U64(_) | Content::I64(_) => "integer",
            Content::F64(_) => "number",
            Content::Str(_) => "string",
            Content::Bytes(_) => "bytes",
            Content::Seq(_) => "sequence",
            Content::Map(_) => "map",
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ContentVisitor)
    }
}

struct ContentVisitor;

impl<'de> Visitor<'de> for ContentVisitor {
    type Value = Content;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(EXPECTING)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Content, E> {
        Ok(Content::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Content, E> {
        Ok(Content::I64(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Content, E> {
        Ok(Content::U64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Content, E> {
        Ok(Content::F64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Content, E> {
        Ok(Content::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Content, E> {
        Ok(Content::Str(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Content, E> {
        Ok(Content::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Content, E> {
        Ok(Content::Bytes(v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Content, E> {
        Ok(Content::Null)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Content, E> {
        Ok(Content::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Content, D::Error>
    where
        D: Deserializer<'de>,
    {
        Content::deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<Content, D::Error>
    where
        D: Deserializer<'de>,
    {
        Content::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Content, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(Content::Seq(elements))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Content, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(Content::Map(entries))
    }
}
