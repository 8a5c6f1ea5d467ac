//! The composite JSON value: an array or an object, nothing else.
//!
//! Scalars (strings, numbers, booleans) have no representation here, neither as a root
//! value nor nested inside a container. Only `null` can appear below a container, as
//! `None`. Whether scalar leaves belong in this type is still open, so the enum is
//! `#[non_exhaustive]` to leave room for a scalar case without a breaking change.

use crate::error::{CompositeError, Result};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Ordered elements of a JSON array. `None` is a JSON `null` at that position.
pub type JsonArray = Vec<Option<JsonValue>>;

/// Properties of a JSON object. `None` is a JSON `null` property value.
///
/// Key order carries no meaning; `BTreeMap` keeps keys unique and makes encoding
/// deterministic.
pub type JsonObject = BTreeMap<String, Option<JsonValue>>;

/// A composite JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum JsonValue {
    Array(JsonArray),
    Object(JsonObject),
}

impl JsonValue {
    pub fn array(values: JsonArray) -> Self {
        JsonValue::Array(values)
    }

    pub fn object(properties: JsonObject) -> Self {
        JsonValue::Object(properties)
    }

    /// Build an object from entries whose keys must be unique.
    ///
    /// Unlike collecting into a `JsonValue`, where a repeated key overwrites the earlier
    /// entry, this fails on the first repeated key.
    ///
    /// ```
    /// use composite_json::{CompositeError, JsonValue};
    ///
    /// let ok = JsonValue::try_object_from_entries([("a".to_string(), None)]);
    /// assert!(ok.is_ok());
    ///
    /// let dup = JsonValue::try_object_from_entries([
    ///     ("a".to_string(), None),
    ///     ("a".to_string(), None),
    /// ]);
    /// assert!(matches!(dup, Err(CompositeError::DuplicateKey(k)) if k == "a"));
    /// ```
    pub fn try_object_from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Option<JsonValue>)>,
    {
        let mut properties = JsonObject::new();
        for (key, value) in entries {
            match properties.entry(key) {
                Entry::Occupied(occupied) => {
                    return Err(CompositeError::DuplicateKey(occupied.key().clone()))
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(value);
                }
            }
        }
        Ok(JsonValue::Object(properties))
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<JsonArray> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<JsonObject> {
        match self {
            JsonValue::Object(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// `"array"` or `"object"`.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Number of elements or properties directly inside this value.
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(values) => values.len(),
            JsonValue::Object(properties) => properties.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count containers and nulls in the whole tree.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        summarize(self, 1, &mut summary);
        summary
    }
}

/// Shape statistics for a value tree. `max_depth` is 1 for a value with no nested
/// containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub arrays: usize,
    pub objects: usize,
    pub nulls: usize,
    pub max_depth: usize,
}

fn summarize(value: &JsonValue, depth: usize, summary: &mut Summary) {
    summary.max_depth = summary.max_depth.max(depth);
    match value {
        JsonValue::Array(values) => {
            summary.arrays += 1;
            summarize_children(values.iter(), depth, summary);
        }
        JsonValue::Object(properties) => {
            summary.objects += 1;
            summarize_children(properties.values(), depth, summary);
        }
    }
}

fn summarize_children<'a>(
    children: impl Iterator<Item = &'a Option<JsonValue>>,
    depth: usize,
    summary: &mut Summary,
) {
    for child in children {
        match child {
            Some(child) => summarize(child, depth + 1, summary),
            None => summary.nulls += 1,
        }
    }
}

impl From<JsonArray> for JsonValue {
    fn from(values: JsonArray) -> Self {
        JsonValue::Array(values)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(properties: JsonObject) -> Self {
        JsonValue::Object(properties)
    }
}

/// Collects into an array.
impl FromIterator<Option<JsonValue>> for JsonValue {
    fn from_iter<I: IntoIterator<Item = Option<JsonValue>>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

/// Collects into an object; a repeated key replaces the earlier entry.
impl FromIterator<(String, Option<JsonValue>)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (String, Option<JsonValue>)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().collect())
    }
}
