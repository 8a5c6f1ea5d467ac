//! Bridge between [`JsonValue`] and untyped trees owned by other JSON libraries.
//!
//! A foreign tree only has to answer two structural questions, "are you a sequence of
//! optional nodes?" and "are you a mapping from strings to optional nodes?"
//! ([`DynamicTree`]), and be buildable from the same three shapes ([`DynamicBuilder`]).
//! Implementations for `serde_json::Value` live in this module; the Python binding crate
//! implements both traits for Python objects.
//!
//! Conversion from a tree is a silent, partial function: anything that is not a
//! composite of composites and nulls yields `None`, without saying why. Probing tries
//! the sequence shape first, then the mapping shape. The serde decoder probes in the
//! opposite order; see [`crate::decoder`].

use crate::error::CompositeError;
use crate::value::{JsonArray, JsonObject, JsonValue};
use serde_json::Value;
use std::convert::Infallible;

/// Structural probes over a node of a foreign dynamic tree.
///
/// `None` inside the returned vectors stands for the tree's null sentinel. Nodes are
/// returned by value, so implementors are usually cheap handles: a shared reference, a
/// reference-counted object.
pub trait DynamicTree: Sized {
    /// The node's elements if it is a sequence, `None` otherwise.
    fn as_sequence(&self) -> Option<Vec<Option<Self>>>;

    /// The node's entries if it is a mapping whose keys are all strings, `None`
    /// otherwise.
    fn as_mapping(&self) -> Option<Vec<(String, Option<Self>)>>;
}

/// Constructs nodes of a foreign dynamic tree.
pub trait DynamicBuilder {
    type Node;
    /// `Infallible` for in-memory trees such as `serde_json::Value`.
    type Error;

    fn null(&mut self) -> Result<Self::Node, Self::Error>;

    fn sequence(&mut self, items: Vec<Self::Node>) -> Result<Self::Node, Self::Error>;

    fn mapping(&mut self, entries: Vec<(String, Self::Node)>) -> Result<Self::Node, Self::Error>;
}

/// Interpret a dynamic tree as a [`JsonValue`].
///
/// The node is first read as a sequence; every non-null element must convert, otherwise
/// the sequence reading is abandoned (no `null` is substituted for the failed element).
/// The node is then read as a mapping under the same rule. If neither reading works the
/// result is `None`.
///
/// ```
/// use composite_json::dynamic::from_dynamic;
/// use serde_json::json;
///
/// let tree = json!({"a": [null, {}]});
/// let value = from_dynamic(&&tree).unwrap();
/// assert!(value.is_object());
///
/// assert_eq!(from_dynamic(&&json!(42)), None);
/// assert_eq!(from_dynamic(&&json!([1, 2])), None);
/// ```
pub fn from_dynamic<T: DynamicTree>(tree: &T) -> Option<JsonValue> {
    if let Some(items) = tree.as_sequence() {
        match convert_elements(items) {
            Some(values) => return Some(JsonValue::Array(values)),
            None => tracing::trace!("sequence probe rejected an element; trying mapping"),
        }
    }
    let entries = tree.as_mapping()?;
    convert_entries(entries).map(JsonValue::Object)
}

fn convert_elements<T: DynamicTree>(items: Vec<Option<T>>) -> Option<JsonArray> {
    items.iter().map(convert_optional).collect()
}

fn convert_entries<T: DynamicTree>(entries: Vec<(String, Option<T>)>) -> Option<JsonObject> {
    entries
        .into_iter()
        .map(|(key, node)| convert_optional(&node).map(|value| (key, value)))
        .collect()
}

/// `Some(None)` for the null sentinel, `Some(Some(_))` for a convertible node, `None` if
/// the node is not convertible.
fn convert_optional<T: DynamicTree>(node: &Option<T>) -> Option<Option<JsonValue>> {
    match node {
        None => Some(None),
        Some(node) => from_dynamic(node).map(Some),
    }
}

/// Render a [`JsonValue`] into a dynamic tree; `None` entries become the builder's null.
pub fn to_dynamic<B: DynamicBuilder>(
    value: &JsonValue,
    builder: &mut B,
) -> Result<B::Node, B::Error> {
    match value {
        JsonValue::Array(values) => {
            let mut items = Vec::with_capacity(values.len());
            for element in values {
                items.push(render_optional(element, builder)?);
            }
            builder.sequence(items)
        }
        JsonValue::Object(properties) => {
            let mut entries = Vec::with_capacity(properties.len());
            for (key, property) in properties {
                entries.push((key.clone(), render_optional(property, builder)?));
            }
            builder.mapping(entries)
        }
    }
}

fn render_optional<B: DynamicBuilder>(
    value: &Option<JsonValue>,
    builder: &mut B,
) -> Result<B::Node, B::Error> {
    match value {
        Some(value) => to_dynamic(value, builder),
        None => builder.null(),
    }
}

impl JsonValue {
    /// See [`from_dynamic`].
    pub fn from_dynamic<T: DynamicTree>(tree: &T) -> Option<Self> {
        from_dynamic(tree)
    }

    /// Render into a `serde_json::Value`. Never fails.
    pub fn to_serde_json(&self) -> Value {
        match to_dynamic(self, &mut SerdeJsonBuilder) {
            Ok(tree) => tree,
            Err(never) => match never {},
        }
    }
}

// ============================================================================
// serde_json::Value
// ============================================================================

impl<'a> DynamicTree for &'a Value {
    fn as_sequence(&self) -> Option<Vec<Option<Self>>> {
        let node: &'a Value = *self;
        match node {
            Value::Array(items) => Some(items.iter().map(non_null).collect()),
            _ => None,
        }
    }

    fn as_mapping(&self) -> Option<Vec<(String, Option<Self>)>> {
        let node: &'a Value = *self;
        match node {
            Value::Object(map) => Some(
                map.iter()
                    .map(|(key, value)| (key.clone(), non_null(value)))
                    .collect(),
            ),
            _ => None,
        }
    }
}

fn non_null(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}

/// Builds `serde_json::Value` trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonBuilder;

impl DynamicBuilder for SerdeJsonBuilder {
    type Node = Value;
    type Error = Infallible;

    fn null(&mut self) -> Result<Value, Infallible> {
        Ok(Value::Null)
    }

    fn sequence(&mut self, items: Vec<Value>) -> Result<Value, Infallible> {
        Ok(Value::Array(items))
    }

    fn mapping(&mut self, entries: Vec<(String, Value)>) -> Result<Value, Infallible> {
        Ok(Value::Object(entries.into_iter().collect()))
    }
}

impl TryFrom<&Value> for JsonValue {
    type Error = CompositeError;

    fn try_from(tree: &Value) -> Result<Self, Self::Error> {
        from_dynamic(&tree).ok_or(CompositeError::NotComposite {
            found: describe(tree),
        })
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        value.to_serde_json()
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        value.to_serde_json()
    }
}

/// Name of the top-level shape of a `serde_json::Value`.
///
/// Arrays and objects are reported as such even when a nested element is what made the
/// conversion fail.
fn describe(tree: &Value) -> &'static str {
    match tree {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
