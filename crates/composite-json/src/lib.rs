//! # composite-json
//!
//! A typed model for the two **composite** JSON shapes, arrays and objects, with two
//! bridges:
//!
//! - a serde bridge (`Serialize`/`Deserialize` for [`JsonValue`]) that guesses the shape
//!   of whatever a format hands it, object first;
//! - a dynamic-tree bridge ([`dynamic`]) to and from untyped trees owned by other JSON
//!   libraries, array first.
//!
//! Scalars are not values here. A `JsonValue` is an array or an object whose children
//! are `null` or further arrays and objects.
//!
//! ## Quick start
//!
//! ```rust
//! use composite_json::{from_json_str, to_json_string, JsonValue};
//!
//! let value = from_json_str(r#"{"a":[null,{}]}"#).unwrap();
//! let inner = value.as_object().unwrap()["a"].as_ref().unwrap();
//! assert_eq!(inner.as_array().unwrap().len(), 2);
//! assert_eq!(to_json_string(&value).unwrap(), r#"{"a":[null,{}]}"#);
//!
//! // Same value, via the dynamic bridge.
//! let tree = serde_json::json!({"a": [null, {}]});
//! assert_eq!(JsonValue::from_dynamic(&&tree), Some(value));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `JsonValue`, `JsonArray`, `JsonObject`
//! - [`dynamic`]: `DynamicTree`/`DynamicBuilder` and the serde_json implementations
//! - [`decoder`]: `Deserialize` with shape guessing, text parsing helpers
//! - [`encoder`]: `Serialize`, text rendering helpers
//! - [`error`]: `CompositeError`
//! - [`path`]: decode paths carried by type mismatch errors

pub mod decoder;
pub mod dynamic;
pub mod encoder;
pub mod error;
pub mod path;
pub mod value;

pub use decoder::{decode, from_json_slice, from_json_str};
pub use dynamic::{from_dynamic, to_dynamic, DynamicBuilder, DynamicTree, SerdeJsonBuilder};
pub use encoder::{encode, to_json_string, to_json_string_pretty, to_json_writer};
pub use error::{CompositeError, Result};
pub use path::{DecodePath, PathSegment};
pub use value::{JsonArray, JsonObject, JsonValue, Summary};
