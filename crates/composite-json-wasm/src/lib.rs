//! WASM bindings for composite-json.
//!
//! Exposes `normalize` and `is_composite` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. Documents cross the boundary as JSON text.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p composite-json-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/composite-json-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/composite_json_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Decode a composite JSON document and re-encode it compactly, keys sorted.
///
/// Throws a JS error if the input is not valid JSON or contains a scalar anywhere.
#[wasm_bindgen]
pub fn normalize(json: &str) -> std::result::Result<String, JsValue> {
    normalize_text(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether `json` is an array or object made only of arrays, objects and nulls.
#[wasm_bindgen(js_name = isComposite)]
pub fn is_composite(json: &str) -> bool {
    composite_json::from_json_str(json).is_ok()
}

fn normalize_text(json: &str) -> composite_json::Result<String> {
    let value = composite_json::from_json_str(json)?;
    composite_json::to_json_string(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_sorts_keys() {
        assert_eq!(
            normalize_text(r#"{"b":[],"a":null}"#).unwrap(),
            r#"{"a":null,"b":[]}"#
        );
    }

    #[test]
    fn normalize_text_reports_mismatch_at_root() {
        let err = normalize_text(r#"[{"x":1}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch at $: expected JsonValue, found sequence"
        );
    }

    #[test]
    fn is_composite_rejects_scalars() {
        assert!(is_composite("[null,{}]"));
        assert!(!is_composite("\"text\""));
        assert!(!is_composite("[true]"));
        assert!(!is_composite("not json"));
    }
}
