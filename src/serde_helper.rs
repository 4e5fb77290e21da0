//! JSON bridging between Rust types and the JS runtime.
//!
//! Serialization goes through `JsValue` + `JSON.stringify` / `JSON.parse`
//! rather than a native Rust JSON parser, trading a little speed for a
//! smaller WASM binary.

use js_sys::wasm_bindgen::JsValue;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug)]
pub enum Error {
    SerdeWasmBindgen(serde_wasm_bindgen::Error),
    JsSys(JsValue),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SerdeWasmBindgen(e) => write!(f, "serde error: {}", e),
            Error::JsSys(v) => write!(f, "JS error: {:?}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::SerdeWasmBindgen(e)
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<JsValue, Error> {
    // Large numbers must stay plain JS numbers; BigInt breaks
    // JSON.stringify.
    let serializer =
        serde_wasm_bindgen::Serializer::new().serialize_large_number_types_as_bigints(false);
    value.serialize(&serializer).map_err(Error::from)
}

/// Serialize a request payload into a JSON string for a request body.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, Error> {
    let js_val = to_value(value)?;
    let json_str = js_sys::JSON::stringify(&js_val)
        .map_err(Error::JsSys)?
        .as_string()
        .ok_or_else(|| Error::JsSys(JsValue::from_str("JSON.stringify returned non-string")))?;
    Ok(json_str)
}

/// Parse a JSON response body into a typed value.
pub fn from_json_string<T: DeserializeOwned>(s: &str) -> Result<T, Error> {
    let js_val = js_sys::JSON::parse(s).map_err(Error::JsSys)?;
    serde_wasm_bindgen::from_value(js_val).map_err(Error::from)
}
