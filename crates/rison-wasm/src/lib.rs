//! WASM bindings for rison-core.
//!
//! Exposes `decode`, `encode` and `quote` as `#[wasm_bindgen]` functions that
//! can be called from JavaScript/TypeScript, where Rison URLs are usually
//! built and read. Values cross the boundary as JSON text. Built with
//! `wasm-bindgen-cli`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p rison-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/rison_wasm.wasm
//! ```
//!
//! `mode` is `"full"`, `"object"` or `"array"` (also `"rison"`, `"o-rison"`,
//! `"a-rison"`); an empty string means full Rison.

use rison_core::Mode;
use wasm_bindgen::prelude::*;

/// Decode Rison into compact JSON text.
///
/// Throws a JS error with the message rendered in `lang` (`"en"` by default,
/// or `"ja"`) if the input is not valid Rison.
#[wasm_bindgen]
pub fn decode(rison: &str, mode: &str, lang: Option<String>) -> std::result::Result<String, JsValue> {
    decode_impl(rison, mode, lang.as_deref().unwrap_or("en")).map_err(|e| JsValue::from_str(&e))
}

/// Encode JSON text into Rison.
///
/// Throws a JS error if the input is not valid JSON or does not fit `mode`.
#[wasm_bindgen]
pub fn encode(json: &str, mode: &str) -> std::result::Result<String, JsValue> {
    encode_impl(json, mode).map_err(|e| JsValue::from_str(&e))
}

/// Percent-encode text for a URI query, keeping Rison syntax readable.
#[wasm_bindgen]
pub fn quote(text: &str) -> String {
    rison_core::quote_string(text)
}

fn parse_mode(mode: &str) -> Result<Mode, String> {
    if mode.is_empty() {
        return Ok(Mode::Full);
    }
    mode.parse()
}

fn decode_impl(rison: &str, mode: &str, lang: &str) -> Result<String, String> {
    let mode = parse_mode(mode)?;
    rison_core::decode_to_json(rison.as_bytes(), mode).map_err(|e| e.describe(lang))
}

fn encode_impl(json: &str, mode: &str) -> Result<String, String> {
    let mode = parse_mode(mode)?;
    rison_core::encode_from_json(json, mode).map_err(|e| e.to_string())
}
