//! # rison-core
//!
//! Pure-Rust encoder and decoder for **Rison**, a compact JSON notation that
//! survives being placed in a URI.
//!
//! Rison replaces JSON's punctuation with characters that URI escaping leaves
//! alone: objects are `(key:value,...)`, arrays are `!(...)`, literals are
//! `!t`, `!f` and `!n`, and strings only need `'...'` quotes when they are not
//! plain identifiers. Two variations drop the outer delimiters of a top-level
//! object (O-Rison) or array (A-Rison), see [`Mode`].
//!
//! ## Quick start
//!
//! ```rust
//! use rison_core::{decode, encode, Mode};
//! use serde_json::json;
//!
//! // Rison → value
//! let value = decode(b"(name:Alice,scores:!(95,87,92))", Mode::Full).unwrap();
//! assert_eq!(value, json!({"name": "Alice", "scores": [95, 87, 92]}));
//!
//! // value → Rison (canonical: sorted keys, minimal quoting)
//! assert_eq!(encode(&value, Mode::ObjectOnly).unwrap(), "name:Alice,scores:!(95,87,92)");
//! ```
//!
//! Decode errors carry their offset and render with a snippet of the input,
//! in English or Japanese:
//!
//! ```rust
//! use rison_core::{decode, Mode};
//!
//! let err = decode(b"(", Mode::Full).unwrap_err();
//! assert_eq!(err.to_string(), r#"unmatched "(" (at the end of string "(" -> EOS)"#);
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — Rison bytes → [`Value`]
//! - [`encoder`] — [`Value`] → canonical Rison
//! - [`binding`] — serde `Serialize`/`Deserialize` types ↔ Rison
//! - [`quote`] — URI query escaping that keeps Rison readable
//! - [`json`] — JSON text output that, like the codec, does not recurse
//! - [`error`] — decode errors with localised rendering, encode errors
//! - [`types`] — the value tree and [`Mode`]

pub mod binding;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
mod messages;
pub mod quote;
pub mod types;

pub use binding::{from_slice, from_str, to_string, to_value, to_vec};
pub use decoder::{decode, decode_str, decode_to_json, Decoder};
pub use encoder::{encode, encode_from_json};
pub use error::{EncodeError, Error, ErrorKind, ParseError, Result};
pub use messages::SUPPORTED_LANGUAGES;
pub use quote::{quote, quote_string};
pub use types::{Mode, Value};
