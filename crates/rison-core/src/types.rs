//! Shared types: the value tree and the Rison variant selector.
//!
//! Decoding and encoding both go through `serde_json::Value` as the value
//! model. It already is the JSON data model as a sum type (null, bool, number,
//! string, array, string-keyed object), and it is what the serde binding
//! layer consumes and produces.

use std::fmt;
use std::str::FromStr;

/// The value tree shared by decode output and encode input.
pub use serde_json::Value;

/// Selects which Rison variation to decode or encode.
///
/// O-Rison and A-Rison are the forms typically placed in a URI query: the
/// outer `(...)` or `!(...)` of the top-level object or array is implied
/// rather than written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Plain Rison: any value, composite types carry explicit delimiters.
    #[default]
    Full,
    /// O-Rison: the text is the body of an object, without `(` and `)`.
    ObjectOnly,
    /// A-Rison: the text is the body of an array, without `!(` and `)`.
    ArrayOnly,
}

impl Mode {
    /// Delimiter implied in front of the text.
    pub fn prefix(self) -> &'static str {
        match self {
            Mode::Full => "",
            Mode::ObjectOnly => "(",
            Mode::ArrayOnly => "!(",
        }
    }

    /// Delimiter implied after the text.
    pub fn suffix(self) -> &'static str {
        match self {
            Mode::Full => "",
            Mode::ObjectOnly | Mode::ArrayOnly => ")",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Full => "Rison",
            Mode::ObjectOnly => "O-Rison",
            Mode::ArrayOnly => "A-Rison",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "rison" => Ok(Mode::Full),
            "object" | "o-rison" | "o" => Ok(Mode::ObjectOnly),
            "array" | "a-rison" | "a" => Ok(Mode::ArrayOnly),
            other => Err(format!(
                "unknown mode '{}' (expected full, object or array)",
                other
            )),
        }
    }
}

/// Short name of a value's JSON type, used in encode error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
