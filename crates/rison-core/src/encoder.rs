//! Rison Encoder — converts a JSON value tree into canonical Rison.
//!
//! The output is canonical so that equal values always produce identical text,
//! which keeps Rison URLs cacheable:
//!
//! - **Sorted keys**: object members are emitted in ascending byte order of their keys
//! - **Minimal quoting**: strings that are valid identifiers are emitted bare;
//!   everything else is wrapped in `'...'` with `!` and `'` escaped by `!`
//! - **Number normalization**: shortest round-trip digits, lower case `e`, no `+`,
//!   `-0` → `0`
//!
//! # Example
//! ```
//! use rison_core::{encode, Mode};
//! use serde_json::json;
//!
//! let value = json!({"b": true, "a": [7, 8, 9], "s": "hello world"});
//! assert_eq!(encode(&value, Mode::Full).unwrap(), "(a:!(7,8,9),b:!t,s:'hello world')");
//! assert_eq!(encode(&value, Mode::ObjectOnly).unwrap(), "a:!(7,8,9),b:!t,s:'hello world'");
//! ```

use serde_json::{Number, Value};
use tracing::{debug, trace};

use crate::decoder::NOT_ID_CHAR;
use crate::error::EncodeError;
use crate::types::{kind_name, Mode};

/// Encode a value tree into Rison.
///
/// In [`Mode::ObjectOnly`] the root must be an object and in
/// [`Mode::ArrayOnly`] an array; the outer delimiters are left off the output.
/// An empty object in O-Rison and an empty array in A-Rison therefore encode
/// to `""`, which decodes back to the same empty container.
pub fn encode(value: &Value, mode: Mode) -> Result<String, EncodeError> {
    trace!(mode = %mode, "encoding rison");
    check_mode(value, mode)?;

    let mut out = String::new();
    encode_value(value, &mut out);
    strip_mode(out, mode)
}

/// Encode a JSON string into Rison.
///
/// Returns [`EncodeError::Json`] if the input is not valid JSON.
pub fn encode_from_json(json: &str, mode: Mode) -> Result<String, EncodeError> {
    let value: Value = serde_json::from_str(json)?;
    encode(&value, mode)
}

/// Reject roots that cannot be written without their outer delimiters.
fn check_mode(value: &Value, mode: Mode) -> Result<(), EncodeError> {
    let fits = match mode {
        Mode::Full => true,
        Mode::ObjectOnly => value.is_object(),
        Mode::ArrayOnly => value.is_array(),
    };
    if fits {
        Ok(())
    } else {
        debug!(mode = %mode, kind = kind_name(value), "root does not fit mode");
        Err(EncodeError::ModeMismatch {
            mode,
            kind: kind_name(value),
        })
    }
}

/// Remove the outer `(`…`)` or `!(`…`)` for O-Rison and A-Rison output.
fn strip_mode(out: String, mode: Mode) -> Result<String, EncodeError> {
    if mode == Mode::Full {
        return Ok(out);
    }
    out.strip_prefix(mode.prefix())
        .and_then(|rest| rest.strip_suffix(mode.suffix()))
        .map(str::to_string)
        .ok_or_else(|| EncodeError::Internal(format!("failed to encode the value to the {mode}")))
}

/// Pending output while walking the tree.
enum Task<'a> {
    Value(&'a Value),
    Key(&'a str),
    Literal(&'static str),
}

/// Walk the tree with an explicit stack; nesting depth is bounded by memory.
///
/// Containers push their closing delimiter first and their children in reverse,
/// so popping the stack emits everything in document order.
fn encode_value(root: &Value, out: &mut String) {
    let mut tasks = vec![Task::Value(root)];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Literal(s) => out.push_str(s),
            Task::Key(key) => {
                encode_string(key, out);
                out.push(':');
            }
            Task::Value(value) => match value {
                Value::Null => out.push_str("!n"),
                Value::Bool(b) => out.push_str(if *b { "!t" } else { "!f" }),
                Value::Number(n) => out.push_str(&format_number(n)),
                Value::String(s) => encode_string(s, out),
                Value::Array(items) => {
                    out.push_str("!(");
                    tasks.push(Task::Literal(")"));
                    for (i, item) in items.iter().enumerate().rev() {
                        tasks.push(Task::Value(item));
                        if i > 0 {
                            tasks.push(Task::Literal(","));
                        }
                    }
                }
                Value::Object(map) => {
                    out.push('(');
                    tasks.push(Task::Literal(")"));
                    let mut members: Vec<(&String, &Value)> = map.iter().collect();
                    members.sort_unstable_by(|a, b| a.0.cmp(b.0));
                    for (i, (key, value)) in members.into_iter().enumerate().rev() {
                        tasks.push(Task::Value(value));
                        tasks.push(Task::Key(key));
                        if i > 0 {
                            tasks.push(Task::Literal(","));
                        }
                    }
                }
            },
        }
    }
}

/// Format a JSON number in its shortest round-trip form.
///
/// - Integers are written verbatim
/// - Floats with magnitude in `[1e-6, 1e21)` use plain decimal (`150`, `0.001`)
/// - Others use exponent form without `+` or leading zeros (`1e30`, `1.2e-7`)
/// - Negative zero normalizes to `0`
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => format_float(f),
        None => n.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if (1e-6..1e21).contains(&abs) {
        format!("{f}")
    } else {
        // `{:e}` never writes a `+` in the exponent.
        format!("{f:e}")
    }
}

/// Emit a string bare if it is an identifier, quoted and escaped otherwise.
fn encode_string(s: &str, out: &mut String) {
    if is_id(s) {
        out.push_str(s);
        return;
    }
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' || ch == '!' {
            out.push('!');
        }
        out.push(ch);
    }
    out.push('\'');
}

/// Test if a string can be written without quotes: non-empty, not starting
/// with a digit or `-`, and free of reserved characters.
fn is_id(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some((&first, rest)) = bytes.split_first() else {
        return false;
    };
    if NOT_ID_CHAR.contains(&first) || first.is_ascii_digit() || first == b'-' {
        return false;
    }
    rest.iter().all(|b| !NOT_ID_CHAR.contains(b))
}
