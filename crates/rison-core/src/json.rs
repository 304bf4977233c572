//! JSON text output for decoded value trees.
//!
//! `serde_json`'s serializer recurses once per nesting level, which overflows
//! ordinary thread stacks on deeply nested Rison. These writers walk the tree
//! with an explicit stack, like the encoder, and only hand leaf strings and
//! numbers to `serde_json` so escaping and float formatting stay identical.
//!
//! ```
//! use rison_core::json::{to_json, to_json_pretty};
//! use serde_json::json;
//!
//! let value = json!({"b": [1, 2], "a": null});
//! assert_eq!(to_json(&value).unwrap(), r#"{"b":[1,2],"a":null}"#);
//! assert_eq!(
//!     to_json_pretty(&value).unwrap(),
//!     "{\n  \"b\": [\n    1,\n    2\n  ],\n  \"a\": null\n}"
//! );
//! ```

use serde_json::Value;

/// Write a value as compact JSON. Object members keep their stored order.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    write(value, false)
}

/// Write a value as JSON indented by two spaces, in `serde_json`'s pretty layout.
pub fn to_json_pretty(value: &Value) -> Result<String, serde_json::Error> {
    write(value, true)
}

/// Pending output while walking the tree.
enum Task<'a> {
    Value(&'a Value, usize),
    Key(&'a str),
    Literal(&'static str),
    /// Line break followed by indentation for the given depth (pretty only).
    Newline(usize),
}

fn write(root: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    let mut tasks = vec![Task::Value(root, 0)];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Literal(s) => out.push_str(s),
            Task::Newline(depth) => {
                out.push('\n');
                for _ in 0..depth {
                    out.push_str("  ");
                }
            }
            Task::Key(key) => {
                out.push_str(&serde_json::to_string(key)?);
                out.push_str(if pretty { ": " } else { ":" });
            }
            Task::Value(value, depth) => match value {
                Value::Null => out.push_str("null"),
                Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
                Value::Number(n) => out.push_str(&serde_json::to_string(n)?),
                Value::String(s) => out.push_str(&serde_json::to_string(s)?),
                Value::Array(items) if items.is_empty() => out.push_str("[]"),
                Value::Object(map) if map.is_empty() => out.push_str("{}"),
                Value::Array(items) => {
                    out.push('[');
                    tasks.push(Task::Literal("]"));
                    if pretty {
                        tasks.push(Task::Newline(depth));
                    }
                    for (i, item) in items.iter().enumerate().rev() {
                        tasks.push(Task::Value(item, depth + 1));
                        if pretty {
                            tasks.push(Task::Newline(depth + 1));
                        }
                        if i > 0 {
                            tasks.push(Task::Literal(","));
                        }
                    }
                }
                Value::Object(map) => {
                    out.push('{');
                    tasks.push(Task::Literal("}"));
                    if pretty {
                        tasks.push(Task::Newline(depth));
                    }
                    let members: Vec<(&String, &Value)> = map.iter().collect();
                    for (i, (key, value)) in members.into_iter().enumerate().rev() {
                        tasks.push(Task::Value(value, depth + 1));
                        tasks.push(Task::Key(key));
                        if pretty {
                            tasks.push(Task::Newline(depth + 1));
                        }
                        if i > 0 {
                            tasks.push(Task::Literal(","));
                        }
                    }
                }
            },
        }
    }

    Ok(out)
}

/// Tear a value tree down without recursion.
///
/// Dropping a `Value` recurses once per level; moving every child onto a
/// heap stack first leaves each container empty by the time it is dropped.
pub fn dismantle(root: Value) {
    let mut stack = vec![root];
    while let Some(value) = stack.pop() {
        match value {
            Value::Array(items) => stack.extend(items),
            Value::Object(map) => stack.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}
