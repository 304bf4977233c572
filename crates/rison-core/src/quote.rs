//! Percent-encoding for embedding Rison in a URI.
//!
//! Standard query escaping percent-encodes most of the characters Rison uses
//! for structure, which makes Rison URLs unreadable. [`quote_string`] escapes
//! like a form/query encoder (space becomes `+`) and then restores the
//! characters that are safe inside a query value.

use url::form_urlencoded;

/// Escape `s` for use in a URI query, leaving Rison syntax readable.
///
/// # Example
/// ```
/// use rison_core::quote_string;
///
/// assert_eq!(quote_string("(q:'a b',n:!(1,2))"), "(q:'a+b',n:!(1,2))");
/// assert_eq!(quote_string("a&b=c"), "a%26b%3Dc");
/// ```
pub fn quote_string(s: &str) -> String {
    quote_into_string(s.as_bytes())
}

/// Byte-oriented form of [`quote_string`]. Non-UTF-8 bytes are percent-encoded.
pub fn quote(bytes: &[u8]) -> Vec<u8> {
    quote_into_string(bytes).into_bytes()
}

fn quote_into_string(bytes: &[u8]) -> String {
    let escaped: String = form_urlencoded::byte_serialize(bytes).collect();

    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let code = rest.get(at + 1..at + 3).unwrap_or_default();
        match unescape(code) {
            Some(c) => {
                out.push(c);
                rest = &rest[at + 3..];
            }
            None => {
                out.push('%');
                rest = &rest[at + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Characters whose percent-encoding is undone, keyed by upper case hex code.
fn unescape(code: &str) -> Option<char> {
    let c = match code {
        "7E" => '~',
        "21" => '!',
        "2A" => '*',
        "28" => '(',
        "29" => ')',
        "2D" => '-',
        "5F" => '_',
        "2E" => '.',
        "2C" => ',',
        "3A" => ':',
        "40" => '@',
        "24" => '$',
        "27" => '\'',
        "2F" => '/',
        "20" => '+',
        _ => return None,
    };
    Some(c)
}
