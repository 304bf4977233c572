//! Rison Decoder — converts Rison text into a JSON value tree.
//!
//! The grammar needs a single character of lookahead:
//!
//! - `!t`, `!f`, `!n` → `true`, `false`, `null`; `!(` opens an array
//! - `(` opens an object of `key:value` pairs
//! - `'...'` is a quoted string, with `!!` and `!'` as the only escapes
//! - `-` or a digit starts a number (lower case `e` exponent, no `+`)
//! - anything else that is an identifier character starts a bare string
//!
//! # Key design decisions
//!
//! - **Explicit frame stack**: arrays and objects are parsed with a heap-allocated
//!   stack of open containers instead of native recursion, so nesting depth is
//!   bounded by memory rather than by the thread's call stack.
//! - **Implicit delimiters**: O-Rison and A-Rison input is wrapped in `(`…`)` or
//!   `!(`…`)` before parsing, and error offsets are shifted back so they always
//!   point into the caller's text.
//! - **Number validation**: a small state machine decides where a number ends;
//!   the captured text is then validated with serde_json's number grammar.

use std::borrow::Cow;

use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::error::{ErrorKind, ParseError};
use crate::json;
use crate::types::Mode;

/// Characters that never appear in an identifier.
pub(crate) const NOT_ID_CHAR: &[u8] = b" '!:(),*@$";

/// Whitespace skipped between tokens when enabled on the [`Decoder`].
const WHITESPACE: &[u8] = b" \t\n\r\x0c";

/// Largest integer an f64 represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Decode Rison text into a value tree.
///
/// The input must be valid UTF-8. `mode` selects whether the text is plain
/// Rison, the body of an object (O-Rison) or the body of an array (A-Rison).
///
/// # Example
/// ```
/// use rison_core::{decode, Mode};
/// use serde_json::json;
///
/// let value = decode(b"(a:!(1,2),b:'hello world')", Mode::Full).unwrap();
/// assert_eq!(value, json!({"a": [1, 2], "b": "hello world"}));
///
/// let value = decode(b"a:1,b:!f", Mode::ObjectOnly).unwrap();
/// assert_eq!(value, json!({"a": 1, "b": false}));
/// ```
pub fn decode(rison: &[u8], mode: Mode) -> Result<Value, ParseError> {
    Decoder::new(mode).decode(rison)
}

/// Decode Rison held in a `&str`.
pub fn decode_str(rison: &str, mode: Mode) -> Result<Value, ParseError> {
    Decoder::new(mode).decode(rison.as_bytes())
}

/// Decode Rison text into its compact JSON representation.
///
/// Object members keep the order in which they appear in the Rison text.
/// Nesting depth is bounded by memory, not by the thread's stack.
pub fn decode_to_json(rison: &[u8], mode: Mode) -> Result<String, ParseError> {
    let value = decode(rison, mode)?;
    let rendered = json::to_json(&value);
    json::dismantle(value);
    rendered.map_err(|e| {
        ParseError::new(
            ErrorKind::Internal(e.to_string()),
            String::from_utf8_lossy(rison),
            0,
        )
    })
}

/// Configurable decoder.
///
/// ```
/// use rison_core::{Decoder, Mode};
/// use serde_json::json;
///
/// let value = Decoder::new(Mode::Full)
///     .skip_whitespace(true)
///     .decode(b"( a : 1 , b : !( x , y ) )")
///     .unwrap();
/// assert_eq!(value, json!({"a": 1, "b": ["x", "y"]}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    mode: Mode,
    skip_whitespace: bool,
}

impl Decoder {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            skip_whitespace: false,
        }
    }

    /// Skip whitespace between tokens. Canonical Rison has none, so this is off
    /// by default and whitespace is rejected like any other stray character.
    /// Whitespace is never skipped inside identifiers, numbers, or quoted strings.
    pub fn skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }

    pub fn decode(&self, rison: &[u8]) -> Result<Value, ParseError> {
        trace!(mode = %self.mode, len = rison.len(), "decoding rison");

        let text = std::str::from_utf8(rison).map_err(|_| {
            ParseError::new(ErrorKind::Encoding, String::from_utf8_lossy(rison), 0)
        })?;

        let wrapped: Cow<'_, str> = match self.mode {
            Mode::Full => Cow::Borrowed(text),
            mode => Cow::Owned(format!("{}{}{}", mode.prefix(), text, mode.suffix())),
        };

        let implicit_close = match self.mode {
            Mode::Full => None,
            _ => Some(wrapped.len() - 1),
        };
        let mut parser = Parser {
            src: &wrapped,
            bytes: wrapped.as_bytes(),
            index: 0,
            skip_whitespace: self.skip_whitespace,
            implicit_close,
        };

        parser.parse().map_err(|failure| {
            let pos = failure
                .pos
                .saturating_sub(self.mode.prefix().len())
                .min(text.len());
            debug!(kind = ?failure.kind, pos, "rison decode failed");
            ParseError::new(failure.kind, text, pos)
        })
    }
}

/// Error raised inside the parser, with an offset into the wrapped input.
#[derive(Debug)]
struct Failure {
    kind: ErrorKind,
    pos: usize,
}

type ParseResult<T> = std::result::Result<T, Failure>;

/// A container that has been opened but not yet closed.
enum Frame {
    Array {
        start: usize,
        items: Vec<Value>,
    },
    Object {
        start: usize,
        map: Map<String, Value>,
        key: Option<String>,
    },
}

impl Frame {
    fn opener(&self) -> &'static str {
        match self {
            Frame::Array { .. } => "!(",
            Frame::Object { .. } => "(",
        }
    }

    fn start(&self) -> usize {
        match self {
            Frame::Array { start, .. } | Frame::Object { start, .. } => *start,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array { items, .. } => Value::Array(items),
            Frame::Object { map, .. } => Value::Object(map),
        }
    }
}

/// Result of reading the start of a value.
enum Token {
    /// A complete scalar.
    Scalar(Value),
    /// An opened container, pushed onto the stack.
    Open(Frame),
}

/// Phases of the number state machine.
#[derive(Clone, Copy, PartialEq)]
enum NumberState {
    Int,
    Frac,
    Exp,
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    index: usize,
    skip_whitespace: bool,
    /// Offset of the `)` added around O-Rison and A-Rison input.
    implicit_close: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Parse one value and require the input to end after it.
    fn parse(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        if self.skip_whitespace {
            self.skip_ws();
        }
        if self.index < self.bytes.len() {
            let c = self.char_at(self.index);
            if c == 'E' && value.is_number() {
                return Err(self.fail(self.index, ErrorKind::InvalidLargeExp));
            }
            return Err(self.fail(self.index, ErrorKind::ExtraCharacterAfterRison(c)));
        }
        Ok(value)
    }

    /// Parse a complete value, including any nested containers.
    ///
    /// Containers are kept on `stack`; a finished value is handed to the
    /// innermost open container, which either asks for the next value (after
    /// `,` or `:`) or closes and becomes the finished value handed to its parent.
    fn parse_value(&mut self) -> ParseResult<Value> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut comma: Option<usize> = None;

        'value: loop {
            let trailing_comma = comma.take().filter(|_| stack.len() == 1);
            let (mut value, mut start) = match self.read_token(trailing_comma)? {
                (Token::Scalar(value), start) => (value, start),
                (Token::Open(frame), start) => match self.next() {
                    None => return Err(self.fail(self.index, ErrorKind::UnmatchedPair(frame.opener()))),
                    Some(b')') => (frame.into_value(), start),
                    Some(_) => {
                        self.index -= 1;
                        stack.push(frame);
                        continue 'value;
                    }
                },
            };

            loop {
                let Some(frame) = stack.last_mut() else {
                    return Ok(value);
                };
                let opener = frame.opener();

                match frame {
                    Frame::Array { items, .. } => items.push(value),
                    Frame::Object { map, key, .. } => match key.take() {
                        Some(k) => {
                            map.insert(k, value);
                        }
                        None => {
                            let Value::String(k) = value else {
                                return Err(self.fail(start, ErrorKind::InvalidTypeOfObjectKey));
                            };
                            *key = Some(k);
                            self.expect(b':')?;
                            continue 'value;
                        }
                    },
                }

                match self.next() {
                    None => return Err(self.fail(self.index, ErrorKind::UnmatchedPair(opener))),
                    Some(b',') => {
                        comma = Some(self.index - 1);
                        continue 'value;
                    }
                    Some(b')') => {
                        let Some(frame) = stack.pop() else {
                            return Err(self.fail(
                                self.index,
                                ErrorKind::Internal("container stack underflow".to_string()),
                            ));
                        };
                        start = frame.start();
                        value = frame.into_value();
                    }
                    Some(_) => {
                        let pos = self.index - 1;
                        return Err(self.fail(pos, ErrorKind::MissingCharacter(',')));
                    }
                }
            }
        }
    }

    /// Read the first token of a value, returning it with its start offset.
    ///
    /// `comma` is the offset of a `,` just consumed at the top level of
    /// O-Rison or A-Rison. Reaching the implicit `)` here means the caller's
    /// text ended early: a trailing comma is reported at the comma, anything
    /// else as running out of input.
    fn read_token(&mut self, comma: Option<usize>) -> ParseResult<(Token, usize)> {
        let Some(c) = self.next() else {
            return Err(self.fail(self.index, ErrorKind::EmptyString));
        };
        let start = self.index - 1;

        if self.implicit_close == Some(start) {
            return Err(match comma {
                Some(pos) => self.fail(pos, ErrorKind::ExtraCharacter(',')),
                None => self.fail(start, ErrorKind::EmptyString),
            });
        }

        let token = match c {
            b'!' => self.read_special(start)?,
            b'(' => Token::Open(Frame::Object {
                start,
                map: Map::new(),
                key: None,
            }),
            b'\'' => Token::Scalar(Value::String(self.read_quoted()?)),
            b'-' | b'0'..=b'9' => Token::Scalar(self.read_number(start)?),
            b',' => return Err(self.fail(start, ErrorKind::ExtraCharacter(','))),
            _ => Token::Scalar(Value::String(self.read_identifier(start)?)),
        };
        Ok((token, start))
    }

    /// Read the character after `!`.
    fn read_special(&mut self, start: usize) -> ParseResult<Token> {
        let Some(&c) = self.bytes.get(self.index) else {
            return Err(self.fail(self.index, ErrorKind::MissingCharacterAfterEscape));
        };
        let token = match c {
            b't' => Token::Scalar(Value::Bool(true)),
            b'f' => Token::Scalar(Value::Bool(false)),
            b'n' => Token::Scalar(Value::Null),
            b'(' => Token::Open(Frame::Array {
                start,
                items: Vec::new(),
            }),
            _ => {
                let c = self.char_at(self.index);
                return Err(self.fail(self.index, ErrorKind::InvalidLiteral(c)));
            }
        };
        self.index += 1;
        Ok(token)
    }

    /// Read a quoted string body; the opening `'` is already consumed.
    fn read_quoted(&mut self) -> ParseResult<String> {
        let mut out = String::new();
        let mut segment = self.index;
        loop {
            match self.bytes.get(self.index) {
                None => {
                    return Err(self.fail(self.bytes.len(), ErrorKind::UnmatchedPair("'")));
                }
                Some(b'\'') => {
                    out.push_str(&self.src[segment..self.index]);
                    self.index += 1;
                    return Ok(out);
                }
                Some(b'!') => {
                    out.push_str(&self.src[segment..self.index]);
                    self.index += 1;
                    match self.bytes.get(self.index) {
                        None => {
                            return Err(
                                self.fail(self.index, ErrorKind::MissingCharacterAfterEscape)
                            );
                        }
                        Some(&c) if c == b'!' || c == b'\'' => {
                            out.push(char::from(c));
                            self.index += 1;
                            segment = self.index;
                        }
                        Some(_) => {
                            let c = self.char_at(self.index);
                            return Err(self.fail(self.index, ErrorKind::InvalidStringEscape(c)));
                        }
                    }
                }
                Some(_) => self.index += 1,
            }
        }
    }

    /// Read a number whose first character (`-` or a digit) is at `start`.
    ///
    /// A `-` is accepted once at the start of the mantissa and once right after
    /// the `e`; `.` moves from the integer to the fraction; `e` moves to the
    /// exponent. Any other character ends the number without being consumed.
    fn read_number(&mut self, start: usize) -> ParseResult<Value> {
        let mut state = NumberState::Int;
        let mut minus_permitted = true;

        while let Some(&c) = self.bytes.get(self.index) {
            if c.is_ascii_digit() {
                self.index += 1;
                continue;
            }
            if c == b'-' && minus_permitted {
                minus_permitted = false;
                self.index += 1;
                continue;
            }
            state = match (state, c) {
                (NumberState::Int, b'.') => NumberState::Frac,
                (NumberState::Int | NumberState::Frac, b'e') => {
                    minus_permitted = true;
                    NumberState::Exp
                }
                _ => break,
            };
            self.index += 1;
        }

        let text = &self.src[start..self.index];
        match parse_number(text) {
            Some(n) => Ok(Value::Number(n)),
            None => Err(self.fail(start, ErrorKind::InvalidNumber(text.to_string()))),
        }
    }

    /// Read a bare identifier whose first character is at `start`.
    fn read_identifier(&mut self, start: usize) -> ParseResult<String> {
        let first = self.bytes[start];
        if NOT_ID_CHAR.contains(&first) || first.is_ascii_digit() || first == b'-' {
            let c = self.char_at(start);
            return Err(self.fail(start, ErrorKind::InvalidCharacter(c)));
        }
        while let Some(c) = self.bytes.get(self.index) {
            if NOT_ID_CHAR.contains(c) {
                break;
            }
            self.index += 1;
        }
        Ok(self.src[start..self.index].to_string())
    }

    /// Consume the next character and require it to be `expected`.
    fn expect(&mut self, expected: u8) -> ParseResult<()> {
        match self.next() {
            Some(c) if c == expected => Ok(()),
            Some(_) => Err(self.fail(
                self.index - 1,
                ErrorKind::MissingCharacter(char::from(expected)),
            )),
            None => Err(self.fail(
                self.index,
                ErrorKind::MissingCharacter(char::from(expected)),
            )),
        }
    }

    /// Consume and return the next byte, skipping whitespace if enabled.
    fn next(&mut self) -> Option<u8> {
        while let Some(&c) = self.bytes.get(self.index) {
            self.index += 1;
            if !(self.skip_whitespace && WHITESPACE.contains(&c)) {
                return Some(c);
            }
        }
        None
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.bytes.get(self.index) {
            if !WHITESPACE.contains(c) {
                break;
            }
            self.index += 1;
        }
    }

    /// The full character starting at byte offset `pos`.
    fn char_at(&self, pos: usize) -> char {
        self.src
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn fail(&self, pos: usize, kind: ErrorKind) -> Failure {
        Failure { kind, pos }
    }
}

/// Validate number text against the JSON number grammar and convert it.
///
/// Integral values within ±(2^53 - 1) are stored as integers, so `1.5e2` and
/// `150` decode to the same value. Out-of-range magnitudes are rejected.
fn parse_number(text: &str) -> Option<Number> {
    let n: Number = serde_json::from_str(text).ok()?;
    if n.is_f64() {
        let f = n.as_f64()?;
        if !f.is_finite() {
            return None;
        }
        if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
            return Some(Number::from(f as i64));
        }
    }
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_normalizes_integral_floats() {
        assert_eq!(parse_number("1.5e2"), Some(Number::from(150)));
        assert_eq!(parse_number("-0"), Some(Number::from(0)));
        assert_eq!(parse_number("2.50").and_then(|n| n.as_f64()), Some(2.5));
    }

    #[test]
    fn parse_number_rejects_non_json_forms() {
        for text in ["-", "01", "1.", ".5", "1e", "1e-", "--1", "1-", "1e9999999999999999"] {
            assert_eq!(parse_number(text), None, "{text} should be rejected");
        }
    }

    #[test]
    fn parse_number_keeps_large_integers() {
        assert_eq!(
            parse_number("18446744073709551615"),
            Some(Number::from(u64::MAX))
        );
    }

    #[test]
    fn number_stops_before_upper_case_exponent() {
        let mut parser = Parser {
            src: "1E5",
            bytes: b"1E5",
            index: 1,
            skip_whitespace: false,
            implicit_close: None,
        };
        let value = parser.read_number(0).unwrap();
        assert_eq!(value, Value::Number(Number::from(1)));
        assert_eq!(parser.index, 1);
    }
}
