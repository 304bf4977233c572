//! Error types for Rison decoding and encoding operations.

use std::fmt;

use thiserror::Error;

use crate::messages::{self, Lang, Position, SUPPORTED_LANGUAGES};
use crate::types::Mode;

/// Number of characters shown on each side of the error position.
const CONTEXT_WINDOW: usize = 5;

/// What went wrong while decoding, with the arguments its message prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A bug or an impossible state; the detail is for diagnostics only.
    Internal(String),
    /// The input is not valid UTF-8.
    Encoding,
    /// No value where one was required.
    EmptyString,
    /// An opening delimiter (`(`, `!(` or `'`) is never closed.
    UnmatchedPair(&'static str),
    /// A required character (`:` or `,`) is missing.
    MissingCharacter(char),
    /// The input ends right after a `!`.
    MissingCharacterAfterEscape,
    /// A character where none belongs, such as a leading comma.
    ExtraCharacter(char),
    /// Input remains after a complete top-level value.
    ExtraCharacterAfterRison(char),
    /// `!` followed by something other than `t`, `f`, `n` or `(`.
    InvalidLiteral(char),
    /// A character that cannot start a value.
    InvalidCharacter(char),
    /// An object key decoded to something other than a string.
    InvalidTypeOfObjectKey,
    /// `!` inside a quoted string followed by something other than `!` or `'`.
    InvalidStringEscape(char),
    /// Text that looked like a number but is not one.
    InvalidNumber(String),
    /// An upper case `E` used as an exponent marker.
    InvalidLargeExp,
}

/// A decode failure: what went wrong and where.
///
/// The error keeps the caller's input (without any implicit O-Rison/A-Rison
/// delimiters) and a byte offset into it, so it can be rendered in any
/// supported language without re-scanning. `Display` renders in English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    text: String,
    pos: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, text: impl Into<String>, pos: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// The kind of error, with its message arguments.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset of the error in [`ParseError::source_text`].
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The input that failed to decode. Invalid UTF-8 is replaced lossily.
    pub fn source_text(&self) -> &str {
        &self.text
    }

    /// Render the error in the language named by `lang` (`"en"`, `"ja"`).
    /// Unknown tags fall back to English.
    pub fn describe(&self, lang: &str) -> String {
        let lang = Lang::from_tag(lang);
        let mut out = messages::message(&self.kind, lang);
        out.push_str(&messages::position(&self.position(), lang));
        out
    }

    /// Language tags understood by [`ParseError::describe`].
    pub fn supported_languages() -> &'static [&'static str] {
        SUPPORTED_LANGUAGES
    }

    /// Slice the context window around the error offset.
    fn position(&self) -> Position<'_> {
        let text = self.text.as_str();
        let mut pos = self.pos.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        let (before, rest) = text.split_at(pos);

        let (left, more_left) = match before.char_indices().rev().nth(CONTEXT_WINDOW - 1) {
            Some((i, _)) => (&before[i..], i > 0),
            None => (before, false),
        };
        let center_len = rest.chars().next().map_or(0, char::len_utf8);
        let (center, after) = rest.split_at(center_len);
        let (right, more_right) = match after.char_indices().nth(CONTEXT_WINDOW) {
            Some((i, _)) => (&after[..i], true),
            None => (after, false),
        };

        if left.is_empty() {
            if center.is_empty() {
                Position::Bare
            } else if right.is_empty() {
                Position::First { center }
            } else {
                Position::Start {
                    center,
                    right,
                    more_right,
                }
            }
        } else if center.is_empty() {
            Position::End { left, more_left }
        } else if right.is_empty() {
            Position::Last {
                left,
                center,
                more_left,
            }
        } else {
            Position::Near {
                pos,
                left,
                center,
                right,
                more_left,
                more_right,
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(SUPPORTED_LANGUAGES[0]))
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur while encoding a value to Rison.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The root value does not fit the requested mode.
    #[error("only {} can be encoded to the {mode}, found {kind}", expected_root(.mode))]
    ModeMismatch { mode: Mode, kind: &'static str },

    /// A map key that cannot become a string.
    #[error("invalid key {key} at {path}")]
    InvalidKey { path: String, key: String },

    /// A value with no Rison representation.
    #[error("non-encodable {kind} value at {path}")]
    Unsupported { path: String, kind: String },

    /// The JSON input of `encode_from_json` did not parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom error raised by a `Serialize` implementation.
    #[error("{0}")]
    Message(String),

    /// A bug or an impossible state.
    #[error("internal error: {0}")]
    Internal(String),
}

fn expected_root(mode: &Mode) -> &'static str {
    match mode {
        Mode::ObjectOnly => "an object",
        Mode::ArrayOnly => "an array",
        Mode::Full => "a value",
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::Message(msg.to_string())
    }
}

/// Errors from the combined operations that bind Rison to Rust types.
#[derive(Error, Debug)]
pub enum Error {
    /// The input was not valid Rison.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The value could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The decoded value does not fit the target type.
    #[error("binding error: {0}")]
    Bind(#[source] serde_json::Error),
}

/// Convenience alias used throughout rison-core.
pub type Result<T> = std::result::Result<T, Error>;
