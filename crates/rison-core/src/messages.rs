//! Localised message tables for decode errors.
//!
//! Every rendered error is the kind-specific message followed by a positional
//! suffix describing where in the input the error was detected. Both halves are
//! looked up by language; unknown language tags fall back to English.
//!
//! The tables are plain `match` expressions: immutable, process-wide, and safe to
//! use from any number of threads.

use crate::error::ErrorKind;

/// Language tags accepted by [`crate::ParseError::describe`], default first.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "ja"];

/// A message language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lang {
    En,
    Ja,
}

impl Lang {
    /// Resolve a language tag, falling back to English for anything unknown.
    pub(crate) fn from_tag(tag: &str) -> Lang {
        match tag {
            "ja" => Lang::Ja,
            _ => Lang::En,
        }
    }
}

/// Where an error sits relative to the 5-character context window.
///
/// Built by [`crate::ParseError`] from its source text and offset; each variant
/// carries only the pieces its template prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position<'a> {
    /// Nothing to show (empty input).
    Bare,
    /// The input is a single character.
    First { center: &'a str },
    /// The first character, with text after it.
    Start {
        center: &'a str,
        right: &'a str,
        more_right: bool,
    },
    /// Past the last character.
    End { left: &'a str, more_left: bool },
    /// The last character.
    Last {
        left: &'a str,
        center: &'a str,
        more_left: bool,
    },
    /// Anywhere else.
    Near {
        pos: usize,
        left: &'a str,
        center: &'a str,
        right: &'a str,
        more_left: bool,
        more_right: bool,
    },
}

/// Render the kind-specific part of an error message.
pub(crate) fn message(kind: &ErrorKind, lang: Lang) -> String {
    match lang {
        Lang::En => message_en(kind),
        Lang::Ja => message_ja(kind),
    }
}

fn message_en(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::Internal(detail) => format!("internal error: {detail}"),
        ErrorKind::Encoding => "Rison must be a valid UTF-8 string".to_string(),
        ErrorKind::EmptyString => "empty string".to_string(),
        ErrorKind::UnmatchedPair(open) => format!("unmatched \"{open}\""),
        ErrorKind::MissingCharacter(c) => format!("missing \"{c}\""),
        ErrorKind::MissingCharacterAfterEscape => "missing character after \"!\"".to_string(),
        ErrorKind::ExtraCharacter(c) => format!("extra character \"{c}\""),
        ErrorKind::ExtraCharacterAfterRison(c) => {
            format!("extra character \"{c}\" after valid Rison")
        }
        ErrorKind::InvalidLiteral(c) => format!("invalid literal \"!{c}\""),
        ErrorKind::InvalidCharacter(c) => format!("invalid character \"{c}\""),
        ErrorKind::InvalidTypeOfObjectKey => "object key must be a string".to_string(),
        ErrorKind::InvalidStringEscape(c) => format!("invalid string escape \"!{c}\""),
        ErrorKind::InvalidNumber(text) => format!("invalid number \"{text}\""),
        ErrorKind::InvalidLargeExp => "large case \"E\" for exponent cannot be used".to_string(),
    }
}

fn message_ja(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::Internal(detail) => format!("内部エラー: {detail}"),
        ErrorKind::Encoding => "Risonは正しいUTF-8文字列である必要があります".to_string(),
        ErrorKind::EmptyString => "文字列が空です".to_string(),
        ErrorKind::UnmatchedPair(open) => format!("\"{open}\" が閉じていません"),
        ErrorKind::MissingCharacter(c) => format!("\"{c}\" が必要です"),
        ErrorKind::MissingCharacterAfterEscape => "\"!\" の後に文字が必要です".to_string(),
        ErrorKind::ExtraCharacter(c) => format!("\"{c}\" が余分です"),
        ErrorKind::ExtraCharacterAfterRison(c) => {
            format!("正しいRisonの後に余分な文字 \"{c}\" が見つかりました")
        }
        ErrorKind::InvalidLiteral(c) => format!("不正なリテラル \"!{c}\" が見つかりました"),
        ErrorKind::InvalidCharacter(c) => format!("不正な文字 \"{c}\" が見つかりました"),
        ErrorKind::InvalidTypeOfObjectKey => {
            "オブジェクトキーは文字列である必要があります".to_string()
        }
        ErrorKind::InvalidStringEscape(c) => {
            format!("不正なエスケープ文字列 \"!{c}\" が見つかりました")
        }
        ErrorKind::InvalidNumber(text) => format!("不正な数値 \"{text}\" が見つかりました"),
        ErrorKind::InvalidLargeExp => "指数表記に大文字の \"E\" は使用できません".to_string(),
    }
}

/// Render the positional suffix (including its leading space), or an empty
/// string for [`Position::Bare`].
pub(crate) fn position(position: &Position<'_>, lang: Lang) -> String {
    let (ellipsis_left, ellipsis_right) = match lang {
        Lang::En => (".. ", " .."),
        Lang::Ja => ("〜 ", " 〜"),
    };
    let el = |more: bool| if more { ellipsis_left } else { "" };
    let er = |more: bool| if more { ellipsis_right } else { "" };

    match (*position, lang) {
        (Position::Bare, _) => String::new(),

        (Position::First { center }, Lang::En) => {
            format!(" (at the first character \"{center}\")")
        }
        (Position::First { center }, Lang::Ja) => format!(" (場所: 先頭文字: \"{center}\")"),

        (
            Position::Start {
                center,
                right,
                more_right,
            },
            Lang::En,
        ) => format!(
            " (at the first character \"{center}\" -> \"{right}\"{})",
            er(more_right)
        ),
        (
            Position::Start {
                center,
                right,
                more_right,
            },
            Lang::Ja,
        ) => format!(
            " (場所: 先頭文字付近: \"{center}\" → \"{right}\"{})",
            er(more_right)
        ),

        (Position::End { left, more_left }, Lang::En) => {
            format!(" (at the end of string {}\"{left}\" -> EOS)", el(more_left))
        }
        (Position::End { left, more_left }, Lang::Ja) => {
            format!(" (場所: 文字列終端: {}\"{left}\" → EOS)", el(more_left))
        }

        (
            Position::Last {
                left,
                center,
                more_left,
            },
            Lang::En,
        ) => format!(
            " (at the last character {}\"{left}\" -> \"{center}\")",
            el(more_left)
        ),
        (
            Position::Last {
                left,
                center,
                more_left,
            },
            Lang::Ja,
        ) => format!(
            " (場所: 終端文字: {}\"{left}\" → \"{center}\")",
            el(more_left)
        ),

        (
            Position::Near {
                pos,
                left,
                center,
                right,
                more_left,
                more_right,
            },
            Lang::En,
        ) => format!(
            " (at [{pos}] near {}\"{left}\" -> \"{center}\" -> \"{right}\"{})",
            el(more_left),
            er(more_right)
        ),
        (
            Position::Near {
                pos,
                left,
                center,
                right,
                more_left,
                more_right,
            },
            Lang::Ja,
        ) => format!(
            " (場所: [{pos}]付近: {}\"{left}\" → \"{center}\" → \"{right}\"{})",
            el(more_left),
            er(more_right)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Lang::from_tag(""), Lang::En);
        assert_eq!(Lang::from_tag("fr"), Lang::En);
        assert_eq!(Lang::from_tag("ja"), Lang::Ja);
    }

    #[test]
    fn english_messages_carry_arguments() {
        assert_eq!(
            message(&ErrorKind::UnmatchedPair("!("), Lang::En),
            "unmatched \"!(\""
        );
        assert_eq!(
            message(&ErrorKind::InvalidLiteral('z'), Lang::En),
            "invalid literal \"!z\""
        );
        assert_eq!(
            message(&ErrorKind::InvalidNumber("1e-".to_string()), Lang::En),
            "invalid number \"1e-\""
        );
    }

    #[test]
    fn near_suffix_with_both_ellipses() {
        let p = Position::Near {
            pos: 7,
            left: "bcdef",
            center: "g",
            right: "hijkl",
            more_left: true,
            more_right: true,
        };
        assert_eq!(
            position(&p, Lang::En),
            " (at [7] near .. \"bcdef\" -> \"g\" -> \"hijkl\" ..)"
        );
        assert_eq!(
            position(&p, Lang::Ja),
            " (場所: [7]付近: 〜 \"bcdef\" → \"g\" → \"hijkl\" 〜)"
        );
    }

    #[test]
    fn bare_suffix_is_empty() {
        assert_eq!(position(&Position::Bare, Lang::Ja), "");
    }
}
