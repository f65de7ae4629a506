//! Quote-aware splitting of tabular text.
//!
//! Rows are separated by `\n` and fields by `,`. A token that starts with a
//! double quote stays open until its quotes balance again, and separators
//! inside an open token are literal content:
//!
//! ```rust
//! use serde_csvxml::csv::engine::{split_fields, split_rows};
//!
//! assert_eq!(split_fields("a,\"b,c\",d"), vec!["a", "\"b,c\"", "d"]);
//! assert_eq!(split_rows("\"x\ny\",b\nc,d"), vec!["\"x\ny\",b", "c,d"]);
//! ```
//!
//! Empty rows between row breaks are kept; only an empty piece after the last
//! row break is dropped, so a trailing `\n` terminates the text rather than
//! adding a row.
//!
//! Field splitting cannot represent a row break, so when it meets one outside
//! quotes it gives up and returns the rows of the whole text instead:
//!
//! ```rust
//! use serde_csvxml::csv::engine::split_fields;
//!
//! assert_eq!(split_fields("a,b\nc,d"), vec!["a,b", "c,d"]);
//! ```

use std::borrow::Cow;

pub const FIELD_SEPARATOR: char = ',';
pub const ROW_SEPARATOR: char = '\n';
const QUOTE: char = '"';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Rows,
    Fields,
}

/// Quote state of the token being scanned.
#[derive(Default)]
struct Token {
    quoted: bool,
    quotes: usize,
    empty: bool,
}

impl Token {
    fn start() -> Self {
        Token {
            empty: true,
            ..Token::default()
        }
    }

    fn push(&mut self, ch: char) {
        if ch == QUOTE {
            if self.empty {
                self.quoted = true;
            }
            self.quotes += 1;
        }
        self.empty = false;
    }

    /// A separator may end the token here.
    fn is_closed(&self) -> bool {
        !self.quoted || (self.quotes >= 2 && self.quotes % 2 == 0)
    }
}

fn separated(text: &str, mode: Mode) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut token = Token::start();
    let mut token_start = 0;
    let mut row_start = 0;
    let mut saw_field_separator = false;

    for (i, ch) in text.char_indices() {
        match ch {
            ROW_SEPARATOR if token.is_closed() => {
                if mode == Mode::Fields {
                    return separated(text, Mode::Rows);
                }
                parts.push(&text[row_start..i]);
                row_start = i + 1;
                token_start = i + 1;
                token = Token::start();
            }
            FIELD_SEPARATOR if token.is_closed() => {
                if mode == Mode::Fields {
                    parts.push(&text[token_start..i]);
                    saw_field_separator = true;
                }
                token_start = i + 1;
                token = Token::start();
            }
            _ => token.push(ch),
        }
    }

    match mode {
        Mode::Rows if row_start < text.len() => parts.push(&text[row_start..]),
        Mode::Fields if token_start < text.len() || saw_field_separator => {
            parts.push(&text[token_start..])
        }
        _ => {}
    }

    trace!(?mode, parts = parts.len(), "separated");
    parts
}

/// Splits `text` into rows, dropping an empty piece after the last row break.
#[must_use]
pub fn split_rows(text: &str) -> Vec<&str> {
    separated(text, Mode::Rows)
}

/// Splits a row into fields, or `text` into rows if it has a row break
/// outside quotes.
///
/// An empty row has no fields; a trailing separator yields a trailing empty
/// field.
#[must_use]
pub fn split_fields(row: &str) -> Vec<&str> {
    separated(row, Mode::Fields)
}

/// Strips the outer quotes of a field and collapses doubled quotes.
///
/// ```rust
/// use serde_csvxml::csv::engine::unquote;
///
/// assert_eq!(unquote("\"say \"\"hi\"\"\""), "say \"hi\"");
/// assert_eq!(unquote("plain"), "plain");
/// ```
#[must_use]
pub fn unquote(field: &str) -> Cow<'_, str> {
    if field.len() > 1 && field.starts_with(QUOTE) && field.ends_with(QUOTE) {
        let inner = &field[1..field.len() - 1];
        if inner.contains(QUOTE) {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(field)
    }
}

/// Quotes `text` when it would otherwise split or be unquoted on decode.
///
/// ```rust
/// use serde_csvxml::csv::engine::quote;
///
/// assert_eq!(quote("a,b\nc\"d"), "\"a,b\nc\"\"d\"");
/// assert_eq!(quote("c\"d"), "c\"d");
/// ```
#[must_use]
pub fn quote(text: &str) -> Cow<'_, str> {
    if text.contains(FIELD_SEPARATOR) || text.contains(ROW_SEPARATOR) || text.starts_with(QUOTE)
    {
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push(QUOTE);
        for ch in text.chars() {
            if ch == QUOTE {
                quoted.push(QUOTE);
            }
            quoted.push(ch);
        }
        quoted.push(QUOTE);
        Cow::Owned(quoted)
    } else {
        Cow::Borrowed(text)
    }
}
