//! Tag splitting.
//!
//! [`split_elements`] walks a span with a stack of open tag names and returns
//! every top-level sibling element, nested content included. Text between
//! siblings is ignored. [`key_value`] takes one of those spans apart into its
//! tag name and inner text.
//!
//! ```rust
//! use serde_csvxml::xml::engine::{key_value, split_elements};
//!
//! let spans = split_elements("<b>1</b><c><d>2</d></c>").unwrap();
//! assert_eq!(spans, vec!["<b>1</b>", "<c><d>2</d></c>"]);
//! assert_eq!(key_value(spans[1]).unwrap(), ("c", "<d>2</d>"));
//! ```
//!
//! There is no support for attributes, namespaces, comments, self-closing
//! tags or entity escapes.

use crate::error::{Error, Result};

/// Name of a tag token: the text up to the first whitespace.
fn tag_name(token: &str) -> &str {
    token
        .split(char::is_whitespace)
        .next()
        .unwrap_or(token)
}

/// Splits `text` into its top-level elements.
///
/// # Errors
///
/// [`Error::WrongInputFormat`] when a `<` has no matching `>`, a closing tag
/// does not match the innermost open tag, or an element is left open.
pub fn split_elements(text: &str) -> Result<Vec<&str>> {
    let mut elements = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('<') {
        let open = pos + offset;
        let close = text[open..]
            .find('>')
            .map(|i| open + i)
            .ok_or_else(|| Error::wrong_input(format!("unterminated tag at byte {}", open)))?;
        let token = &text[open + 1..close];

        if let Some(closing) = token.strip_prefix('/') {
            let name = closing.trim();
            match stack.pop() {
                Some(expected) if expected == name => {}
                Some(expected) => {
                    return Err(Error::wrong_input(format!(
                        "expected </{}>, found </{}>",
                        expected, name
                    )))
                }
                None => return Err(Error::wrong_input(format!("unexpected </{}>", name))),
            }
            if stack.is_empty() {
                elements.push(&text[start..=close]);
            }
        } else {
            let name = tag_name(token);
            if name.is_empty() {
                return Err(Error::wrong_input(format!("empty tag at byte {}", open)));
            }
            if stack.is_empty() {
                start = open;
            }
            stack.push(name);
        }
        pos = close + 1;
    }

    if let Some(open) = stack.last() {
        return Err(Error::wrong_input(format!("unclosed <{}>", open)));
    }

    trace!(elements = elements.len(), "split elements");
    Ok(elements)
}

/// Decomposes one element span into its tag name and inner text.
///
/// # Errors
///
/// [`Error::WrongInputFormat`] when `span` is not a single `<name>..</name>`
/// element.
pub fn key_value(span: &str) -> Result<(&str, &str)> {
    let span = span.trim();
    let malformed = || Error::wrong_input(format!("not an element: {:?}", span));

    let rest = span.strip_prefix('<').ok_or_else(malformed)?;
    let gt = rest.find('>').ok_or_else(malformed)?;
    let name = tag_name(&rest[..gt]);
    if name.is_empty() || name.starts_with('/') {
        return Err(malformed());
    }

    let body = &rest[gt + 1..];
    let inner = body
        .strip_suffix('>')
        .and_then(|body| body.rfind("</").map(|i| (&body[..i], &body[i + 2..])))
        .filter(|(_, closing)| closing.trim() == name)
        .map(|(inner, _)| inner)
        .ok_or_else(malformed)?;
    Ok((name, inner))
}

/// Wraps `inner` in `<name>..</name>`.
pub(crate) fn wrap(name: &str, inner: &str) -> String {
    let mut out = String::with_capacity(inner.len() + 2 * name.len() + 5);
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(inner);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
    out
}
