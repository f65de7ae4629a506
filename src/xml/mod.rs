//! The tag-based hierarchical format.
//!
//! Record fields are elements named after their key, sequence elements are
//! wrapped in an item tag (`<item>` by default), and scalars are the raw text
//! between the tags. A record field or sequence element holding a compound
//! value simply contains further elements. There are no attributes,
//! namespaces, comments or entity escapes, so text must not contain `<`.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_csvxml::{xml, XmlOptions};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Pair {
//!     b: u32,
//!     c: u32,
//! }
//!
//! let options = XmlOptions::new().with_root("a");
//! let text = xml::to_string_with_options(&Pair { b: 1, c: 2 }, &options).unwrap();
//! assert_eq!(text, "<a><b>1</b><c>2</c></a>");
//!
//! let back: Pair = xml::from_str_with_options(&text, &options).unwrap();
//! assert_eq!(back, Pair { b: 1, c: 2 });
//! ```

mod de;
pub mod engine;
mod ser;

pub use de::{Decoder, KeyedContainer, SingleValueContainer, UnkeyedContainer};
pub use ser::{Encoder, RecordEncoder, SequenceEncoder};

use crate::error::{Error, Result};
use crate::options::XmlOptions;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io;

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &XmlOptions::default())
}

/// Encodes `value`, wrapped in the root element when one is configured.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{xml, XmlOptions};
///
/// assert_eq!(xml::to_string(&vec!["x", "y"]).unwrap(), "<item>x</item><item>y</item>");
///
/// let options = XmlOptions::new().with_root("list");
/// assert_eq!(
///     xml::to_string_with_options(&vec![1], &options).unwrap(),
///     "<list><item>1</item></list>"
/// );
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &XmlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let body = value.serialize(Encoder::new(options))?;
    match &options.root {
        Some(root) => Ok(engine::wrap(root, &body)),
        None => Ok(body),
    }
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(value: &T, options: &XmlOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, options).map(String::into_bytes)
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &XmlOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &XmlOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Strips the configured root element from `s`.
fn document_body<'de>(s: &'de str, options: &XmlOptions) -> Result<&'de str> {
    let root = match &options.root {
        Some(root) => root,
        None => return Ok(s),
    };
    match engine::split_elements(s)?.as_slice() {
        [element] => {
            let (name, inner) = engine::key_value(element)?;
            if name == root {
                Ok(inner)
            } else {
                Err(Error::wrong_input(format!(
                    "expected root <{}>, found <{}>",
                    root, name
                )))
            }
        }
        elements => Err(Error::wrong_input(format!(
            "expected a single <{}> element, found {}",
            root,
            elements.len()
        ))),
    }
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'de, T>(s: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_str_with_options(s, &XmlOptions::default())
}

/// Decodes a `T` from tag text.
///
/// # Errors
///
/// [`Error::WrongInputFormat`] when the text is not well nested or, with a
/// root configured, is not exactly one element of that name.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{xml, Value};
///
/// let value: Value = xml::from_str("<b>1</b><c><item>x</item></c>").unwrap();
/// assert_eq!(value.get("b"), Some(&Value::from("1")));
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'de, T>(s: &'de str, options: &XmlOptions) -> Result<T>
where
    T: Deserialize<'de>,
{
    let body = document_body(s, options)?;
    Decoder::new(body, options).single_value_container().decode()
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'de, T>(v: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_slice_with_options(v, &XmlOptions::default())
}

/// Decodes a `T` from UTF-8 bytes.
///
/// # Errors
///
/// [`Error::WrongInputFormat`] when `v` is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options<'de, T>(v: &'de [u8], options: &XmlOptions) -> Result<T>
where
    T: Deserialize<'de>,
{
    let s = std::str::from_utf8(v).map_err(Error::wrong_input)?;
    from_str_with_options(s, options)
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    from_reader_with_options(reader, &XmlOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R, T>(mut reader: R, options: &XmlOptions) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice_with_options(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Pair {
        b: String,
        c: String,
    }

    #[test]
    fn test_root_is_required() {
        let options = XmlOptions::new().with_root("a");
        let pair: Pair = from_str_with_options("<a><b>1</b><c>2</c></a>", &options).unwrap();
        assert_eq!(pair.b, "1");
        assert_eq!(pair.c, "2");

        for text in ["<x><b>1</b></x>", "<a></a><a></a>", "<b>1</b>"] {
            assert!(
                matches!(
                    from_str_with_options::<Value>(text, &options),
                    Err(Error::WrongInputFormat(_))
                ),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_value_shapes() {
        let value: Value = from_str("<item>1</item><item>2</item>").unwrap();
        assert_eq!(value, Value::Sequence(vec!["1".into(), "2".into()]));

        let value: Value = from_str("plain").unwrap();
        assert_eq!(value, Value::from("plain"));
    }

    #[test]
    fn test_nested_value() {
        let value = crate::value!({ "a": { "b": "1" }, "tags": ["x", "y"] });
        let text = to_string(&value).unwrap();
        assert_eq!(text, "<a><b>1</b></a><tags><item>x</item><item>y</item></tags>");
        assert_eq!(from_str::<Value>(&text).unwrap(), value);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut out = Vec::new();
        to_writer(&mut out, &vec![1, 2]).unwrap();
        assert_eq!(out, b"<item>1</item><item>2</item>");

        let back: Vec<u8> = from_reader(out.as_slice()).unwrap();
        assert_eq!(back, vec![1, 2]);
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            from_slice::<String>(&[0xc3]),
            Err(Error::WrongInputFormat(_))
        ));
    }
}
