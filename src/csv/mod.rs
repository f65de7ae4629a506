//! The delimiter-based tabular format.
//!
//! Rows are separated by `\n` and fields by `,`; a field holding either
//! separator, or starting with `"`, is wrapped in double quotes with inner
//! quotes doubled. A top-level sequence is a list of rows, optionally preceded
//! by a header row naming the KeySet of its records.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_csvxml::csv;
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Row {
//!     id: u32,
//!     name: String,
//! }
//!
//! let rows = vec![
//!     Row { id: 1, name: "a".to_string() },
//!     Row { id: 2, name: "b".to_string() },
//! ];
//!
//! let text = csv::to_string_with_keys(&rows, ["id", "name"]).unwrap();
//! assert_eq!(text, "id,name\n1,a\n2,b");
//!
//! let back: Vec<Row> = csv::from_str(&text).unwrap();
//! assert_eq!(back, rows);
//! ```
//!
//! Records may only hold scalars: a sequence or record inside a record field
//! fails with [`Error::UnsupportedComposition`].

mod de;
pub mod engine;
mod ser;

pub use de::{Decoder, KeyedContainer, SingleValueContainer, UnkeyedContainer};
pub use ser::{Encoder, RecordEncoder, SequenceEncoder};

use crate::error::{Error, Result};
use crate::options::{CsvOptions, HeaderMode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io;

/// Encodes `value` with default options: no KeySet and no header row.
///
/// # Errors
///
/// Fails when `value` contains a record, since no KeySet is available, or a
/// shape the format cannot hold.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::csv;
///
/// assert_eq!(csv::to_string(&vec![vec![1, 2], vec![3, 4]]).unwrap(), "1,2\n3,4");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &CsvOptions::default())
}

/// Encodes `value` with `keys` as the KeySet and header row.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::csv;
/// use std::collections::BTreeMap;
///
/// let mut row = BTreeMap::new();
/// row.insert("b", 2);
/// row.insert("a", 1);
///
/// assert_eq!(csv::to_string_with_keys(&row, ["b", "a"]).unwrap(), "b,a\n2,1");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_keys<T, I, S>(value: &T, keys: I) -> Result<String>
where
    T: ?Sized + Serialize,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    to_string_with_options(value, &CsvOptions::new().with_keys(keys))
}

/// Encodes `value`, prepending the KeySet as a header row unless the header
/// mode is [`HeaderMode::Absent`] or the KeySet is empty.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{csv, CsvOptions, HeaderMode};
///
/// let options = CsvOptions::new().with_keys(["n"]);
/// assert_eq!(csv::to_string_with_options(&vec![1, 2], &options).unwrap(), "n\n1\n2");
///
/// let options = options.with_header(HeaderMode::Absent);
/// assert_eq!(csv::to_string_with_options(&vec![1, 2], &options).unwrap(), "1\n2");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &CsvOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let body = value.serialize(Encoder::new(options))?;
    if options.keys.is_empty() || options.header == HeaderMode::Absent {
        return Ok(body);
    }

    let header = options
        .keys
        .iter()
        .map(|key| engine::quote(key))
        .collect::<Vec<_>>()
        .join(",");
    debug!(keys = options.keys.len(), "writing header row");
    if body.is_empty() {
        Ok(header)
    } else {
        Ok(format!("{}\n{}", header, body))
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
pub fn to_vec_with_options<T>(value: &T, options: &CsvOptions) -> Result<Vec<u8>>
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
    to_writer_with_options(writer, value, &CsvOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &CsvOptions) -> Result<()>
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

/// Decodes a `T` from tabular text with default options.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::csv;
///
/// let rows: Vec<Vec<String>> = csv::from_str("\"x\ny\",b\nc,d").unwrap();
/// assert_eq!(rows, vec![vec!["x\ny", "b"], vec!["c", "d"]]);
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'de, T>(s: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_str_with_options(s, &CsvOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'de, T>(s: &'de str, options: &CsvOptions) -> Result<T>
where
    T: Deserialize<'de>,
{
    Decoder::new(s, options).single_value_container().decode()
}

/// Decodes a `T` from UTF-8 bytes.
///
/// # Errors
///
/// [`Error::WrongInputFormat`] when `v` is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'de, T>(v: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    from_slice_with_options(v, &CsvOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options<'de, T>(v: &'de [u8], options: &CsvOptions) -> Result<T>
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
    from_reader_with_options(reader, &CsvOptions::default())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R, T>(mut reader: R, options: &CsvOptions) -> Result<T>
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
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Row {
        id: u32,
        name: String,
    }

    #[test]
    fn test_top_level_record() {
        let row = Row {
            id: 7,
            name: "x".into(),
        };
        let text = to_string_with_keys(&row, ["id", "name"]).unwrap();
        assert_eq!(text, "id,name\n7,x");
        assert_eq!(from_str::<Row>(&text).unwrap(), row);

        let err = from_str::<Row>("id,name\n1,a\n2,b").unwrap_err();
        assert!(matches!(err, Error::WrongInputFormat(_)));
    }

    #[test]
    fn test_value_of_table() {
        let value: Value = from_str("id,name\n1,a\n2,b").unwrap();
        let rows = value.as_sequence().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(&Value::from("b")));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = from_slice::<String>(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::WrongInputFormat(_)));
    }

    #[test]
    fn test_writer_and_reader() {
        let mut out = Vec::new();
        to_writer(&mut out, &vec![vec![1, 2]]).unwrap();
        assert_eq!(out, b"1,2");

        let back: Vec<Vec<u8>> = from_reader(out.as_slice()).unwrap();
        assert_eq!(back, vec![vec![1, 2]]);
    }
}
