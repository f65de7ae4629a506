//! Configuration options for the two formats.
//!
//! - [`CsvOptions`]: KeySet supplied up front, header handling, depth limit
//! - [`HeaderMode`]: whether the first row of a top-level sequence is a header
//! - [`XmlOptions`]: item tag, optional root element, depth limit
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvxml::{csv, CsvOptions, HeaderMode};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Row { id: u32, name: String }
//!
//! let rows = vec![Row { id: 1, name: "a".to_string() }];
//!
//! let options = CsvOptions::new().with_keys(["id", "name"]);
//! assert_eq!(csv::to_string_with_options(&rows, &options).unwrap(), "id,name\n1,a");
//!
//! // Same KeySet, no header row
//! let options = options.with_header(HeaderMode::Absent);
//! assert_eq!(csv::to_string_with_options(&rows, &options).unwrap(), "1,a");
//! ```

/// Default bound on nesting depth for both formats.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default tag wrapped around every element of an XML sequence.
pub const DEFAULT_ITEM_TAG: &str = "item";

/// How the first row of a top-level CSV sequence is interpreted.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{csv, CsvOptions, HeaderMode};
///
/// // Detect treats the first row as a header for non-sequence elements.
/// let v: Vec<u32> = csv::from_str("n\n1\n2").unwrap();
/// assert_eq!(v, vec![1, 2]);
///
/// // Absent never skips a row.
/// let options = CsvOptions::new().with_header(HeaderMode::Absent);
/// let v: Vec<u32> = csv::from_str_with_options("1\n2", &options).unwrap();
/// assert_eq!(v, vec![1, 2]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Decode: a first row equal to the supplied keys is a header; otherwise
    /// it is a header unless the element being decoded is sequence-shaped.
    /// Encode: a header row is written when keys are supplied.
    #[default]
    Detect,
    /// The first row of a top-level sequence is always a header.
    Present,
    /// There is never a header row.
    Absent,
}

/// Configuration for the tabular format.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{CsvOptions, HeaderMode};
///
/// let options = CsvOptions::new()
///     .with_keys(["id", "name"])
///     .with_header(HeaderMode::Present)
///     .with_max_depth(8);
/// assert_eq!(options.keys, vec!["id", "name"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    /// The KeySet of record rows. On encode it is written as the header row
    /// and fixes field order; on decode it replaces the header row as the
    /// source of keys.
    pub keys: Vec<String>,
    pub header: HeaderMode,
    pub max_depth: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            keys: Vec::new(),
            header: HeaderMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CsvOptions {
    /// Creates default options: no keys, detected header, depth limit 128.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the KeySet.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Configuration for the tag format.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{xml, XmlOptions};
///
/// let options = XmlOptions::new().with_item_tag("n").with_root("numbers");
/// let text = xml::to_string_with_options(&vec![1, 2], &options).unwrap();
/// assert_eq!(text, "<numbers><n>1</n><n>2</n></numbers>");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlOptions {
    /// Tag wrapped around each sequence element on encode.
    pub item_tag: String,
    /// Element wrapped around the whole document, if any.
    pub root: Option<String>,
    pub max_depth: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            item_tag: DEFAULT_ITEM_TAG.to_string(),
            root: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl XmlOptions {
    /// Creates default options: `<item>` elements, no root, depth limit 128.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item_tag(mut self, tag: impl Into<String>) -> Self {
        self.item_tag = tag.into();
        self
    }

    /// Wraps encoded documents in `<root>..</root>` and requires that element
    /// when decoding.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let csv = CsvOptions::default();
        assert!(csv.keys.is_empty());
        assert_eq!(csv.header, HeaderMode::Detect);
        assert_eq!(csv.max_depth, DEFAULT_MAX_DEPTH);

        let xml = XmlOptions::default();
        assert_eq!(xml.item_tag, "item");
        assert_eq!(xml.root, None);
    }

    #[test]
    fn test_builders() {
        let csv = CsvOptions::new()
            .with_keys(vec!["a".to_string(), "b".to_string()])
            .with_header(HeaderMode::Absent)
            .with_max_depth(4);
        assert_eq!(csv.keys, vec!["a", "b"]);
        assert_eq!(csv.header, HeaderMode::Absent);
        assert_eq!(csv.max_depth, 4);

        let xml = XmlOptions::new().with_root("doc").with_item_tag("row");
        assert_eq!(xml.root.as_deref(), Some("doc"));
        assert_eq!(xml.item_tag, "row");
    }
}
