//! Text rules of the two formats.
//!
//! This module contains no code. It documents what [`csv`](crate::csv) and
//! [`xml`](crate::xml) write and what they accept.
//!
//! # Tabular format
//!
//! ## Separators
//!
//! | Separator | Text |
//! |-----------|------|
//! | Row | `\n` |
//! | Field | `,` |
//! | Quote | `"` |
//!
//! A top-level sequence joins its elements with the row separator. Any
//! sequence below it, and every record, joins with the field separator:
//!
//! ```text
//! 1,2        <- vec![vec![1, 2], vec![3, 4]]
//! 3,4
//! ```
//!
//! ## Quoting
//!
//! A field is quoted when it contains `,` or `\n`, or starts with `"`. Quotes
//! inside a quoted field are doubled:
//!
//! ```text
//! a,b\nc"d   ->   "a,b\nc""d"
//! ```
//!
//! When splitting, a separator inside an open quoted token is literal. A
//! token is open when it starts with `"` and its quote count is odd, so `""`
//! inside a field never closes it.
//!
//! ## Row fallback
//!
//! Splitting a span into fields stops at the first unquoted `\n` and splits the
//! whole span into rows instead. This is how a level-one decoder handed a
//! multi-row span still sees its rows:
//!
//! ```text
//! "x\ny",b\nc,d   ->   ["\"x\ny\",b", "c,d"]
//! ```
//!
//! Empty rows between row breaks are kept, so a record whose only field is
//! nil still occupies its row. A `\n` at the very end terminates the last row
//! instead of starting a new one, and the encoder writes one after an empty
//! last row. A trailing empty field is kept.
//!
//! ## Header row
//!
//! Records are positional: the KeySet decides which field goes where. On
//! encode the KeySet comes from [`CsvOptions::keys`](crate::CsvOptions::keys)
//! and is written as the first row. On decode the first row of a top-level
//! sequence is taken as the KeySet unless keys were supplied. See
//! [`HeaderMode`](crate::HeaderMode) for when that row is skipped.
//!
//! ```text
//! id,name
//! 1,Alice
//! 2,Bob
//! ```
//!
//! A single record at the top level is a header row and one data row.
//!
//! ## Limits
//!
//! - a record field cannot hold a record or a sequence
//! - an empty inner sequence and an inner sequence holding one empty scalar
//!   both encode as an empty field
//! - sequences of sequences of sequences share the field separator and cannot
//!   be told apart on decode
//! - `None` and `Some("")` both encode as an empty field
//!
//! # Tag format
//!
//! ## Elements
//!
//! | Value | Text |
//! |-------|------|
//! | Scalar | the text itself |
//! | Record field `key` | `<key>value</key>` |
//! | Sequence element | `<item>value</item>` |
//!
//! Siblings are written back to back. The item tag is configurable through
//! [`XmlOptions::item_tag`](crate::XmlOptions::item_tag), and
//! [`XmlOptions::root`](crate::XmlOptions::root) wraps the whole document:
//!
//! ```text
//! <a><b>1</b><c>2</c></a>
//! ```
//!
//! A record field or sequence element holding a compound value contains its
//! elements directly:
//!
//! ```text
//! <name>x</name><tags><item>a</item><item>b</item></tags>
//! ```
//!
//! ## Decoding
//!
//! A span is split into its top-level elements by tracking open tags on a
//! stack; text between elements is ignored. A tag name ends at the first
//! whitespace, so `<a x="1">` opens `a`.
//!
//! - keyed lookup returns the first element with a matching name
//! - unkeyed decoding ignores element names
//! - a dynamic [`Value`](crate::Value) is a `Scalar` when the span has no
//!   elements, a `Sequence` when every element uses the item tag, and a
//!   `Record` otherwise
//!
//! ## Limits
//!
//! There are no attributes, namespaces, comments, self-closing tags or entity
//! escapes. Scalar text must not contain `<`. The explicit
//! [`KeyedContainer::nested_container`](crate::xml::KeyedContainer::nested_container)
//! and `nested_unkeyed_container` calls fail with
//! [`Error::UnsupportedComposition`](crate::Error::UnsupportedComposition);
//! serde traversal reads a compound field through a fresh decoder instead.
