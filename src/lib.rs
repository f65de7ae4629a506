//! # serde_csvxml
//!
//! A Serde-compatible codec between two textual formats and a generic value
//! tree:
//!
//! - [`csv`]: comma-separated rows with `"` quoting and an optional header row
//! - [`xml`]: nested `<tag>value</tag>` elements without attributes
//! - [`Value`]: untyped `Scalar` text, ordered `Record`s and `Sequence`s
//!
//! Both formats expose the same three containers to the serde traversal: a
//! single value, a keyed record and an unkeyed sequence. Tagged documents nest
//! freely, since a field's inner text is decoded by a fresh decoder. Table
//! records are flat: a table field holding another record or a sequence is an
//! [`Error::UnsupportedComposition`]. The explicit
//! [`nested_container`](xml::KeyedContainer::nested_container) calls on a
//! keyed container fail the same way in both formats.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_csvxml = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Tables
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_csvxml::csv;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let users = vec![
//!     User { id: 1, name: "Alice".to_string(), active: true },
//!     User { id: 2, name: "Smith, Bob".to_string(), active: false },
//! ];
//!
//! let text = csv::to_string_with_keys(&users, ["id", "name", "active"]).unwrap();
//! assert_eq!(text, "id,name,active\n1,Alice,true\n2,\"Smith, Bob\",false");
//!
//! let back: Vec<User> = csv::from_str(&text).unwrap();
//! assert_eq!(back, users);
//! ```
//!
//! ### Tagged documents
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_csvxml::xml;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let text = xml::to_string(&vec![Point { x: 1, y: 2 }]).unwrap();
//! assert_eq!(text, "<item><x>1</x><y>2</y></item>");
//!
//! let back: Vec<Point> = xml::from_str(&text).unwrap();
//! assert_eq!(back, vec![Point { x: 1, y: 2 }]);
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use serde_csvxml::{value, xml, Value};
//!
//! let v = value!({ "name": "Alice", "age": 30 });
//! assert_eq!(xml::to_string(&v).unwrap(), "<name>Alice</name><age>30</age>");
//!
//! let back: Value = xml::from_str("<name>Alice</name><age>30</age>").unwrap();
//! assert_eq!(back, v);
//! assert_eq!(back.get("age").and_then(Value::parse::<u8>), Some(30));
//! ```
//!
//! ## Format Rules
//!
//! See the [`format`] module for the exact text rules of both formats.
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, container construction and header
//! decisions are reported through the [`tracing`](https://docs.rs/tracing)
//! crate at trace and debug level.

#[macro_use]
mod tracing_macros;

pub mod csv;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
mod scalar;
pub mod ser;
pub mod value;
pub mod xml;

pub use de::{from_value, ValueDeserializer};
pub use error::{Error, Result};
pub use map::Record;
pub use options::{CsvOptions, HeaderMode, XmlOptions};
pub use path::{Path, PathSegment};
pub use scalar::ScalarKind;
pub use ser::{to_value, ValueSerializer};
pub use value::Value;
