//! The format-agnostic value tree.
//!
//! Both text formats decode into, and encode from, the same three node kinds:
//!
//! - [`Value::Scalar`]: raw text with no type attached. `""` doubles as nil.
//! - [`Value::Record`]: fields in KeySet order, see [`Record`].
//! - [`Value::Sequence`]: elements in index order.
//!
//! Scalars stay untyped inside the tree. Type coercion happens when a value is
//! handed to a typed consumer, through [`from_value`](crate::from_value) or the
//! `TryFrom` impls below.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_csvxml::{value, Value};
//!
//! let scalar = Value::from(42);
//! assert_eq!(scalar.as_str(), Some("42"));
//!
//! let record = value!({ "id": 1, "tags": ["a", "b"] });
//! assert!(record.is_record());
//! ```
//!
//! ## Converting from Rust Types
//!
//! ```rust
//! use serde_csvxml::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! assert_eq!(value.get("x").and_then(Value::as_str), Some("10"));
//! ```

use crate::error::Error;
use crate::path::Path;
use crate::scalar::{self, ScalarKind};
use crate::Record;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node of the value tree.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{Record, Value};
///
/// let nil = Value::default();
/// assert!(nil.is_nil());
///
/// let row = Value::Sequence(vec![Value::from("a"), Value::from(true)]);
/// assert_eq!(row.as_sequence().map(Vec::len), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Record(Record),
    Sequence(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(String::new())
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns `true` for a scalar with empty text, the encoding of nil.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Scalar(text) if text.is_empty())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of a record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(key))
    }

    /// Looks up an element of a sequence.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_sequence().and_then(|items| items.get(index))
    }

    /// Parses a scalar's text as `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvxml::Value;
    ///
    /// assert_eq!(Value::from("12").parse::<u8>(), Some(12));
    /// assert_eq!(Value::from("x").parse::<u8>(), None);
    /// ```
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self) -> Option<T> {
        self.as_str().and_then(|text| text.parse().ok())
    }

    /// Name of the node kind, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Scalar(text) => serializer.serialize_str(text),
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar, record or sequence")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Scalar(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Sequence(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = Record::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    // first occurrence of a repeated key wins
                    record.insert_first(key, value);
                }
                Ok(Value::Record(record))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

fn scalar_of(value: &Value, kind: ScalarKind) -> crate::Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::scalar(&Path::root(), kind, value.kind()))
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let text = scalar_of(&value, ScalarKind::I64)?;
        scalar::parse(text, ScalarKind::I64, &Path::root())
    }
}

impl TryFrom<Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let text = scalar_of(&value, ScalarKind::U64)?;
        scalar::parse(text, ScalarKind::U64, &Path::root())
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let text = scalar_of(&value, ScalarKind::F64)?;
        scalar::parse(text, ScalarKind::F64, &Path::root())
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let text = scalar_of(&value, ScalarKind::Bool)?;
        scalar::parse_bool(text, &Path::root())
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Scalar(text) => Ok(text),
            other => Err(Error::scalar(&Path::root(), ScalarKind::String, other.kind())),
        }
    }
}

macro_rules! from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.to_string())
                }
            }
        )*
    };
}

from_display!(i8, i16, i32, i64, u8, u16, u32, u64, char);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(scalar::bool_to_string(value).to_string())
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Scalar(scalar::f32_to_string(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(scalar::float_to_string(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
