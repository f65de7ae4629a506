//! Deserialization of Rust data out of the value tree.
//!
//! Scalars in a [`Value`] are untyped text; [`from_value`] parses each one
//! only when the target type asks for a primitive, and reports the path of the
//! scalar that failed.
//!
//! ```rust
//! use serde_csvxml::{from_value, value, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_value(value!({ "x": 1, "y": "2" })).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//!
//! let err = from_value::<Point>(value!({ "x": 1, "y": "two" })).unwrap_err();
//! assert!(matches!(err, Error::ScalarDecodeFailure { .. }));
//! ```

use crate::error::{Error, Result};
use crate::path::Path;
use crate::scalar::{self, ScalarKind};
use crate::{Record, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer over an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
    path: Path,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer {
            value,
            path: Path::root(),
        }
    }

    fn at(value: Value, path: Path) -> Self {
        ValueDeserializer { value, path }
    }

    fn scalar(&self, kind: ScalarKind) -> Result<&str> {
        match &self.value {
            Value::Scalar(text) => Ok(text),
            other => Err(mismatch(&self.path, kind.as_str(), other)),
        }
    }
}

fn mismatch(path: &Path, expected: &str, found: &Value) -> Error {
    Error::custom(format!(
        "expected {} at {}, found {}",
        expected,
        path,
        found.kind()
    ))
}

macro_rules! deserialize_number {
    ($method:ident, $visit:ident, $ty:ty, $kind:expr) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            let text = self.scalar($kind)?;
            visitor.$visit(scalar::parse::<$ty>(text, $kind, &self.path)?)
        }
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Scalar(text) => visitor.visit_string(text),
            Value::Record(record) => visitor.visit_map(RecordAccess::all(record, self.path)),
            Value::Sequence(items) => visitor.visit_seq(SequenceAccess::new(items, self.path)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar(ScalarKind::Bool)?;
        visitor.visit_bool(scalar::parse_bool(text, &self.path)?)
    }

    deserialize_number!(deserialize_i8, visit_i8, i8, ScalarKind::I8);
    deserialize_number!(deserialize_i16, visit_i16, i16, ScalarKind::I16);
    deserialize_number!(deserialize_i32, visit_i32, i32, ScalarKind::I32);
    deserialize_number!(deserialize_i64, visit_i64, i64, ScalarKind::I64);
    deserialize_number!(deserialize_i128, visit_i128, i128, ScalarKind::I128);
    deserialize_number!(deserialize_u8, visit_u8, u8, ScalarKind::U8);
    deserialize_number!(deserialize_u16, visit_u16, u16, ScalarKind::U16);
    deserialize_number!(deserialize_u32, visit_u32, u32, ScalarKind::U32);
    deserialize_number!(deserialize_u64, visit_u64, u64, ScalarKind::U64);
    deserialize_number!(deserialize_u128, visit_u128, u128, ScalarKind::U128);
    deserialize_number!(deserialize_f32, visit_f32, f32, ScalarKind::F32);
    deserialize_number!(deserialize_f64, visit_f64, f64, ScalarKind::F64);

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = self.scalar(ScalarKind::Char)?;
        visitor.visit_char(scalar::parse_char(text, &self.path)?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Scalar(text) => visitor.visit_string(text),
            other => Err(mismatch(&self.path, "string", &other)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_nil() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_nil() {
            visitor.visit_unit()
        } else {
            Err(mismatch(&self.path, "nil", &self.value))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Sequence(items) => visitor.visit_seq(SequenceAccess::new(items, self.path)),
            // nil is the empty sequence
            Value::Scalar(text) if text.is_empty() => {
                visitor.visit_seq(SequenceAccess::new(Vec::new(), self.path))
            }
            other => Err(mismatch(&self.path, "sequence", &other)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Record(record) => visitor.visit_map(RecordAccess::all(record, self.path)),
            Value::Scalar(text) if text.is_empty() => {
                visitor.visit_map(RecordAccess::all(Record::new(), self.path))
            }
            other => Err(mismatch(&self.path, "record", &other)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Record(record) => {
                visitor.visit_map(RecordAccess::fields(record, fields, self.path)?)
            }
            Value::Scalar(text) if text.is_empty() => {
                visitor.visit_map(RecordAccess::fields(Record::new(), fields, self.path)?)
            }
            other => Err(mismatch(&self.path, "record", &other)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Scalar(variant) => visitor.visit_enum(variant.into_deserializer()),
            _ => Err(Error::unsupported_type("enum variants carrying data")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bytes byte_buf
    }
}

struct SequenceAccess {
    iter: std::iter::Enumerate<std::vec::IntoIter<Value>>,
    path: Path,
}

impl SequenceAccess {
    fn new(items: Vec<Value>, path: Path) -> Self {
        SequenceAccess {
            iter: items.into_iter().enumerate(),
            path,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SequenceAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((index, value)) => seed
                .deserialize(ValueDeserializer::at(value, self.path.index(index)))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct RecordAccess {
    iter: std::vec::IntoIter<(String, Value)>,
    value: Option<(String, Value)>,
    path: Path,
}

impl RecordAccess {
    /// Every field of the record, in KeySet order.
    fn all(record: Record, path: Path) -> Self {
        RecordAccess {
            iter: record.into_iter().collect::<Vec<_>>().into_iter(),
            value: None,
            path,
        }
    }

    /// Exactly the fields a struct declares; each must be in the KeySet.
    fn fields(mut record: Record, fields: &'static [&'static str], path: Path) -> Result<Self> {
        let mut entries = Vec::with_capacity(fields.len());
        for &field in fields {
            match record.remove(field) {
                Some(value) => entries.push((field.to_string(), value)),
                None => return Err(Error::key_not_found(&path, field)),
            }
        }
        Ok(RecordAccess {
            iter: entries.into_iter(),
            value: None,
            path,
        })
    }
}

impl<'de> de::MapAccess<'de> for RecordAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let result = seed.deserialize(ValueDeserializer::at(
                    Value::Scalar(key.clone()),
                    self.path.clone(),
                ));
                self.value = Some((key, value));
                result.map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some((key, value)) => {
                seed.deserialize(ValueDeserializer::at(value, self.path.field(&key)))
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Interprets a [`Value`] as an instance of `T`.
///
/// # Errors
///
/// - [`Error::ScalarDecodeFailure`] when a scalar's text does not parse as
///   the primitive `T` asks for
/// - [`Error::KeyNotFound`] when a struct field is absent from the record
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{from_value, Value};
///
/// let v = Value::Sequence(vec![Value::from("1"), Value::from("2")]);
/// let nums: Vec<u8> = from_value(v).unwrap();
/// assert_eq!(nums, vec![1, 2]);
/// ```
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}
