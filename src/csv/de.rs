//! Tabular decoding.
//!
//! A [`Decoder`] is bound to one span of the input and hands out exactly one
//! kind of container over it:
//!
//! - [`SingleValueContainer`]: the span is one primitive
//! - [`KeyedContainer`]: the span is one row, addressed through a KeySet
//! - [`UnkeyedContainer`]: the span is a list of rows (at level 0) or fields
//!
//! The serde [`Deserializer`](de::Deserializer) impl on [`Decoder`] maps each
//! `deserialize_*` request onto one of these containers, so the serde traversal
//! and the container API always agree.
//!
//! ## Header rows
//!
//! The first row of a level-0 sequence may be a header. With
//! [`HeaderMode::Detect`] a first row equal to the supplied keys is a header;
//! otherwise the decision is made when the first element is requested: an
//! element that asks for a sequence keeps the row as data, any other element
//! skips it.
//!
//! ```rust
//! use serde_csvxml::csv::{self, Decoder};
//! use serde_csvxml::CsvOptions;
//!
//! let options = CsvOptions::new();
//! let decoder = Decoder::new("id,name\n1,a\n2,b", &options);
//! let mut rows = decoder.unkeyed_container().unwrap();
//! assert_eq!(rows.count(), 3);
//!
//! let first = rows.nested_container().unwrap();
//! assert_eq!(first.decode::<u32>("id").unwrap(), 1);
//! assert_eq!(rows.current_index(), 2);
//! ```

use super::engine;
use crate::error::{Error, Result};
use crate::options::{CsvOptions, HeaderMode};
use crate::path::Path;
use crate::scalar::{self, ScalarKind};
use serde::de::{self, Deserialize, IntoDeserializer};
use std::borrow::Cow;
use std::sync::Arc;
use std::str::FromStr;

/// A decoder bound to one span of tabular text.
#[derive(Clone, Debug)]
pub struct Decoder<'de> {
    span: &'de str,
    path: Path,
    keys: Arc<[String]>,
    level: usize,
    in_keyed: bool,
    header: HeaderMode,
    max_depth: usize,
}

impl<'de> Decoder<'de> {
    /// Creates the level-0 decoder of a document.
    #[must_use]
    pub fn new(input: &'de str, options: &CsvOptions) -> Self {
        Decoder {
            span: input,
            path: Path::root(),
            keys: options.keys.clone().into(),
            level: 0,
            in_keyed: false,
            header: options.header,
            max_depth: options.max_depth,
        }
    }

    #[must_use]
    pub fn span(&self) -> &'de str {
        self.span
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The KeySet records at this position are decoded with.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    fn child(
        &self,
        span: &'de str,
        path: Path,
        keys: Arc<[String]>,
        in_keyed: bool,
    ) -> Result<Decoder<'de>> {
        let level = self.level + 1;
        if level > self.max_depth {
            return Err(Error::depth_exceeded(&path, self.max_depth));
        }
        Ok(Decoder {
            span,
            path,
            keys,
            level,
            in_keyed,
            header: self.header,
            max_depth: self.max_depth,
        })
    }

    #[must_use]
    pub fn single_value_container(&self) -> SingleValueContainer<'de> {
        SingleValueContainer {
            decoder: self.clone(),
        }
    }

    /// Opens the span as a record.
    ///
    /// At level 0 the span is a whole document holding one record, optionally
    /// preceded by a header row. Deeper down the span is a single row.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedComposition`] inside another keyed container, and
    /// [`Error::WrongInputFormat`] for a level-0 document with extra rows.
    pub fn container(&self) -> Result<KeyedContainer<'de>> {
        if self.in_keyed {
            return Err(Error::unsupported_composition(&self.path, "keyed container"));
        }

        let (keys, row) = if self.level == 0 {
            self.document_record()?
        } else {
            (self.keys.clone(), self.span)
        };
        // an empty row is one empty field, so a single nil column survives
        let fields = if row.is_empty() {
            vec![row]
        } else {
            engine::split_fields(row)
        };

        trace!(path = %self.path, level = self.level, keys = keys.len(), fields = fields.len(), "keyed container");
        Ok(KeyedContainer {
            decoder: self.clone(),
            keys,
            fields,
        })
    }

    fn document_record(&self) -> Result<(Arc<[String]>, &'de str)> {
        let rows = engine::split_rows(self.span);
        let first_is_keys = rows
            .first()
            .map(|row| row_matches(row, &self.keys))
            .unwrap_or(false);
        let has_header = match self.header {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Detect => rows.len() == 2 || (first_is_keys && !self.keys.is_empty()),
        };
        let data_index = usize::from(has_header);
        if rows.len() > data_index + 1 {
            return Err(Error::wrong_input(format!(
                "expected a single record at {}, found {} rows",
                self.path,
                rows.len() - data_index
            )));
        }
        debug!(path = %self.path, has_header, "document record");

        let keys = match rows.first() {
            Some(header) if has_header && self.keys.is_empty() => unquoted_fields(header).into(),
            _ => self.keys.clone(),
        };
        Ok((keys, rows.get(data_index).copied().unwrap_or("")))
    }

    /// Opens the span as a sequence.
    ///
    /// Level 0 is split into rows. Deeper spans are split into fields, falling
    /// back to rows when the span has a row break.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedComposition`] inside a keyed container, and
    /// [`Error::NoKeysFound`] for an empty level-0 span that should have
    /// started with a key row.
    pub fn unkeyed_container(&self) -> Result<UnkeyedContainer<'de>> {
        if self.in_keyed {
            return Err(Error::unsupported_composition(&self.path, "sequence"));
        }

        let at_top = self.level == 0;
        let children = if at_top {
            engine::split_rows(self.span)
        } else {
            engine::split_fields(self.span)
        };

        let mut current_index = 0;
        let mut header_pending = false;
        let keys: Arc<[String]> = if !at_top || !self.keys.is_empty() {
            self.keys.clone()
        } else if self.header == HeaderMode::Absent {
            Arc::from(Vec::new())
        } else {
            children
                .first()
                .map(|row| unquoted_fields(row))
                .unwrap_or_default()
                .into()
        };

        if at_top && self.header != HeaderMode::Absent {
            let first = *children.first().ok_or_else(|| Error::no_keys(&self.path))?;
            if self.header == HeaderMode::Present
                || (!self.keys.is_empty() && row_matches(first, &self.keys))
            {
                current_index = 1;
            } else {
                header_pending = true;
            }
        }

        trace!(path = %self.path, level = self.level, count = children.len(), "unkeyed container");
        Ok(UnkeyedContainer {
            decoder: self.clone(),
            children,
            keys,
            current_index,
            header_pending,
            header_only: false,
        })
    }
}

fn unquoted_fields(row: &str) -> Vec<String> {
    engine::split_fields(row)
        .into_iter()
        .map(|field| engine::unquote(field).into_owned())
        .collect()
}

fn row_matches(row: &str, keys: &[String]) -> bool {
    let fields = engine::split_fields(row);
    fields.len() == keys.len()
        && fields
            .iter()
            .zip(keys)
            .all(|(field, key)| engine::unquote(field) == key.as_str())
}

/// The span as one primitive.
pub struct SingleValueContainer<'de> {
    decoder: Decoder<'de>,
}

impl<'de> SingleValueContainer<'de> {
    /// Empty text is nil.
    #[must_use]
    pub fn decode_nil(&self) -> bool {
        self.decoder.span.is_empty()
    }

    #[must_use]
    pub fn decode_str(&self) -> Cow<'de, str> {
        engine::unquote(self.decoder.span)
    }

    pub fn decode_bool(&self) -> Result<bool> {
        scalar::parse_bool(&self.decode_str(), &self.decoder.path)
    }

    pub fn decode_char(&self) -> Result<char> {
        scalar::parse_char(&self.decode_str(), &self.decoder.path)
    }

    /// Parses the span as a number or any other `FromStr` primitive.
    pub fn decode_parsed<T: FromStr>(&self, kind: ScalarKind) -> Result<T> {
        scalar::parse(&self.decode_str(), kind, &self.decoder.path)
    }

    /// Decodes a compound value from the same span and level.
    pub fn decode<T: Deserialize<'de>>(self) -> Result<T> {
        T::deserialize(self.decoder)
    }
}

/// One row addressed by key.
pub struct KeyedContainer<'de> {
    decoder: Decoder<'de>,
    keys: Arc<[String]>,
    fields: Vec<&'de str>,
}

impl<'de> KeyedContainer<'de> {
    /// The KeySet of the row.
    #[must_use]
    pub fn all_keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.decoder.path
    }

    /// Whether `key` is in the KeySet and the row has a field for it.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key)
            .map(|index| index < self.fields.len())
            .unwrap_or(false)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    fn field_span(&self, key: &str) -> Result<&'de str> {
        let index = self
            .position(key)
            .ok_or_else(|| Error::key_not_found(&self.decoder.path, key))?;
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| Error::missing_item(&self.decoder.path, self.keys.len(), self.fields.len()))
    }

    /// The decoder of the field stored under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] when `key` is outside the KeySet and
    /// [`Error::MissingItem`] when the row is shorter than the KeySet.
    pub fn field(&self, key: &str) -> Result<Decoder<'de>> {
        let span = self.field_span(key)?;
        self.decoder
            .child(span, self.decoder.path.field(key), self.keys.clone(), true)
    }

    pub fn decode_nil(&self, key: &str) -> Result<bool> {
        Ok(self.field_span(key)?.is_empty())
    }

    pub fn decode<T: Deserialize<'de>>(&self, key: &str) -> Result<T> {
        T::deserialize(self.field(key)?)
    }

    /// Always fails: a row field cannot hold a record.
    pub fn nested_container(&self, key: &str) -> Result<KeyedContainer<'de>> {
        self.field(key)?.container()
    }

    /// Always fails: a row field cannot hold a sequence.
    pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedContainer<'de>> {
        self.field(key)?.unkeyed_container()
    }

    fn into_access(self, order: KeyOrder) -> KeyedAccess<'de> {
        KeyedAccess {
            container: self,
            order,
            next: 0,
            current: None,
        }
    }
}

/// A forward-only cursor over rows or fields.
#[derive(Debug)]
pub struct UnkeyedContainer<'de> {
    decoder: Decoder<'de>,
    children: Vec<&'de str>,
    keys: Arc<[String]>,
    current_index: usize,
    header_pending: bool,
    header_only: bool,
}

impl<'de> UnkeyedContainer<'de> {
    /// Number of child spans, header row included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.children.len()
    }

    /// Whether the element under the cursor is empty text.
    #[must_use]
    pub fn decode_nil(&self) -> bool {
        self.children
            .get(self.current_index)
            .map(|span| span.is_empty())
            .unwrap_or(false)
    }

    /// Advances the cursor and returns the decoder of the element it passed.
    ///
    /// `sequence_shaped` resolves a pending header decision.
    ///
    /// # Errors
    ///
    /// [`Error::IndexExhausted`] once the cursor is past the last element.
    pub fn next_element(&mut self, sequence_shaped: bool) -> Result<Decoder<'de>> {
        if self.header_pending {
            self.header_pending = false;
            if !sequence_shaped && self.current_index == 0 {
                debug!(path = %self.decoder.path, "first row is a header");
                self.current_index = 1;
                self.header_only = self.children.len() == 1;
            }
        }

        let index = self.current_index;
        let span = self
            .children
            .get(index)
            .copied()
            .ok_or_else(|| Error::exhausted(&self.decoder.path, self.children.len()))?;
        self.current_index += 1;
        self.decoder
            .child(span, self.decoder.path.index(index), self.keys.clone(), false)
    }

    pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T> {
        T::deserialize(ElementDecoder { container: self })
    }

    pub fn nested_container(&mut self) -> Result<KeyedContainer<'de>> {
        self.next_element(false)?.container()
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'de>> {
        self.next_element(true)?.unkeyed_container()
    }
}

impl<'de> de::SeqAccess<'de> for UnkeyedContainer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.is_at_end() {
            return Ok(None);
        }
        match seed.deserialize(ElementDecoder { container: self }) {
            // skipping the header consumed the only row
            Err(Error::IndexExhausted { .. }) if self.header_only => Ok(None),
            result => result.map(Some),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        if self.header_pending {
            None
        } else {
            Some(self.children.len().saturating_sub(self.current_index))
        }
    }
}

enum KeyOrder {
    /// The fields a struct declares.
    Fields(&'static [&'static str]),
    /// The container's own KeySet.
    KeySet,
}

struct KeyedAccess<'de> {
    container: KeyedContainer<'de>,
    order: KeyOrder,
    next: usize,
    current: Option<String>,
}

impl<'de> de::MapAccess<'de> for KeyedAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let key = match self.order {
            KeyOrder::Fields(fields) => fields.get(self.next).map(|f| f.to_string()),
            KeyOrder::KeySet => self.container.keys.get(self.next).cloned(),
        };
        match key {
            Some(key) => {
                self.next += 1;
                let result = seed.deserialize(key.as_str().into_deserializer());
                self.current = Some(key);
                result.map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let key = self
            .current
            .take()
            .ok_or_else(|| Error::custom("next_value_seed called before next_key_seed"))?;
        seed.deserialize(self.container.field(&key)?)
    }
}

/// Element of an unkeyed container whose span is resolved on first use.
struct ElementDecoder<'a, 'de> {
    container: &'a mut UnkeyedContainer<'de>,
}

macro_rules! forward_to_element {
    ($($method:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.container.next_element(false)?.$method($($arg,)* visitor)
            }
        )*
    };
}

impl<'a, 'de> de::Deserializer<'de> for ElementDecoder<'a, 'de> {
    type Error = Error;

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.container.next_element(true)?.deserialize_seq(visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.container.next_element(true)?.deserialize_tuple(len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.container
            .next_element(true)?
            .deserialize_tuple_struct(name, len, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_element! {
        deserialize_any(),
        deserialize_bool(),
        deserialize_i8(),
        deserialize_i16(),
        deserialize_i32(),
        deserialize_i64(),
        deserialize_i128(),
        deserialize_u8(),
        deserialize_u16(),
        deserialize_u32(),
        deserialize_u64(),
        deserialize_u128(),
        deserialize_f32(),
        deserialize_f64(),
        deserialize_char(),
        deserialize_str(),
        deserialize_string(),
        deserialize_bytes(),
        deserialize_byte_buf(),
        deserialize_option(),
        deserialize_unit(),
        deserialize_unit_struct(name: &'static str),
        deserialize_map(),
        deserialize_struct(name: &'static str, fields: &'static [&'static str]),
        deserialize_enum(name: &'static str, variants: &'static [&'static str]),
        deserialize_identifier(),
        deserialize_ignored_any(),
    }
}

macro_rules! deserialize_number {
    ($method:ident, $visit:ident, $ty:ty, $kind:expr) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            visitor.$visit(self.single_value_container().decode_parsed::<$ty>($kind)?)
        }
    };
}

impl<'de> de::Deserializer<'de> for Decoder<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.in_keyed {
            return self.deserialize_str(visitor);
        }
        if engine::split_rows(self.span).len() > 1 {
            return self.deserialize_seq(visitor);
        }
        // rows of a top-level table
        if self.level == 1 && !self.keys.is_empty() {
            return self.deserialize_map(visitor);
        }
        if engine::split_fields(self.span).len() > 1 {
            // a lone row at the top is read as its fields
            let row = if self.level == 0 {
                self.child(self.span, self.path.clone(), self.keys.clone(), false)?
            } else {
                self
            };
            return row.deserialize_seq(visitor);
        }
        self.deserialize_str(visitor)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.single_value_container().decode_bool()?)
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
        visitor.visit_char(self.single_value_container().decode_char()?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.single_value_container().decode_str() {
            Cow::Borrowed(text) => visitor.visit_borrowed_str(text),
            Cow::Owned(text) => visitor.visit_string(text),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.single_value_container().decode_nil() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.single_value_container().decode_nil() {
            visitor.visit_unit()
        } else {
            Err(Error::scalar(&self.path, ScalarKind::Nil, self.span))
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
        visitor.visit_seq(self.unkeyed_container()?)
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
        visitor.visit_map(self.container()?.into_access(KeyOrder::KeySet))
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
        visitor.visit_map(self.container()?.into_access(KeyOrder::Fields(fields)))
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
        let variant = self.single_value_container().decode_str().into_owned();
        visitor.visit_enum(variant.into_deserializer())
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Row {
        id: u32,
        name: String,
    }

    fn options() -> CsvOptions {
        CsvOptions::new()
    }

    #[test]
    fn test_single_value_container() {
        let options = options();
        let decoder = Decoder::new("\"a,b\"", &options);
        let single = decoder.single_value_container();
        assert!(!single.decode_nil());
        assert_eq!(single.decode_str(), "a,b");

        let decoder = Decoder::new("abc", &options);
        let err = decoder
            .single_value_container()
            .decode_parsed::<i32>(ScalarKind::I32)
            .unwrap_err();
        assert!(matches!(err, Error::ScalarDecodeFailure { kind: ScalarKind::I32, .. }));
    }

    #[test]
    fn test_header_detected_by_shape() {
        let options = options();
        let decoder = Decoder::new("id,name\n1,a\n2,b", &options);
        let rows: Vec<Row> = decoder.single_value_container().decode().unwrap();
        assert_eq!(
            rows,
            vec![
                Row { id: 1, name: "a".into() },
                Row { id: 2, name: "b".into() }
            ]
        );

        let decoder = Decoder::new("1,2\n3,4", &options);
        let rows: Vec<Vec<u8>> = decoder.single_value_container().decode().unwrap();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_header_matched_against_keys() {
        let options = CsvOptions::new().with_keys(["id", "name"]);
        let decoder = Decoder::new("id,name", &options);
        let container = decoder.unkeyed_container().unwrap();
        assert!(container.is_at_end());

        let rows: Vec<Row> = Decoder::new("id,name", &options)
            .single_value_container()
            .decode()
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_lone_header_without_keys() {
        let options = options();
        let rows: Vec<Row> = Decoder::new("id,name", &options)
            .single_value_container()
            .decode()
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_row_is_one_nil_field() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Single {
            n: Option<u8>,
        }

        let options = CsvOptions::new().with_keys(["n"]);
        let rows: Vec<Single> = Decoder::new("n\n\n2", &options)
            .single_value_container()
            .decode()
            .unwrap();
        assert_eq!(rows, vec![Single { n: None }, Single { n: Some(2) }]);
    }

    #[test]
    fn test_exhausted_cursor() {
        let options = CsvOptions::new().with_header(HeaderMode::Absent);
        let decoder = Decoder::new("1\n2", &options);
        let mut seq = decoder.unkeyed_container().unwrap();
        assert_eq!(seq.decode::<u8>().unwrap(), 1);
        assert_eq!(seq.decode::<u8>().unwrap(), 2);
        assert!(seq.is_at_end());
        assert!(matches!(
            seq.decode::<u8>(),
            Err(Error::IndexExhausted { count: 2, .. })
        ));
    }

    #[test]
    fn test_sequence_in_keyed_is_unsupported() {
        let options = CsvOptions::new().with_keys(["a", "b"]);
        let decoder = Decoder::new("1,2", &options);
        let container = decoder.container().unwrap();
        assert_eq!(container.decode::<u8>("b").unwrap(), 2);

        let err = container.nested_unkeyed_container("a").unwrap_err();
        assert!(matches!(err, Error::UnsupportedComposition { ref path, .. } if path.to_string() == "$.a"));
        assert!(matches!(
            container.nested_container("a"),
            Err(Error::UnsupportedComposition { .. })
        ));
    }

    #[test]
    fn test_keyed_lookup_errors() {
        let options = CsvOptions::new().with_keys(["a", "b", "c"]);
        let decoder = Decoder::new("1,2", &options);
        let container = decoder.container().unwrap();
        assert!(container.contains("b"));
        assert!(!container.contains("c"));
        assert!(matches!(
            container.decode::<u8>("z"),
            Err(Error::KeyNotFound { .. })
        ));
        assert!(matches!(
            container.decode::<u8>("c"),
            Err(Error::MissingItem { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_empty_top_level_sequence_has_no_keys() {
        let options = options();
        let decoder = Decoder::new("", &options);
        assert!(matches!(
            decoder.unkeyed_container(),
            Err(Error::NoKeysFound { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let options = CsvOptions::new().with_max_depth(1).with_header(HeaderMode::Absent);
        let decoder = Decoder::new("1,2\n3,4", &options);
        let err = decoder
            .single_value_container()
            .decode::<Vec<Vec<u8>>>()
            .unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 1, .. }));
    }
}
