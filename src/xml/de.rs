//! Tag decoding.
//!
//! Keys are discovered from the tag names of sibling elements, so unlike the
//! tabular format there is no header. A keyed lookup resolves to the first
//! sibling with that name; an unkeyed container ignores names and walks the
//! siblings in order.
//!
//! ```rust
//! use serde_csvxml::xml::Decoder;
//! use serde_csvxml::XmlOptions;
//!
//! let options = XmlOptions::new();
//! let decoder = Decoder::new("<b>1</b><c>2</c>", &options);
//! let record = decoder.container().unwrap();
//! assert_eq!(record.all_keys(), vec!["b", "c"]);
//! assert_eq!(record.decode::<String>("c").unwrap(), "2");
//! ```

use super::engine;
use crate::error::{Error, Result};
use crate::options::XmlOptions;
use crate::path::Path;
use crate::scalar::{self, ScalarKind};
use serde::de::{self, Deserialize, IntoDeserializer};
use std::sync::Arc;
use std::str::FromStr;

/// A decoder bound to the inner text of one element.
#[derive(Clone, Debug)]
pub struct Decoder<'de> {
    span: &'de str,
    path: Path,
    level: usize,
    item_tag: Arc<str>,
    max_depth: usize,
}

impl<'de> Decoder<'de> {
    /// Creates the level-0 decoder of a document whose root, if any, has
    /// already been removed.
    #[must_use]
    pub fn new(input: &'de str, options: &XmlOptions) -> Self {
        Decoder {
            span: input,
            path: Path::root(),
            level: 0,
            item_tag: options.item_tag.as_str().into(),
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

    fn child(&self, span: &'de str, path: Path) -> Result<Decoder<'de>> {
        let level = self.level + 1;
        if level > self.max_depth {
            return Err(Error::depth_exceeded(&path, self.max_depth));
        }
        Ok(Decoder {
            span,
            path,
            level,
            item_tag: self.item_tag.clone(),
            max_depth: self.max_depth,
        })
    }

    #[must_use]
    pub fn single_value_container(&self) -> SingleValueContainer<'de> {
        SingleValueContainer {
            decoder: self.clone(),
        }
    }

    /// Opens the span as a record keyed by its children's tag names.
    ///
    /// # Errors
    ///
    /// [`Error::WrongInputFormat`] for malformed children.
    pub fn container(&self) -> Result<KeyedContainer<'de>> {
        let entries = engine::split_elements(self.span)?
            .into_iter()
            .map(engine::key_value)
            .collect::<Result<Vec<_>>>()?;

        trace!(path = %self.path, level = self.level, elements = entries.len(), "keyed container");
        Ok(KeyedContainer {
            decoder: self.clone(),
            entries,
        })
    }

    /// Opens the span as a sequence of its child elements, whatever their
    /// names.
    ///
    /// # Errors
    ///
    /// [`Error::WrongInputFormat`] for malformed children.
    pub fn unkeyed_container(&self) -> Result<UnkeyedContainer<'de>> {
        let children = engine::split_elements(self.span)?
            .into_iter()
            .map(|span| engine::key_value(span).map(|(_, inner)| inner))
            .collect::<Result<Vec<_>>>()?;

        trace!(path = %self.path, level = self.level, count = children.len(), "unkeyed container");
        Ok(UnkeyedContainer {
            decoder: self.clone(),
            children,
            current_index: 0,
        })
    }
}

/// The inner text as one primitive.
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
    pub fn decode_str(&self) -> &'de str {
        self.decoder.span
    }

    pub fn decode_bool(&self) -> Result<bool> {
        scalar::parse_bool(self.decoder.span, &self.decoder.path)
    }

    pub fn decode_char(&self) -> Result<char> {
        scalar::parse_char(self.decoder.span, &self.decoder.path)
    }

    pub fn decode_parsed<T: FromStr>(&self, kind: ScalarKind) -> Result<T> {
        scalar::parse(self.decoder.span, kind, &self.decoder.path)
    }

    pub fn decode<T: Deserialize<'de>>(self) -> Result<T> {
        T::deserialize(self.decoder)
    }
}

/// Sibling elements addressed by tag name.
pub struct KeyedContainer<'de> {
    decoder: Decoder<'de>,
    entries: Vec<(&'de str, &'de str)>,
}

impl<'de> KeyedContainer<'de> {
    /// Distinct tag names in document order.
    #[must_use]
    pub fn all_keys(&self) -> Vec<&'de str> {
        let mut keys: Vec<&'de str> = Vec::with_capacity(self.entries.len());
        for (name, _) in &self.entries {
            if !keys.contains(name) {
                keys.push(name);
            }
        }
        keys
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.decoder.path
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == key)
    }

    fn inner(&self, key: &str) -> Result<&'de str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, inner)| *inner)
            .ok_or_else(|| Error::key_not_found(&self.decoder.path, key))
    }

    /// The decoder of the first element named `key`. Its inner text may hold
    /// further elements.
    pub fn field(&self, key: &str) -> Result<Decoder<'de>> {
        let inner = self.inner(key)?;
        self.decoder.child(inner, self.decoder.path.field(key))
    }

    pub fn decode_nil(&self, key: &str) -> Result<bool> {
        Ok(self.inner(key)?.is_empty())
    }

    pub fn decode<T: Deserialize<'de>>(&self, key: &str) -> Result<T> {
        T::deserialize(self.field(key)?)
    }

    /// Always fails once `key` is found. Compound fields are read through
    /// [`decode`](Self::decode) instead.
    pub fn nested_container(&self, key: &str) -> Result<KeyedContainer<'de>> {
        let field = self.field(key)?;
        Err(Error::unsupported_composition(field.path(), "keyed container"))
    }

    /// Always fails once `key` is found.
    pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedContainer<'de>> {
        let field = self.field(key)?;
        Err(Error::unsupported_composition(field.path(), "sequence"))
    }
}

/// A forward-only cursor over sibling elements.
#[derive(Debug)]
pub struct UnkeyedContainer<'de> {
    decoder: Decoder<'de>,
    children: Vec<&'de str>,
    current_index: usize,
}

impl<'de> UnkeyedContainer<'de> {
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

    /// Whether the element under the cursor is empty.
    #[must_use]
    pub fn decode_nil(&self) -> bool {
        self.children
            .get(self.current_index)
            .map(|inner| inner.is_empty())
            .unwrap_or(false)
    }

    /// Advances the cursor and returns the decoder of the element it passed.
    ///
    /// # Errors
    ///
    /// [`Error::IndexExhausted`] once the cursor is past the last element.
    pub fn next_element(&mut self) -> Result<Decoder<'de>> {
        let index = self.current_index;
        let inner = self
            .children
            .get(index)
            .copied()
            .ok_or_else(|| Error::exhausted(&self.decoder.path, self.children.len()))?;
        self.current_index += 1;
        self.decoder.child(inner, self.decoder.path.index(index))
    }

    pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T> {
        T::deserialize(self.next_element()?)
    }

    pub fn nested_container(&mut self) -> Result<KeyedContainer<'de>> {
        self.next_element()?.container()
    }

    pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedContainer<'de>> {
        self.next_element()?.unkeyed_container()
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
        seed.deserialize(self.next_element()?).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.children.len().saturating_sub(self.current_index))
    }
}

enum KeyOrder<'de> {
    Fields(&'static [&'static str]),
    Discovered(Vec<&'de str>),
}

struct KeyedAccess<'de> {
    container: KeyedContainer<'de>,
    order: KeyOrder<'de>,
    next: usize,
    current: Option<String>,
}

impl<'de> KeyedAccess<'de> {
    fn new(container: KeyedContainer<'de>, fields: Option<&'static [&'static str]>) -> Self {
        let order = match fields {
            Some(fields) => KeyOrder::Fields(fields),
            None => KeyOrder::Discovered(container.all_keys()),
        };
        KeyedAccess {
            container,
            order,
            next: 0,
            current: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for KeyedAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let key = match &self.order {
            KeyOrder::Fields(fields) => fields.get(self.next).copied(),
            KeyOrder::Discovered(keys) => keys.get(self.next).copied(),
        };
        match key {
            Some(key) => {
                self.next += 1;
                self.current = Some(key.to_string());
                seed.deserialize(key.into_deserializer()).map(Some)
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

    fn size_hint(&self) -> Option<usize> {
        let total = match &self.order {
            KeyOrder::Fields(fields) => fields.len(),
            KeyOrder::Discovered(keys) => keys.len(),
        };
        Some(total.saturating_sub(self.next))
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
        let elements = engine::split_elements(self.span)?;
        if elements.is_empty() {
            return self.deserialize_str(visitor);
        }
        let all_items = elements.iter().all(|span| {
            engine::key_value(span)
                .map(|(name, _)| name == &*self.item_tag)
                .unwrap_or(false)
        });
        if all_items {
            self.deserialize_seq(visitor)
        } else {
            self.deserialize_map(visitor)
        }
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
        visitor.visit_borrowed_str(self.span)
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
        if self.span.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.span.is_empty() {
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
        visitor.visit_map(KeyedAccess::new(self.container()?, None))
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
        visitor.visit_map(KeyedAccess::new(self.container()?, Some(fields)))
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
        visitor.visit_enum(self.span.into_deserializer())
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
    struct Pair {
        b: u8,
        c: u8,
    }

    fn decoder(text: &str) -> Decoder<'_> {
        Decoder::new(text, &XmlOptions::default())
    }

    #[test]
    fn test_keyed_lookup() {
        let record = decoder("<b>1</b><c>2</c><b>3</b>").container().unwrap();
        assert_eq!(record.all_keys(), vec!["b", "c"]);
        assert_eq!(record.decode::<u8>("b").unwrap(), 1);
        assert!(!record.contains("d"));
        assert!(matches!(
            record.decode::<u8>("d"),
            Err(Error::KeyNotFound { .. })
        ));
        assert!(!record.decode_nil("c").unwrap());
    }

    #[test]
    fn test_struct_from_siblings() {
        let pair: Pair = decoder("<c>2</c><b>1</b>").single_value_container().decode().unwrap();
        assert_eq!(pair, Pair { b: 1, c: 2 });
    }

    #[test]
    fn test_unkeyed_ignores_names() {
        let mut seq = decoder("<x>1</x><y>2</y>").unkeyed_container().unwrap();
        assert_eq!(seq.count(), 2);
        assert_eq!(seq.decode::<u8>().unwrap(), 1);
        assert_eq!(seq.decode::<u8>().unwrap(), 2);
        assert!(matches!(
            seq.decode::<u8>(),
            Err(Error::IndexExhausted { count: 2, .. })
        ));
    }

    #[test]
    fn test_nested_sequence_in_keyed() {
        let record = decoder("<tags><item>1</item></tags>").container().unwrap();
        let err = record.nested_unkeyed_container("tags").unwrap_err();
        assert!(matches!(err, Error::UnsupportedComposition { .. }));
        assert!(matches!(
            record.nested_container("tags"),
            Err(Error::UnsupportedComposition { .. })
        ));
        assert!(matches!(
            record.nested_container("missing"),
            Err(Error::KeyNotFound { .. })
        ));
        assert_eq!(record.decode::<Vec<u8>>("tags").unwrap(), vec![1]);
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Outer {
        a: Pair,
        tags: Vec<u8>,
    }

    #[test]
    fn test_compound_fields() {
        let outer: Outer = decoder("<a><b>1</b><c>2</c></a><tags><item>3</item><item>4</item></tags>")
            .single_value_container()
            .decode()
            .unwrap();
        assert_eq!(
            outer,
            Outer {
                a: Pair { b: 1, c: 2 },
                tags: vec![3, 4],
            }
        );
    }

    #[test]
    fn test_scalar_failure() {
        let err = decoder("<n>abc</n>")
            .container()
            .unwrap()
            .decode::<i64>("n")
            .unwrap_err();
        assert_eq!(err.path().map(|p| p.to_string()), Some("$.n".to_string()));
    }
}
