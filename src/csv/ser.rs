//! Tabular encoding.
//!
//! [`Encoder`] is a by-value serde `Serializer` whose output is the text of
//! the value it was handed. Each container state owns the fragments of its
//! children and joins them in `end()`, so a parent only ever sees the finished
//! text of a child:
//!
//! - sequences join their elements with `\n` at level 0 and `,` below
//! - records fill a slot per KeySet entry and join the slots with `,`
//! - strings are quoted when they contain a separator
//!
//! The header row is not part of the encoder; see
//! [`to_string_with_options`](super::to_string_with_options).

use super::engine;
use crate::error::{Error, Result};
use crate::options::CsvOptions;
use crate::path::Path;
use crate::scalar;
use crate::Value;
use serde::ser::{self, Serialize};

/// Serializer of one value at one level of a tabular document.
#[derive(Clone, Debug)]
pub struct Encoder<'k> {
    keys: &'k [String],
    path: Path,
    level: usize,
    in_keyed: bool,
    max_depth: usize,
}

impl<'k> Encoder<'k> {
    /// Creates the level-0 encoder of a document.
    #[must_use]
    pub fn new(options: &'k CsvOptions) -> Self {
        Encoder {
            keys: &options.keys,
            path: Path::root(),
            level: 0,
            in_keyed: false,
            max_depth: options.max_depth,
        }
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    fn child(&self, path: Path, in_keyed: bool) -> Result<Encoder<'k>> {
        let level = self.level + 1;
        if level > self.max_depth {
            return Err(Error::depth_exceeded(&path, self.max_depth));
        }
        Ok(Encoder {
            keys: self.keys,
            path,
            level,
            in_keyed,
            max_depth: self.max_depth,
        })
    }

    fn separator(&self) -> &'static str {
        if self.level == 0 {
            "\n"
        } else {
            ","
        }
    }

    fn sequence(self, len: usize) -> Result<SequenceEncoder<'k>> {
        if self.in_keyed {
            return Err(Error::unsupported_composition(&self.path, "sequence"));
        }
        trace!(path = %self.path, level = self.level, "sequence");
        Ok(SequenceEncoder {
            encoder: self,
            items: Vec::with_capacity(len),
        })
    }

    fn record(self) -> Result<RecordEncoder<'k>> {
        if self.in_keyed {
            return Err(Error::unsupported_composition(&self.path, "keyed container"));
        }
        trace!(path = %self.path, level = self.level, keys = self.keys.len(), "record");
        Ok(RecordEncoder {
            slots: vec![String::new(); self.keys.len()],
            encoder: self,
            current_key: None,
        })
    }
}

impl<'k> ser::Serializer for Encoder<'k> {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = SequenceEncoder<'k>;
    type SerializeTuple = SequenceEncoder<'k>;
    type SerializeTupleStruct = SequenceEncoder<'k>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = RecordEncoder<'k>;
    type SerializeStruct = RecordEncoder<'k>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(scalar::bool_to_string(v).to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(scalar::f32_to_string(v))
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(scalar::float_to_string(v))
    }

    fn serialize_char(self, v: char) -> Result<String> {
        self.serialize_str(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(engine::quote(v).into_owned())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<String> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SequenceEncoder<'k>> {
        self.sequence(len.unwrap_or(0))
    }

    fn serialize_tuple(self, len: usize) -> Result<SequenceEncoder<'k>> {
        self.sequence(len)
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SequenceEncoder<'k>> {
        self.sequence(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<RecordEncoder<'k>> {
        self.record()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<RecordEncoder<'k>> {
        self.record()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

/// An append-only list of encoded elements.
pub struct SequenceEncoder<'k> {
    encoder: Encoder<'k>,
    items: Vec<String>,
}

impl<'k> SequenceEncoder<'k> {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let path = self.encoder.path.index(self.items.len());
        let item = value.serialize(self.encoder.child(path, false)?)?;
        self.items.push(item);
        Ok(())
    }

    fn finish(self) -> String {
        let mut text = self.items.join(self.encoder.separator());
        // an empty last row survives `split_rows` only when terminated
        if self.encoder.level == 0 && self.items.last().map_or(false, String::is_empty) {
            text.push('\n');
        }
        text
    }
}

impl<'k> ser::SerializeSeq for SequenceEncoder<'k> {
    type Ok = String;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl<'k> ser::SerializeTuple for SequenceEncoder<'k> {
    type Ok = String;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl<'k> ser::SerializeTupleStruct for SequenceEncoder<'k> {
    type Ok = String;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

/// One row: a slot per KeySet entry, empty until written.
pub struct RecordEncoder<'k> {
    encoder: Encoder<'k>,
    slots: Vec<String>,
    current_key: Option<String>,
}

impl<'k> RecordEncoder<'k> {
    fn write<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let index = self
            .encoder
            .keys
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| Error::key_not_found(&self.encoder.path, key))?;
        let field = self.encoder.child(self.encoder.path.field(key), true)?;
        self.slots[index] = value.serialize(field)?;
        Ok(())
    }

    fn finish(self) -> String {
        self.slots.join(",")
    }
}

impl<'k> ser::SerializeMap for RecordEncoder<'k> {
    type Ok = String;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match crate::to_value(key)? {
            Value::Scalar(key) => {
                self.current_key = Some(key);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.write(&key, value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl<'k> ser::SerializeStruct for RecordEncoder<'k> {
    type Ok = String;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.write(key, value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        name: String,
    }

    fn encode<T: Serialize>(value: &T, options: &CsvOptions) -> Result<String> {
        value.serialize(Encoder::new(options))
    }

    #[test]
    fn test_separators_follow_level() {
        let options = CsvOptions::new();
        assert_eq!(encode(&vec![1, 2, 3], &options).unwrap(), "1\n2\n3");
        assert_eq!(
            encode(&vec![vec![1, 2], vec![3]], &options).unwrap(),
            "1,2\n3"
        );
    }

    #[test]
    fn test_empty_rows_are_kept() {
        let options = CsvOptions::new();
        assert_eq!(encode(&vec![Some(1), None, Some(3)], &options).unwrap(), "1\n\n3");
        assert_eq!(encode(&vec![Some(1), None], &options).unwrap(), "1\n\n");
        assert_eq!(encode(&vec![None::<u8>], &options).unwrap(), "\n");
        assert_eq!(encode(&vec![vec![1], vec![]], &options).unwrap(), "1\n\n");
    }

    #[test]
    fn test_record_slots_follow_keyset() {
        let options = CsvOptions::new().with_keys(["name", "id", "extra"]);
        let row = Row {
            id: 1,
            name: "a,b".to_string(),
        };
        assert_eq!(encode(&row, &options).unwrap(), "\"a,b\",1,");
    }

    #[test]
    fn test_unknown_key() {
        let options = CsvOptions::new().with_keys(["id"]);
        let err = encode(&vec![Row { id: 1, name: "a".into() }], &options).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { ref key, ref path } if key == "name" && path.to_string() == "$[0]"));
    }

    #[test]
    fn test_compound_field_is_unsupported() {
        #[derive(Serialize)]
        struct Nested {
            tags: Vec<u8>,
        }
        let options = CsvOptions::new().with_keys(["tags"]);
        let err = encode(&Nested { tags: vec![1] }, &options).unwrap_err();
        assert!(matches!(err, Error::UnsupportedComposition { ref path, .. } if path.to_string() == "$.tags"));
    }

    #[test]
    fn test_scalars() {
        let options = CsvOptions::new();
        assert_eq!(encode(&1.0f64, &options).unwrap(), "1.0");
        assert_eq!(encode(&None::<u8>, &options).unwrap(), "");
        assert_eq!(encode(&'"', &options).unwrap(), "\"\"\"\"");
        assert_eq!(encode(&"a,b\nc\"d", &options).unwrap(), "\"a,b\nc\"\"d\"");
    }
}
