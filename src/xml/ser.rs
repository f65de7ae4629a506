//! Tag encoding.
//!
//! Every record field becomes `<key>value</key>` and every sequence element
//! `<item>value</item>`, where the item tag comes from
//! [`XmlOptions::item_tag`]. Siblings are concatenated without separators,
//! and a compound value is encoded in place inside its parent's tag. Text is
//! written verbatim.

use super::engine::wrap;
use crate::error::{Error, Result};
use crate::options::XmlOptions;
use crate::path::Path;
use crate::scalar;
use crate::Value;
use serde::ser::{self, Serialize};

/// Serializer of one value at one level of a tag document.
#[derive(Clone, Debug)]
pub struct Encoder<'o> {
    item_tag: &'o str,
    path: Path,
    level: usize,
    max_depth: usize,
}

impl<'o> Encoder<'o> {
    #[must_use]
    pub fn new(options: &'o XmlOptions) -> Self {
        Encoder {
            item_tag: &options.item_tag,
            path: Path::root(),
            level: 0,
            max_depth: options.max_depth,
        }
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    fn child(&self, path: Path) -> Result<Encoder<'o>> {
        let level = self.level + 1;
        if level > self.max_depth {
            return Err(Error::depth_exceeded(&path, self.max_depth));
        }
        Ok(Encoder {
            item_tag: self.item_tag,
            path,
            level,
            max_depth: self.max_depth,
        })
    }

    fn sequence(self, len: usize) -> Result<SequenceEncoder<'o>> {
        trace!(path = %self.path, level = self.level, "sequence");
        Ok(SequenceEncoder {
            encoder: self,
            items: Vec::with_capacity(len),
        })
    }

    fn record(self, len: usize) -> Result<RecordEncoder<'o>> {
        trace!(path = %self.path, level = self.level, "record");
        Ok(RecordEncoder {
            encoder: self,
            fields: Vec::with_capacity(len),
            current_key: None,
        })
    }
}

impl<'o> ser::Serializer for Encoder<'o> {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = SequenceEncoder<'o>;
    type SerializeTuple = SequenceEncoder<'o>;
    type SerializeTupleStruct = SequenceEncoder<'o>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = RecordEncoder<'o>;
    type SerializeStruct = RecordEncoder<'o>;
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
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
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
        Ok(variant.to_string())
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

    fn serialize_seq(self, len: Option<usize>) -> Result<SequenceEncoder<'o>> {
        self.sequence(len.unwrap_or(0))
    }

    fn serialize_tuple(self, len: usize) -> Result<SequenceEncoder<'o>> {
        self.sequence(len)
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SequenceEncoder<'o>> {
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

    fn serialize_map(self, len: Option<usize>) -> Result<RecordEncoder<'o>> {
        self.record(len.unwrap_or(0))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<RecordEncoder<'o>> {
        self.record(len)
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

/// Sequence elements, each already wrapped in the item tag.
pub struct SequenceEncoder<'o> {
    encoder: Encoder<'o>,
    items: Vec<String>,
}

impl<'o> SequenceEncoder<'o> {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let path = self.encoder.path.index(self.items.len());
        let inner = value.serialize(self.encoder.child(path)?)?;
        self.items.push(wrap(self.encoder.item_tag, &inner));
        Ok(())
    }

    fn finish(self) -> String {
        self.items.concat()
    }
}

impl<'o> ser::SerializeSeq for SequenceEncoder<'o> {
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

impl<'o> ser::SerializeTuple for SequenceEncoder<'o> {
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

impl<'o> ser::SerializeTupleStruct for SequenceEncoder<'o> {
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

/// Record fields in the order they were written.
pub struct RecordEncoder<'o> {
    encoder: Encoder<'o>,
    fields: Vec<String>,
    current_key: Option<String>,
}

impl<'o> RecordEncoder<'o> {
    fn write<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let field = self.encoder.child(self.encoder.path.field(key))?;
        let inner = value.serialize(field)?;
        self.fields.push(wrap(key, &inner));
        Ok(())
    }

    fn finish(self) -> String {
        self.fields.concat()
    }
}

impl<'o> ser::SerializeMap for RecordEncoder<'o> {
    type Ok = String;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match crate::to_value(key)? {
            Value::Scalar(key) if !key.is_empty() => {
                self.current_key = Some(key);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be non-empty scalars")),
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

impl<'o> ser::SerializeStruct for RecordEncoder<'o> {
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
