use serde::{ser, Serialize};
use formdata::Encoder;
use std::io::Write;

use crate::error::{Error, Result};
use crate::file;
use crate::storage::{Leaf, Storage};

/// Builds the part tree for one value. The serializer itself is stateless; all intermediate state
/// lives in the per-shape collectors, so concurrent encodes share nothing.
pub struct Serializer;

pub fn to_bytes<T: Serialize>(value: &T, boundary: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_writer(&mut buf, value, boundary)?;
    Ok(buf)
}

/// Like [`to_bytes`], but returns a `String`. Fails with [`Error::Utf8`](crate::Error::Utf8) when
/// a part body is not valid UTF-8; binary payloads belong in [`to_bytes`] or [`to_writer`].
pub fn to_string<T: Serialize>(value: &T, boundary: &str) -> Result<String> {
    Ok(String::from_utf8(to_bytes(value, boundary)?)?)
}

pub fn to_writer<T: Serialize, W: Write>(mut writer: W, value: &T, boundary: &str) -> Result<()> {
    let parts = value.serialize(Serializer)?.into_parts()?;
    Encoder::encode(&parts, boundary, &mut writer)?;
    Ok(())
}

impl ser::Serializer for Serializer {

    type Ok = Storage;
    type Error = Error;
    type SerializeSeq = SerializeSeq;
    type SerializeTuple = SerializeSeq;
    type SerializeTupleStruct = SerializeSeq;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_string())))
    }

    fn serialize_i8(self, v: i8) -> Result<Storage> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Storage> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Storage> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_string())))
    }

    fn serialize_u8(self, v: u8) -> Result<Storage> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Storage> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Storage> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_string())))
    }

    fn serialize_f32(self, v: f32) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_string())))
    }

    fn serialize_f64(self, v: f64) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_string())))
    }

    fn serialize_char(self, v: char) -> Result<Storage> {
        self.serialize_str(&v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::text(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Storage> {
        Ok(Storage::Leaf(Leaf::binary(v.to_vec())))
    }

    fn serialize_none(self) -> Result<Storage> {
        Ok(Storage::Absent)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Storage> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Storage> {
        Ok(Storage::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Storage> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(self, _name: &'static str, _index: u32, variant: &'static str) -> Result<Storage> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<Storage> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(self, _name: &'static str, _index: u32, variant: &'static str, value: &T) -> Result<Storage> {
        let inner = value.serialize(Serializer).map_err(|e| e.at(variant))?;
        Ok(Storage::Keyed(vec![(variant.to_owned(), inner)]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeSeq { elements: Vec::with_capacity(len.unwrap_or(0)) })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(self, _name: &'static str, _index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant { variant, elements: Vec::with_capacity(len) })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap { entries: Vec::with_capacity(len.unwrap_or(0)), key: None })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeStruct { fields: Vec::with_capacity(len), file: name == file::TOKEN })
    }

    fn serialize_struct_variant(self, _name: &'static str, _index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant { variant, fields: Vec::with_capacity(len) })
    }

}

pub struct SerializeSeq {
    elements: Vec<Storage>,
}

impl ser::SerializeSeq for SerializeSeq {
    type Ok = Storage;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let element = value.serialize(Serializer).map_err(|e| e.at(&self.elements.len().to_string()))?;
        self.elements.push(element);
        Ok(())
    }

    fn end(self) -> Result<Storage> {
        Ok(Storage::Indexed(self.elements))
    }

}

impl ser::SerializeTuple for SerializeSeq {
    type Ok = Storage;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Storage> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeSeq {
    type Ok = Storage;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Storage> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    elements: Vec<Storage>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Storage;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let element = value.serialize(Serializer)
            .map_err(|e| e.at(&self.elements.len().to_string()).at(self.variant))?;
        self.elements.push(element);
        Ok(())
    }

    fn end(self) -> Result<Storage> {
        Ok(Storage::Keyed(vec![(self.variant.to_owned(), Storage::Indexed(self.elements))]))
    }
}

pub struct SerializeMap {
    entries: Vec<(String, Storage)>,
    key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Storage;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = match key.serialize(Serializer)? {
            Storage::Leaf(leaf) => Some(leaf.into_text().ok_or(Error::KeyType)?),
            _ => return Err(Error::KeyType),
        };
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = match self.key.take() {
            Some(key) => key,
            None => return Err(Error::Message("serialize_value called before serialize_key".to_owned())),
        };
        let entry = value.serialize(Serializer).map_err(|e| e.at(&key))?;
        self.entries.push((key, entry));
        Ok(())
    }

    fn end(self) -> Result<Storage> {
        Ok(Storage::Keyed(self.entries))
    }

}

pub struct SerializeStruct {
    fields: Vec<(String, Storage)>,
    file: bool,
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Storage;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let field = value.serialize(Serializer).map_err(|e| e.at(key))?;
        self.fields.push((key.to_owned(), field));
        Ok(())
    }

    fn end(self) -> Result<Storage> {
        if self.file {
            file::into_leaf(self.fields)
        } else {
            Ok(Storage::Keyed(self.fields))
        }
    }

}

pub struct SerializeStructVariant {
    variant: &'static str,
    fields: Vec<(String, Storage)>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Storage;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let field = value.serialize(Serializer).map_err(|e| e.at(key).at(self.variant))?;
        self.fields.push((key.to_owned(), field));
        Ok(())
    }

    fn end(self) -> Result<Storage> {
        Ok(Storage::Keyed(vec![(self.variant.to_owned(), Storage::Keyed(self.fields))]))
    }

}
