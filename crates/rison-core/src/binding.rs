//! Binding between Rison and Rust types via serde.
//!
//! Decoding goes Rison → `Value` → `T` with `serde_json::from_value`, so field
//! names, renames and defaults follow the usual `#[serde(...)]` attributes.
//!
//! Encoding goes `T` → `Value` → Rison. The first step uses a serializer that
//! tracks where it is in the value (`.field`, `[index]`), so values with no
//! Rison representation are reported with their path:
//!
//! - map keys that are not strings, chars, integers or unit variants
//! - NaN and infinite floats
//!
//! # Example
//! ```
//! use rison_core::{from_str, to_string, Mode};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Query {
//!     q: String,
//!     page: u32,
//!     tags: Vec<String>,
//! }
//!
//! let query = Query { q: "red shoes".into(), page: 2, tags: vec!["sale".into()] };
//! let rison = to_string(&query, Mode::ObjectOnly).unwrap();
//! assert_eq!(rison, "page:2,q:'red shoes',tags:!(sale)");
//!
//! let back: Query = from_str(&rison, Mode::ObjectOnly).unwrap();
//! assert_eq!(back, query);
//! ```

use serde::de::DeserializeOwned;
use serde::ser::{self, Impossible, Serialize};
use serde_json::{Map, Number, Value};

use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{EncodeError, Error, Result};
use crate::types::Mode;

/// Decode Rison bytes and bind the result into `T`.
pub fn from_slice<T: DeserializeOwned>(rison: &[u8], mode: Mode) -> Result<T> {
    let value = decode(rison, mode)?;
    serde_json::from_value(value).map_err(Error::Bind)
}

/// Decode a Rison string and bind the result into `T`.
pub fn from_str<T: DeserializeOwned>(rison: &str, mode: Mode) -> Result<T> {
    from_slice(rison.as_bytes(), mode)
}

/// Serialize `value` to Rison.
pub fn to_string<T: Serialize + ?Sized>(value: &T, mode: Mode) -> Result<String> {
    let tree = to_value(value)?;
    Ok(encode(&tree, mode)?)
}

/// Serialize `value` to Rison bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T, mode: Mode) -> Result<Vec<u8>> {
    to_string(value, mode).map(String::into_bytes)
}

/// Convert any `Serialize` type into a value tree.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> std::result::Result<Value, EncodeError> {
    value.serialize(ValueSerializer { path: String::new() })
}

/// Render a path the way errors print it; the root is `.`.
fn display_path(path: &str) -> String {
    if path.is_empty() {
        ".".to_string()
    } else {
        path.to_string()
    }
}

fn member_path(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// Serializer producing a `Value`, remembering its position for errors.
struct ValueSerializer {
    path: String,
}

impl ValueSerializer {
    fn unsupported(&self, kind: impl Into<String>) -> EncodeError {
        EncodeError::Unsupported {
            path: display_path(&self.path),
            kind: kind.into(),
        }
    }

    fn float(&self, f: f64, kind: &str) -> std::result::Result<Value, EncodeError> {
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.unsupported(format!("{kind} ({f})")))
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = EncodeError;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = VariantSerializer<SeqSerializer>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = VariantSerializer<MapSerializer>;

    fn serialize_bool(self, v: bool) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> std::result::Result<Value, EncodeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> std::result::Result<Value, EncodeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> std::result::Result<Value, EncodeError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i128(self, v: i128) -> std::result::Result<Value, EncodeError> {
        if let Ok(i) = i64::try_from(v) {
            Ok(Value::Number(i.into()))
        } else if let Ok(u) = u64::try_from(v) {
            Ok(Value::Number(u.into()))
        } else {
            Err(self.unsupported(format!("i128 ({v})")))
        }
    }

    fn serialize_u8(self, v: u8) -> std::result::Result<Value, EncodeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> std::result::Result<Value, EncodeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> std::result::Result<Value, EncodeError> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u128(self, v: u128) -> std::result::Result<Value, EncodeError> {
        match u64::try_from(v) {
            Ok(u) => Ok(Value::Number(u.into())),
            Err(_) => Err(self.unsupported(format!("u128 ({v})"))),
        }
    }

    fn serialize_f32(self, v: f32) -> std::result::Result<Value, EncodeError> {
        self.float(f64::from(v), "f32")
    }

    fn serialize_f64(self, v: f64) -> std::result::Result<Value, EncodeError> {
        self.float(v, "f64")
    }

    fn serialize_char(self, v: char) -> std::result::Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> std::result::Result<Value, EncodeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Array(
            v.iter().map(|b| Value::Number((*b).into())).collect(),
        ))
    }

    fn serialize_none(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> std::result::Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> std::result::Result<Value, EncodeError> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> std::result::Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> std::result::Result<Value, EncodeError> {
        let inner = value.serialize(ValueSerializer {
            path: member_path(&self.path, variant),
        })?;
        let mut map = Map::new();
        map.insert(variant.to_string(), inner);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> std::result::Result<SeqSerializer, EncodeError> {
        Ok(SeqSerializer {
            path: self.path,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> std::result::Result<SeqSerializer, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> std::result::Result<SeqSerializer, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> std::result::Result<Self::SerializeTupleVariant, EncodeError> {
        Ok(VariantSerializer {
            variant,
            inner: SeqSerializer {
                path: member_path(&self.path, variant),
                items: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> std::result::Result<MapSerializer, EncodeError> {
        Ok(MapSerializer {
            path: self.path,
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> std::result::Result<MapSerializer, EncodeError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self::SerializeStructVariant, EncodeError> {
        Ok(VariantSerializer {
            variant,
            inner: MapSerializer {
                path: member_path(&self.path, variant),
                map: Map::new(),
                next_key: None,
            },
        })
    }
}

struct SeqSerializer {
    path: String,
    items: Vec<Value>,
}

impl SeqSerializer {
    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> std::result::Result<(), EncodeError> {
        let item = value.serialize(ValueSerializer {
            path: index_path(&self.path, self.items.len()),
        })?;
        self.items.push(item);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.push(value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.push(value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.push(value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Array(self.items))
    }
}

struct MapSerializer {
    path: String,
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl MapSerializer {
    fn insert<T: Serialize + ?Sized>(
        &mut self,
        key: String,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        let value = value.serialize(ValueSerializer {
            path: member_path(&self.path, &key),
        })?;
        self.map.insert(key, value);
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(
        &mut self,
        key: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.next_key = Some(key.serialize(KeySerializer { path: &self.path })?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        let key = self.next_key.take().ok_or_else(|| {
            EncodeError::Internal("serialize_value called before serialize_key".to_string())
        })?;
        self.insert(key, value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Value::Object(self.map))
    }
}

/// Wraps the body of an enum variant as `{variant: body}`.
struct VariantSerializer<S> {
    variant: &'static str,
    inner: S,
}

impl<S> VariantSerializer<S> {
    fn wrap(variant: &'static str, body: Value) -> Value {
        let mut map = Map::new();
        map.insert(variant.to_string(), body);
        Value::Object(map)
    }
}

impl ser::SerializeTupleVariant for VariantSerializer<SeqSerializer> {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.inner.push(value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Self::wrap(self.variant, Value::Array(self.inner.items)))
    }
}

impl ser::SerializeStructVariant for VariantSerializer<MapSerializer> {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> std::result::Result<(), EncodeError> {
        self.inner.insert(key.to_string(), value)
    }

    fn end(self) -> std::result::Result<Value, EncodeError> {
        Ok(Self::wrap(self.variant, Value::Object(self.inner.map)))
    }
}

/// Serializer for map keys: only string-like keys are accepted.
struct KeySerializer<'a> {
    path: &'a str,
}

impl KeySerializer<'_> {
    fn invalid(&self, key: impl Into<String>) -> EncodeError {
        EncodeError::InvalidKey {
            path: display_path(self.path),
            key: key.into(),
        }
    }
}

impl ser::Serializer for KeySerializer<'_> {
    type Ok = String;
    type Error = EncodeError;

    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    fn serialize_bool(self, v: bool) -> std::result::Result<String, EncodeError> {
        Err(self.invalid(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> std::result::Result<String, EncodeError> {
        Err(self.invalid(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> std::result::Result<String, EncodeError> {
        Err(self.invalid(v.to_string()))
    }

    fn serialize_char(self, v: char) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> std::result::Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> std::result::Result<String, EncodeError> {
        Err(self.invalid("bytes"))
    }

    fn serialize_none(self) -> std::result::Result<String, EncodeError> {
        Err(self.invalid("none"))
    }

    fn serialize_some<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> std::result::Result<String, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> std::result::Result<String, EncodeError> {
        Err(self.invalid("()"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> std::result::Result<String, EncodeError> {
        Err(self.invalid(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> std::result::Result<String, EncodeError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> std::result::Result<String, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        _value: &T,
    ) -> std::result::Result<String, EncodeError> {
        Err(self.invalid(format!("{name}::{variant}")))
    }

    fn serialize_seq(
        self,
        _len: Option<usize>,
    ) -> std::result::Result<Self::SerializeSeq, EncodeError> {
        Err(self.invalid("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> std::result::Result<Self::SerializeTuple, EncodeError> {
        Err(self.invalid("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self::SerializeTupleStruct, EncodeError> {
        Err(self.invalid(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self::SerializeTupleVariant, EncodeError> {
        Err(self.invalid(format!("{name}::{variant}")))
    }

    fn serialize_map(
        self,
        _len: Option<usize>,
    ) -> std::result::Result<Self::SerializeMap, EncodeError> {
        Err(self.invalid("map"))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self::SerializeStruct, EncodeError> {
        Err(self.invalid(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self::SerializeStructVariant, EncodeError> {
        Err(self.invalid(format!("{name}::{variant}")))
    }
}
