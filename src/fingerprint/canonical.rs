//! Canonical JSON text for fingerprinting.
//!
//! Same output as `serde_json` for ordinary data (object keys sorted, no
//! whitespace), except that non-finite floats are written as the bare tokens
//! `NaN`, `Infinity` and `-Infinity` instead of collapsing into `null`.
//! The output is only meant to be hashed; it is not valid strict JSON when
//! those tokens appear.

use std::collections::BTreeMap;

use serde::ser::{self, Error as _, Serialize};
use serde_json::Error;

/// Render `value` as canonical JSON text.
pub(super) fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    let node = value.serialize(CanonicalSerializer)?;
    let mut out = String::new();
    node.render(&mut out)?;
    Ok(out)
}

// =============================================================================
// Canonical tree
// =============================================================================

enum Node {
    /// Already rendered scalar token.
    Token(String),
    Seq(Vec<Node>),
    /// Keys are unescaped; `BTreeMap` keeps them sorted.
    Map(BTreeMap<String, Node>),
}

impl Node {
    fn render(&self, out: &mut String) -> Result<(), Error> {
        match self {
            Node::Token(token) => out.push_str(token),
            Node::Seq(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.render(out)?;
                }
                out.push(']');
            }
            Node::Map(entries) => {
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&serde_json::to_string(key)?);
                    out.push(':');
                    item.render(out)?;
                }
                out.push('}');
            }
        }
        Ok(())
    }

    /// Externally tagged enum variant, as `serde_json` writes it.
    fn tagged(variant: Option<&'static str>, inner: Node) -> Node {
        match variant {
            Some(name) => Node::Map(BTreeMap::from([(name.to_owned(), inner)])),
            None => inner,
        }
    }
}

fn float_token(value: f64) -> Result<String, Error> {
    Ok(if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "Infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else {
        serde_json::to_string(&value)?
    })
}

/// Object keys must be strings; integer keys are stringified like `serde_json` does.
fn key_string(node: Node) -> Result<String, Error> {
    match node {
        Node::Token(token) if token.starts_with('"') => serde_json::from_str(&token),
        Node::Token(token) if token.parse::<i128>().is_ok() || token.parse::<u128>().is_ok() => {
            Ok(token)
        }
        _ => Err(Error::custom("key must be a string")),
    }
}

// =============================================================================
// Serializer
// =============================================================================

struct CanonicalSerializer;

impl ser::Serializer for CanonicalSerializer {
    type Ok = Node;
    type Error = Error;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = MapBuilder;

    fn serialize_bool(self, v: bool) -> Result<Node, Error> {
        Ok(Node::Token(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Node, Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Node, Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Node, Error> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Node, Error> {
        Ok(Node::Token(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Node, Error> {
        Ok(Node::Token(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Node, Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Node, Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Node, Error> {
        self.serialize_u64(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Node, Error> {
        Ok(Node::Token(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Node, Error> {
        Ok(Node::Token(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Node, Error> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<Node, Error> {
        float_token(v).map(Node::Token)
    }

    fn serialize_char(self, v: char) -> Result<Node, Error> {
        self.serialize_str(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<Node, Error> {
        serde_json::to_string(v).map(Node::Token)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node, Error> {
        Ok(Node::Seq(v.iter().map(|b| Node::Token(b.to_string())).collect()))
    }

    fn serialize_none(self) -> Result<Node, Error> {
        self.serialize_unit()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Node, Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node, Error> {
        Ok(Node::Token("null".to_owned()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node, Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Node, Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Node, Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node, Error> {
        Ok(Node::tagged(Some(variant), value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, Error> {
        Ok(SeqBuilder::new(None, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, Error> {
        Ok(SeqBuilder::new(None, Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder, Error> {
        Ok(SeqBuilder::new(None, Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, Error> {
        Ok(SeqBuilder::new(Some(variant), Some(len)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder, Error> {
        Ok(MapBuilder::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapBuilder, Error> {
        Ok(MapBuilder::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<MapBuilder, Error> {
        Ok(MapBuilder::new(Some(variant)))
    }
}

// =============================================================================
// Compound builders
// =============================================================================

struct SeqBuilder {
    variant: Option<&'static str>,
    items: Vec<Node>,
}

impl SeqBuilder {
    fn new(variant: Option<&'static str>, len: Option<usize>) -> Self {
        Self {
            variant,
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(CanonicalSerializer)?);
        Ok(())
    }

    fn finish(self) -> Result<Node, Error> {
        Ok(Node::tagged(self.variant, Node::Seq(self.items)))
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

struct MapBuilder {
    variant: Option<&'static str>,
    entries: BTreeMap<String, Node>,
    next_key: Option<String>,
}

impl MapBuilder {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            variant,
            entries: BTreeMap::new(),
            next_key: None,
        }
    }

    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<(), Error> {
        self.entries.insert(key, value.serialize(CanonicalSerializer)?);
        Ok(())
    }

    fn finish(self) -> Result<Node, Error> {
        Ok(Node::tagged(self.variant, Node::Map(self.entries)))
    }
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        self.next_key = Some(key_string(key.serialize(CanonicalSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("map value without a key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Node, Error> {
        self.finish()
    }
}
