use ethereum_types::U256;

use crate::schema::{Schema, Shape};

/// A dynamically typed value interpreted through a [`Schema`].
///
/// Integers of up to 8 bytes are held in `Uint`. `uint128` and `uint256` are held in `BigUint`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    Uint(u64),
    BigUint(U256),
    Bytes(Vec<u8>),
    Bits(Vec<bool>),
    Sequence(Vec<Value>),
    Container(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Uint(_) => "integer",
            Value::BigUint(_) => "big integer",
            Value::Bytes(_) => "bytes",
            Value::Bits(_) => "bits",
            Value::Sequence(_) => "sequence",
            Value::Container(_) => "container",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_bits(&self) -> Option<&[bool]> {
        match self {
            Value::Bits(bits) => Some(bits),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    /// Looks up a container field by name.
    pub fn field(&self, schema: &Schema, name: &str) -> Option<&Value> {
        match self {
            Value::Container(fields) => fields.get(schema.field_index(name)?),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, schema: &Schema, name: &str) -> Option<&mut Value> {
        match self {
            Value::Container(fields) => fields.get_mut(schema.field_index(name)?),
            _ => None,
        }
    }
}

impl Shape {
    /// The all-zero value of the shape: empty lists, zeroed vectors, `false`.
    pub fn default_value(&self) -> Value {
        match self {
            Shape::Boolean => Value::Bool(false),
            Shape::Uint(width) if *width <= 8 => Value::Uint(0),
            Shape::Uint(_) => Value::BigUint(U256::zero()),
            Shape::ByteVector(length) => Value::Bytes(vec![0; *length]),
            Shape::ByteList(_) => Value::Bytes(vec![]),
            Shape::Bitvector(length) => Value::Bits(vec![false; *length]),
            Shape::Bitlist(_) => Value::Bits(vec![]),
            Shape::Vector(element, length) => Value::Sequence(vec![element.default_value(); *length]),
            Shape::List(..) => Value::Sequence(vec![]),
            Shape::Container(schema) => schema.default_value(),
        }
    }
}

impl Schema {
    pub fn default_value(&self) -> Value {
        Value::Container(
            self.fields()
                .iter()
                .map(|field| field.shape.default_value())
                .collect(),
        )
    }
}
