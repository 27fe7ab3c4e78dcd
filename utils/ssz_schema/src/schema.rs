use core::fmt::{Display, Formatter, Result as FmtResult};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::{BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET};

pub const UINT_WIDTHS: [usize; 6] = [1, 2, 4, 8, 16, 32];

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Shape {
    Boolean,
    /// Little-endian unsigned integer of the given width in bytes.
    Uint(usize),
    ByteVector(usize),
    ByteList(usize),
    Bitvector(usize),
    Bitlist(usize),
    Vector(Box<Shape>, usize),
    List(Box<Shape>, usize),
    Container(Arc<Schema>),
}

impl Shape {
    pub fn vector(element: Shape, length: usize) -> Self {
        Shape::Vector(Box::new(element), length)
    }

    pub fn list(element: Shape, max_length: usize) -> Self {
        Shape::List(Box::new(element), max_length)
    }

    pub fn is_fixed_len(&self) -> bool {
        match self {
            Shape::Boolean | Shape::Uint(_) | Shape::ByteVector(_) | Shape::Bitvector(_) => true,
            Shape::ByteList(_) | Shape::Bitlist(_) | Shape::List(..) => false,
            Shape::Vector(element, _) => element.is_fixed_len(),
            Shape::Container(schema) => schema.is_fixed_len(),
        }
    }

    /// Number of bytes the shape occupies in the fixed part of its parent.
    pub fn fixed_len(&self) -> usize {
        if !self.is_fixed_len() {
            return BYTES_PER_LENGTH_OFFSET;
        }

        match self {
            Shape::Boolean => 1,
            Shape::Uint(width) => *width,
            Shape::ByteVector(length) => *length,
            Shape::Bitvector(length) => bits_to_bytes(*length),
            Shape::Vector(element, length) => element.fixed_len().saturating_mul(*length),
            Shape::Container(schema) => schema.fixed_part_len(),
            Shape::ByteList(_) | Shape::Bitlist(_) | Shape::List(..) => BYTES_PER_LENGTH_OFFSET,
        }
    }

    /// Basic values are packed together into chunks when they are elements of a sequence.
    pub fn is_basic(&self) -> bool {
        matches!(self, Shape::Boolean | Shape::Uint(_))
    }

    fn check(&self, container: &str, field: &str) -> Result<(), SchemaError> {
        let zero_length = || SchemaError::ZeroLength {
            container: container.to_owned(),
            field: field.to_owned(),
            shape: self.to_string(),
        };

        match self {
            Shape::Uint(width) if !UINT_WIDTHS.contains(width) => {
                return Err(SchemaError::InvalidUintWidth {
                    container: container.to_owned(),
                    field: field.to_owned(),
                    width: *width,
                })
            }
            Shape::ByteVector(0) | Shape::Bitvector(0) | Shape::Vector(_, 0) => {
                return Err(zero_length())
            }
            Shape::Vector(element, _) | Shape::List(element, _) => {
                element.check(container, field)?
            }
            _ => {}
        }

        if self.checked_fixed_len().is_none() || self.checked_chunk_limit().is_none() {
            return Err(SchemaError::BoundNotRepresentable {
                container: container.to_owned(),
                field: field.to_owned(),
                shape: self.to_string(),
            });
        }

        Ok(())
    }

    fn checked_fixed_len(&self) -> Option<usize> {
        match self {
            Shape::Vector(element, length) if element.is_fixed_len() => {
                element.checked_fixed_len()?.checked_mul(*length)
            }
            Shape::Vector(element, _) | Shape::List(element, _) => {
                element.checked_fixed_len().map(|_| BYTES_PER_LENGTH_OFFSET)
            }
            _ => Some(self.fixed_len()),
        }
    }

    fn checked_chunk_limit(&self) -> Option<usize> {
        match self {
            Shape::ByteList(max) => max.checked_add(BYTES_PER_CHUNK - 1),
            Shape::Bitlist(max) => max.checked_add(BITS_PER_CHUNK - 1),
            Shape::List(element, max) if element.is_basic() => max
                .checked_mul(element.fixed_len())?
                .checked_add(BYTES_PER_CHUNK - 1),
            _ => Some(0),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        match self {
            Shape::Boolean => write!(formatter, "boolean"),
            Shape::Uint(width) => write!(formatter, "uint{}", width * 8),
            Shape::ByteVector(length) => write!(formatter, "ByteVector[{}]", length),
            Shape::ByteList(max) => write!(formatter, "ByteList[{}]", max),
            Shape::Bitvector(length) => write!(formatter, "Bitvector[{}]", length),
            Shape::Bitlist(max) => write!(formatter, "Bitlist[{}]", max),
            Shape::Vector(element, length) => write!(formatter, "Vector[{}, {}]", element, length),
            Shape::List(element, max) => write!(formatter, "List[{}, {}]", element, max),
            Shape::Container(schema) => write!(formatter, "{}", schema.name()),
        }
    }
}

pub(crate) const BITS_PER_CHUNK: usize = BYTES_PER_CHUNK * 8;

pub(crate) fn bits_to_bytes(bit_len: usize) -> usize {
    (bit_len + 7) / 8
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// A fully resolved container type. Immutable once built.
#[derive(PartialEq, Eq, Debug)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    fixed_part_len: usize,
    is_fixed_len: bool,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Result<Self, SchemaError> {
        let name = name.into();

        if fields.is_empty() {
            return Err(SchemaError::EmptyContainer { container: name });
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    container: name,
                    field: field.name.clone(),
                });
            }
            field.shape.check(&name, &field.name)?;
        }

        let fixed_part_len = fields
            .iter()
            .try_fold(0_usize, |sum, field| sum.checked_add(field.shape.fixed_len()))
            .ok_or_else(|| SchemaError::BoundNotRepresentable {
                container: name.clone(),
                field: fields[fields.len() - 1].name.clone(),
                shape: name.clone(),
            })?;
        let is_fixed_len = fields.iter().all(|field| field.shape.is_fixed_len());

        Ok(Self {
            name,
            fields,
            fixed_part_len,
            is_fixed_len,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn is_fixed_len(&self) -> bool {
        self.is_fixed_len
    }

    /// Length of the fixed part: fixed fields in place plus one offset per variable field.
    pub fn fixed_part_len(&self) -> usize {
        self.fixed_part_len
    }
}
