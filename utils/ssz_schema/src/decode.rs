use ethereum_types::U256;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::schema::{bits_to_bytes, Schema, Shape};
use crate::utils::{decode_variable_sized_items, Decoder};
use crate::value::Value;

/// Decodes untrusted bytes. Any structural violation rejects the whole input.
pub fn deserialize(bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    decode_container(bytes, schema).map_err(|error| error.within_field(schema.name()))
}

fn check_byte_len(bytes: &[u8], expected: usize) -> Result<(), DecodeError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(DecodeErrorKind::InvalidByteLength {
            len: bytes.len(),
            expected,
        }
        .into())
    }
}

fn decode_container(bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    if schema.is_fixed_len() {
        check_byte_len(bytes, schema.fixed_part_len())?;
    }

    let mut decoder = Decoder::new(bytes, schema.fixed_part_len())?;

    for field in schema.fields() {
        decoder
            .register(&field.shape)
            .map_err(|error| error.within_field(&field.name))?;
    }

    let mut values = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let value = decoder
            .next_bytes(&field.shape)
            .and_then(|field_bytes| decode_shape(field_bytes, &field.shape))
            .map_err(|error| error.within_field(&field.name))?;
        values.push(value);
    }

    Ok(Value::Container(values))
}

fn decode_elements<'a>(
    items: impl Iterator<Item = &'a [u8]>,
    shape: &Shape,
) -> Result<Value, DecodeError> {
    let mut elements = vec![];
    for (index, item) in items.enumerate() {
        elements.push(decode_shape(item, shape).map_err(|error| error.within_index(index))?);
    }
    Ok(Value::Sequence(elements))
}

fn decode_fixed_sized_items<'a>(
    bytes: &'a [u8],
    shape: &Shape,
    max_len: usize,
) -> Result<impl Iterator<Item = &'a [u8]>, DecodeError> {
    let element_len = shape.fixed_len();

    if bytes.len() % element_len != 0 {
        return Err(DecodeErrorKind::PartialElement {
            len: bytes.len(),
            element_len,
        }
        .into());
    }

    let count = bytes.len() / element_len;
    if count > max_len {
        return Err(DecodeErrorKind::TooManyElements {
            count,
            max: max_len,
        }
        .into());
    }

    Ok(bytes.chunks(element_len))
}

fn decode_shape(bytes: &[u8], shape: &Shape) -> Result<Value, DecodeError> {
    match shape {
        Shape::Boolean => {
            check_byte_len(bytes, 1)?;
            match bytes[0] {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                byte => Err(DecodeErrorKind::InvalidBool { byte }.into()),
            }
        }
        Shape::Uint(width) => {
            check_byte_len(bytes, *width)?;
            if *width <= 8 {
                let mut arr = [0; 8];
                arr[..*width].copy_from_slice(bytes);
                Ok(Value::Uint(u64::from_le_bytes(arr)))
            } else {
                Ok(Value::BigUint(U256::from_little_endian(bytes)))
            }
        }
        Shape::ByteVector(length) => {
            check_byte_len(bytes, *length)?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Shape::ByteList(max) => {
            if bytes.len() > *max {
                return Err(DecodeErrorKind::TooManyElements {
                    count: bytes.len(),
                    max: *max,
                }
                .into());
            }
            Ok(Value::Bytes(bytes.to_vec()))
        }
        Shape::Bitvector(length) => decode_bitvector(bytes, *length).map(Value::Bits),
        Shape::Bitlist(max) => decode_bitlist(bytes, *max).map(Value::Bits),
        Shape::Vector(element, length) if element.is_fixed_len() => {
            check_byte_len(bytes, shape.fixed_len())?;
            decode_elements(decode_fixed_sized_items(bytes, element, *length)?, element)
        }
        Shape::Vector(element, length) => {
            let items = decode_variable_sized_items(bytes, *length)?;
            if items.len() != *length {
                return Err(DecodeErrorKind::ElementCountMismatch {
                    count: items.len(),
                    expected: *length,
                }
                .into());
            }
            decode_elements(items.into_iter(), element)
        }
        Shape::List(element, max) if element.is_fixed_len() => {
            decode_elements(decode_fixed_sized_items(bytes, element, *max)?, element)
        }
        Shape::List(element, max) => {
            decode_elements(decode_variable_sized_items(bytes, *max)?.into_iter(), element)
        }
        Shape::Container(schema) => decode_container(bytes, schema),
    }
}

fn unpack_bits(bytes: &[u8], bit_len: usize) -> Vec<bool> {
    (0..bit_len)
        .map(|index| (bytes[index / 8] >> (index % 8)) & 1 == 1)
        .collect()
}

pub(crate) fn decode_bitvector(bytes: &[u8], length: usize) -> Result<Vec<bool>, DecodeError> {
    check_byte_len(bytes, bits_to_bytes(length))?;

    let used_bits = length % 8;
    if used_bits != 0 && bytes[bytes.len() - 1] >> used_bits != 0 {
        return Err(DecodeErrorKind::NonZeroPadding { len: length }.into());
    }

    Ok(unpack_bits(bytes, length))
}

/// The highest set bit of the last byte is the delimiter. Everything below it is data.
pub(crate) fn decode_bitlist(bytes: &[u8], max: usize) -> Result<Vec<bool>, DecodeError> {
    let last_byte = match bytes.last() {
        Some(byte) if *byte != 0 => *byte,
        _ => return Err(DecodeErrorKind::MissingBitlistDelimiter.into()),
    };

    let delimiter_index = 7 - last_byte.leading_zeros() as usize;
    let bit_len = (bytes.len() - 1) * 8 + delimiter_index;

    if bit_len > max {
        return Err(DecodeErrorKind::TooManyElements {
            count: bit_len,
            max,
        }
        .into());
    }

    Ok(unpack_bits(bytes, bit_len))
}
