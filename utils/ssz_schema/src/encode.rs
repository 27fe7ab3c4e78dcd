use ethereum_types::U256;

use crate::error::{EncodeError, EncodeErrorKind};
use crate::schema::{bits_to_bytes, Schema, Shape};
use crate::utils::encode_items_from_parts;
use crate::value::Value;

pub fn serialize(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    encode_container(value, schema).map_err(|error| error.within_field(schema.name()))
}

/// Runs every check [`serialize`] performs without producing any bytes.
pub fn validate(value: &Value, schema: &Schema) -> Result<(), EncodeError> {
    validate_container(value, schema).map_err(|error| error.within_field(schema.name()))
}

fn mismatch(shape: &Shape, value: &Value) -> EncodeError {
    EncodeErrorKind::TypeMismatch {
        expected: shape.to_string(),
        found: value.kind(),
    }
    .into()
}

fn container_fields<'v>(value: &'v Value, schema: &Schema) -> Result<&'v [Value], EncodeError> {
    let fields = match value {
        Value::Container(fields) => fields,
        _ => {
            return Err(EncodeErrorKind::TypeMismatch {
                expected: schema.name().to_owned(),
                found: value.kind(),
            }
            .into())
        }
    };

    if fields.len() != schema.fields().len() {
        return Err(EncodeErrorKind::FieldCountMismatch {
            container: schema.name().to_owned(),
            count: fields.len(),
            expected: schema.fields().len(),
        }
        .into());
    }

    Ok(fields)
}

fn check_exact_len(count: usize, expected: usize) -> Result<(), EncodeError> {
    if count == expected {
        Ok(())
    } else {
        Err(EncodeErrorKind::LengthMismatch { count, expected }.into())
    }
}

fn check_max_len(count: usize, max: usize) -> Result<(), EncodeError> {
    if count <= max {
        Ok(())
    } else {
        Err(EncodeErrorKind::TooManyElements { count, max }.into())
    }
}

fn check_uint(value: u64, width: usize) -> Result<(), EncodeError> {
    if width >= 8 || value >> (width * 8) == 0 {
        Ok(())
    } else {
        Err(EncodeErrorKind::UintOutOfRange {
            value: value.to_string(),
            width,
        }
        .into())
    }
}

fn check_big_uint(value: &U256, width: usize) -> Result<(), EncodeError> {
    if value.bits() <= width * 8 {
        Ok(())
    } else {
        Err(EncodeErrorKind::UintOutOfRange {
            value: value.to_string(),
            width,
        }
        .into())
    }
}

fn validate_container(value: &Value, schema: &Schema) -> Result<(), EncodeError> {
    let fields = container_fields(value, schema)?;

    for (field, value) in schema.fields().iter().zip(fields) {
        validate_shape(value, &field.shape).map_err(|error| error.within_field(&field.name))?;
    }

    Ok(())
}

fn validate_elements(elements: &[Value], shape: &Shape) -> Result<(), EncodeError> {
    for (index, element) in elements.iter().enumerate() {
        validate_shape(element, shape).map_err(|error| error.within_index(index))?;
    }
    Ok(())
}

pub(crate) fn validate_shape(value: &Value, shape: &Shape) -> Result<(), EncodeError> {
    match (shape, value) {
        (Shape::Boolean, Value::Bool(_)) => Ok(()),
        (Shape::Uint(width), Value::Uint(value)) if *width <= 8 => check_uint(*value, *width),
        (Shape::Uint(width), Value::BigUint(value)) if *width > 8 => {
            check_big_uint(value, *width)
        }
        (Shape::ByteVector(length), Value::Bytes(bytes)) => check_exact_len(bytes.len(), *length),
        (Shape::ByteList(max), Value::Bytes(bytes)) => check_max_len(bytes.len(), *max),
        (Shape::Bitvector(length), Value::Bits(bits)) => check_exact_len(bits.len(), *length),
        (Shape::Bitlist(max), Value::Bits(bits)) => check_max_len(bits.len(), *max),
        (Shape::Vector(element, length), Value::Sequence(elements)) => {
            check_exact_len(elements.len(), *length)?;
            validate_elements(elements, element)
        }
        (Shape::List(element, max), Value::Sequence(elements)) => {
            check_max_len(elements.len(), *max)?;
            validate_elements(elements, element)
        }
        (Shape::Container(schema), value) => validate_container(value, schema),
        (shape, value) => Err(mismatch(shape, value)),
    }
}

fn encode_container(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let fields = container_fields(value, schema)?;

    let mut fixed_parts = Vec::with_capacity(fields.len());
    let mut variable_parts = vec![];

    for (field, value) in schema.fields().iter().zip(fields) {
        let bytes =
            encode_shape(value, &field.shape).map_err(|error| error.within_field(&field.name))?;

        if field.shape.is_fixed_len() {
            fixed_parts.push(Some(bytes));
        } else {
            fixed_parts.push(None);
            variable_parts.push(bytes);
        }
    }

    encode_items_from_parts(&fixed_parts, &variable_parts)
}

fn encode_elements(elements: &[Value], shape: &Shape) -> Result<Vec<u8>, EncodeError> {
    let mut encoded = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        encoded.push(encode_shape(element, shape).map_err(|error| error.within_index(index))?);
    }

    if shape.is_fixed_len() {
        Ok(encoded.concat())
    } else {
        let fixed_parts = vec![None; encoded.len()];
        encode_items_from_parts(&fixed_parts, &encoded)
    }
}

pub(crate) fn encode_shape(value: &Value, shape: &Shape) -> Result<Vec<u8>, EncodeError> {
    match (shape, value) {
        (Shape::Boolean, Value::Bool(value)) => Ok(vec![u8::from(*value)]),
        (Shape::Uint(width), Value::Uint(value)) if *width <= 8 => {
            check_uint(*value, *width)?;
            Ok(value.to_le_bytes()[..*width].to_vec())
        }
        (Shape::Uint(width), Value::BigUint(value)) if *width > 8 => {
            check_big_uint(value, *width)?;
            let mut bytes = [0; 32];
            value.to_little_endian(&mut bytes);
            Ok(bytes[..*width].to_vec())
        }
        (Shape::ByteVector(length), Value::Bytes(bytes)) => {
            check_exact_len(bytes.len(), *length)?;
            Ok(bytes.clone())
        }
        (Shape::ByteList(max), Value::Bytes(bytes)) => {
            check_max_len(bytes.len(), *max)?;
            Ok(bytes.clone())
        }
        (Shape::Bitvector(length), Value::Bits(bits)) => {
            check_exact_len(bits.len(), *length)?;
            Ok(pack_bits(bits, false))
        }
        (Shape::Bitlist(max), Value::Bits(bits)) => {
            check_max_len(bits.len(), *max)?;
            Ok(pack_bits(bits, true))
        }
        (Shape::Vector(element, length), Value::Sequence(elements)) => {
            check_exact_len(elements.len(), *length)?;
            encode_elements(elements, element)
        }
        (Shape::List(element, max), Value::Sequence(elements)) => {
            check_max_len(elements.len(), *max)?;
            encode_elements(elements, element)
        }
        (Shape::Container(schema), value) => encode_container(value, schema),
        (shape, value) => Err(mismatch(shape, value)),
    }
}

/// Packs bits least significant first. A bitlist also gets a delimiter bit after the last bit.
pub(crate) fn pack_bits(bits: &[bool], with_delimiter: bool) -> Vec<u8> {
    let bit_len = if with_delimiter {
        bits.len() + 1
    } else {
        bits.len()
    };

    let mut bytes = vec![0; bits_to_bytes(bit_len)];
    for (index, bit) in bits.iter().enumerate() {
        if *bit {
            bytes[index / 8] |= 1 << (index % 8);
        }
    }
    if with_delimiter {
        bytes[bits.len() / 8] |= 1 << (bits.len() % 8);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::schema::Field;

    use super::*;

    fn single_field(shape: Shape) -> Schema {
        Schema::new("Test", vec![Field::new("field", shape)]).expect("Test")
    }

    fn encode_single(shape: Shape, value: Value) -> Result<Vec<u8>, EncodeError> {
        serialize(&Value::Container(vec![value]), &single_field(shape))
    }

    #[test]
    fn uints() {
        assert_eq!(encode_single(Shape::Uint(1), Value::Uint(1)), Ok(vec![1]));
        assert_eq!(
            encode_single(Shape::Uint(2), Value::Uint(0x0102)),
            Ok(vec![2, 1])
        );
        assert_eq!(
            encode_single(Shape::Uint(8), Value::Uint(u64::max_value())),
            Ok(vec![255; 8])
        );
        assert_eq!(
            encode_single(Shape::Uint(32), Value::BigUint(U256::from(1))),
            Ok([vec![1], vec![0; 31]].concat())
        );
    }

    #[test]
    fn uint_out_of_range() {
        let error = encode_single(Shape::Uint(1), Value::Uint(256)).expect_err("Test");
        assert_eq!(
            error.kind,
            EncodeErrorKind::UintOutOfRange {
                value: "256".to_owned(),
                width: 1,
            }
        );
        assert_eq!(error.path.to_string(), "Test.field");

        let big = U256::one() << 128;
        assert!(encode_single(Shape::Uint(16), Value::BigUint(big)).is_err());
    }

    #[test]
    fn bitvector() {
        assert_eq!(
            encode_single(Shape::Bitvector(4), Value::Bits(vec![true, false, false, true])),
            Ok(vec![0b0000_1001])
        );
        assert_eq!(
            encode_single(Shape::Bitvector(9), Value::Bits(vec![true; 9])),
            Ok(vec![0xff, 0x01])
        );
    }

    #[test]
    fn bitlist() {
        assert_eq!(
            encode_single(Shape::Bitlist(4), Value::Bits(vec![true, false, true])),
            Ok(vec![4, 0, 0, 0, 0b0000_1101])
        );
        assert_eq!(
            encode_single(Shape::Bitlist(16), Value::Bits(vec![])),
            Ok(vec![4, 0, 0, 0, 0b0000_0001])
        );
        assert_eq!(
            encode_single(Shape::Bitlist(16), Value::Bits(vec![false; 8])),
            Ok(vec![4, 0, 0, 0, 0, 1])
        );
    }

    #[test]
    fn list_over_capacity() {
        let error = encode_single(
            Shape::list(Shape::Uint(2), 2),
            Value::Sequence(vec![Value::Uint(1), Value::Uint(2), Value::Uint(3)]),
        )
        .expect_err("Test");
        assert_eq!(
            error.kind,
            EncodeErrorKind::TooManyElements { count: 3, max: 2 }
        );

        assert!(encode_single(Shape::Bitlist(4), Value::Bits(vec![true; 5])).is_err());
        assert!(encode_single(Shape::ByteList(4), Value::Bytes(vec![0; 5])).is_err());
    }

    #[test]
    fn vector_length_mismatch() {
        assert_eq!(
            encode_single(Shape::ByteVector(4), Value::Bytes(vec![0; 3]))
                .map_err(|error| error.kind),
            Err(EncodeErrorKind::LengthMismatch {
                count: 3,
                expected: 4,
            })
        );
        assert!(encode_single(Shape::Bitvector(4), Value::Bits(vec![true; 5])).is_err());
    }

    #[test]
    fn type_mismatch() {
        assert_eq!(
            encode_single(Shape::Boolean, Value::Uint(1)).map_err(|error| error.kind),
            Err(EncodeErrorKind::TypeMismatch {
                expected: "boolean".to_owned(),
                found: "integer",
            })
        );
        assert!(encode_single(Shape::Uint(32), Value::Uint(1)).is_err());
        assert!(serialize(&Value::Container(vec![]), &single_field(Shape::Boolean)).is_err());
    }

    #[test]
    fn list_of_variable_elements() {
        let shape = Shape::list(Shape::ByteList(8), 4);
        let value = Value::Sequence(vec![
            Value::Bytes(vec![1, 2]),
            Value::Bytes(vec![]),
            Value::Bytes(vec![3]),
        ]);

        assert_eq!(
            encode_shape(&value, &shape),
            Ok(vec![12, 0, 0, 0, 14, 0, 0, 0, 14, 0, 0, 0, 1, 2, 3])
        );
    }

    #[test]
    fn error_path_through_nested_containers() {
        let inner = Arc::new(single_field(Shape::list(Shape::Bitlist(2), 4)));
        let outer = Schema::new(
            "Outer",
            vec![Field::new("inner", Shape::Container(inner))],
        )
        .expect("Test");
        let value = Value::Container(vec![Value::Container(vec![Value::Sequence(vec![
            Value::Bits(vec![]),
            Value::Bits(vec![true; 3]),
        ])])]);

        let error = serialize(&value, &outer).expect_err("Test");
        assert_eq!(error.path.to_string(), "Outer.inner.field[1]");
        assert_eq!(validate(&value, &outer), Err(error));
    }
}
