//! Human-readable representation used by the beacon node API.
//!
//! Integers are decimal strings, byte strings are `0x`-prefixed hex, bitfields are the hex of
//! their SSZ encoding and containers are objects keyed by field name.

use ethereum_types::U256;
use serde_json::{Map, Value as Json};

use crate::decode::{decode_bitlist, decode_bitvector};
use crate::encode::{pack_bits, validate};
use crate::error::{EncodeError, EncodeErrorKind, JsonError, JsonErrorKind};
use crate::schema::{Schema, Shape};
use crate::value::Value;

pub fn to_json(value: &Value, schema: &Schema) -> Result<Json, EncodeError> {
    validate(value, schema)?;
    container_to_json(value, schema).map_err(|error| error.within_field(schema.name()))
}

pub fn from_json(json: &Json, schema: &Schema) -> Result<Value, JsonError> {
    let value =
        container_from_json(json, schema).map_err(|error| error.within_field(schema.name()))?;
    validate(&value, schema)?;
    Ok(value)
}

fn hex_string(bytes: &[u8]) -> Json {
    Json::String(format!("0x{}", hex::encode(bytes)))
}

fn container_to_json(value: &Value, schema: &Schema) -> Result<Json, EncodeError> {
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

    let mut object = Map::with_capacity(fields.len());
    for (field, value) in schema.fields().iter().zip(fields) {
        let json = shape_to_json(value, &field.shape)
            .map_err(|error| error.within_field(&field.name))?;
        object.insert(field.name.clone(), json);
    }
    Ok(Json::Object(object))
}

fn shape_to_json(value: &Value, shape: &Shape) -> Result<Json, EncodeError> {
    let json = match (shape, value) {
        (Shape::Boolean, Value::Bool(value)) => Json::Bool(*value),
        (Shape::Uint(_), Value::Uint(value)) => Json::String(value.to_string()),
        (Shape::Uint(_), Value::BigUint(value)) => Json::String(value.to_string()),
        (Shape::ByteVector(_), Value::Bytes(bytes)) | (Shape::ByteList(_), Value::Bytes(bytes)) => {
            hex_string(bytes)
        }
        (Shape::Bitvector(_), Value::Bits(bits)) => hex_string(&pack_bits(bits, false)),
        (Shape::Bitlist(_), Value::Bits(bits)) => hex_string(&pack_bits(bits, true)),
        (Shape::Vector(element, _), Value::Sequence(elements))
        | (Shape::List(element, _), Value::Sequence(elements)) => {
            let mut array = Vec::with_capacity(elements.len());
            for (index, element_value) in elements.iter().enumerate() {
                array.push(
                    shape_to_json(element_value, element)
                        .map_err(|error| error.within_index(index))?,
                );
            }
            Json::Array(array)
        }
        (Shape::Container(schema), value) => container_to_json(value, schema)?,
        (shape, value) => {
            return Err(EncodeErrorKind::TypeMismatch {
                expected: shape.to_string(),
                found: value.kind(),
            }
            .into())
        }
    };
    Ok(json)
}

fn unexpected(expected: &str) -> JsonError {
    JsonErrorKind::UnexpectedType {
        expected: expected.to_owned(),
    }
    .into()
}

fn container_from_json(json: &Json, schema: &Schema) -> Result<Value, JsonError> {
    let object = json.as_object().ok_or_else(|| unexpected("an object"))?;

    let mut values = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let value = object
            .get(&field.name)
            .ok_or_else(|| JsonErrorKind::MissingField.into())
            .and_then(|json| shape_from_json(json, &field.shape))
            .map_err(|error: JsonError| error.within_field(&field.name))?;
        values.push(value);
    }
    Ok(Value::Container(values))
}

fn parse_uint(json: &Json, width: usize) -> Result<Value, JsonError> {
    let text = match json {
        Json::String(text) => text.clone(),
        Json::Number(number) if number.is_u64() => number.to_string(),
        _ => return Err(unexpected("a decimal string")),
    };
    let invalid = || JsonError::from(JsonErrorKind::InvalidNumber { text: text.clone() });

    if !is_canonical_decimal(&text) {
        return Err(invalid());
    }

    if width <= 8 {
        text.parse().map(Value::Uint).map_err(|_| invalid())
    } else {
        U256::from_dec_str(&text)
            .map(Value::BigUint)
            .map_err(|_| invalid())
    }
}

// Digits only, with no sign and no leading zeros.
fn is_canonical_decimal(text: &str) -> bool {
    match text.as_bytes() {
        [] => false,
        [b'0', _, ..] => false,
        digits => digits.iter().all(u8::is_ascii_digit),
    }
}

fn parse_hex(json: &Json) -> Result<Vec<u8>, JsonError> {
    let text = json.as_str().ok_or_else(|| unexpected("a hex string"))?;
    let invalid = || JsonError::from(JsonErrorKind::InvalidHex {
        text: text.to_owned(),
    });

    match text.strip_prefix("0x") {
        Some(digits) => hex::decode(digits).map_err(|_| invalid()),
        None => Err(invalid()),
    }
}

fn shape_from_json(json: &Json, shape: &Shape) -> Result<Value, JsonError> {
    match shape {
        Shape::Boolean => json
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| unexpected("a boolean")),
        Shape::Uint(width) => parse_uint(json, *width),
        Shape::ByteVector(_) | Shape::ByteList(_) => parse_hex(json).map(Value::Bytes),
        Shape::Bitvector(length) => {
            let bytes = parse_hex(json)?;
            Ok(Value::Bits(decode_bitvector(&bytes, *length)?))
        }
        Shape::Bitlist(max) => {
            let bytes = parse_hex(json)?;
            Ok(Value::Bits(decode_bitlist(&bytes, *max)?))
        }
        Shape::Vector(element, _) | Shape::List(element, _) => {
            let array = json.as_array().ok_or_else(|| unexpected("an array"))?;
            let mut elements = Vec::with_capacity(array.len());
            for (index, element_json) in array.iter().enumerate() {
                elements.push(
                    shape_from_json(element_json, element)
                        .map_err(|error| error.within_index(index))?,
                );
            }
            Ok(Value::Sequence(elements))
        }
        Shape::Container(schema) => container_from_json(json, schema),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use test_case::test_case;

    use crate::schema::Field;

    use super::*;

    fn attestation_like() -> Schema {
        let checkpoint = Arc::new(
            Schema::new(
                "Checkpoint",
                vec![
                    Field::new("epoch", Shape::Uint(8)),
                    Field::new("root", Shape::ByteVector(4)),
                ],
            )
            .expect("Test"),
        );
        Schema::new(
            "Attestation",
            vec![
                Field::new("aggregation_bits", Shape::Bitlist(16)),
                Field::new("committee_bits", Shape::Bitvector(4)),
                Field::new("source", Shape::Container(checkpoint)),
                Field::new("fee", Shape::Uint(32)),
                Field::new("indices", Shape::list(Shape::Uint(8), 4)),
                Field::new("final", Shape::Boolean),
            ],
        )
        .expect("Test")
    }

    fn sample() -> Value {
        Value::Container(vec![
            Value::Bits(vec![true, false, true]),
            Value::Bits(vec![false, true, false, false]),
            Value::Container(vec![
                Value::Uint(u64::max_value()),
                Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
            ]),
            Value::BigUint(U256::from_dec_str("123456789012345678901234567890").expect("Test")),
            Value::Sequence(vec![Value::Uint(1), Value::Uint(2)]),
            Value::Bool(true),
        ])
    }

    #[test]
    fn renders_api_representation() {
        assert_eq!(
            to_json(&sample(), &attestation_like()),
            Ok(json!({
                "aggregation_bits": "0x0d",
                "committee_bits": "0x02",
                "source": {
                    "epoch": "18446744073709551615",
                    "root": "0xdeadbeef",
                },
                "fee": "123456789012345678901234567890",
                "indices": ["1", "2"],
                "final": true,
            }))
        );
    }

    #[test]
    fn round_trips() {
        let schema = attestation_like();
        let json = to_json(&sample(), &schema).expect("Test");
        assert_eq!(from_json(&json, &schema), Ok(sample()));
    }

    #[test]
    fn accepts_plain_numbers() {
        let schema = Schema::new("Test", vec![Field::new("slot", Shape::Uint(8))]).expect("Test");
        assert_eq!(
            from_json(&json!({ "slot": 12 }), &schema),
            Ok(Value::Container(vec![Value::Uint(12)]))
        );
    }

    #[test_case("+5"; "sign")]
    #[test_case("007"; "leading zeros")]
    #[test_case(""; "empty")]
    #[test_case(" 5"; "whitespace")]
    #[test_case("5_000"; "separator")]
    fn rejects_non_canonical_decimals(text: &str) {
        for width in [8, 32].iter().copied() {
            let schema =
                Schema::new("Test", vec![Field::new("amount", Shape::Uint(width))]).expect("Test");
            let error = from_json(&json!({ "amount": text }), &schema).expect_err("Test");
            assert_eq!(
                error.kind,
                JsonErrorKind::InvalidNumber {
                    text: text.to_owned(),
                }
            );
        }
    }

    #[test]
    fn accepts_zero() {
        let schema = Schema::new("Test", vec![Field::new("slot", Shape::Uint(8))]).expect("Test");
        assert_eq!(
            from_json(&json!({ "slot": "0" }), &schema),
            Ok(Value::Container(vec![Value::Uint(0)]))
        );
    }

    #[test]
    fn reports_missing_field() {
        let error = from_json(&json!({ "aggregation_bits": "0x01" }), &attestation_like())
            .expect_err("Test");
        assert_eq!(error.path.to_string(), "Attestation.committee_bits");
        assert_eq!(error.kind, JsonErrorKind::MissingField);
    }

    #[test]
    fn rejects_bad_hex_and_numbers() {
        let schema = attestation_like();
        let mut json = to_json(&sample(), &schema).expect("Test");

        json["source"]["root"] = json!("deadbeef");
        let error = from_json(&json, &schema).expect_err("Test");
        assert_eq!(error.path.to_string(), "Attestation.source.root");

        json["source"]["root"] = json!("0xdeadbeef");
        json["indices"][1] = json!("-2");
        let error = from_json(&json, &schema).expect_err("Test");
        assert_eq!(error.path.to_string(), "Attestation.indices[1]");
        assert_eq!(
            error.kind,
            JsonErrorKind::InvalidNumber {
                text: "-2".to_owned(),
            }
        );
    }

    #[test]
    fn enforces_bounds() {
        let schema = attestation_like();
        let mut json = to_json(&sample(), &schema).expect("Test");

        json["indices"] = json!(["1", "2", "3", "4", "5"]);
        let error = from_json(&json, &schema).expect_err("Test");
        assert_eq!(
            error.kind,
            JsonErrorKind::Encode(EncodeErrorKind::TooManyElements { count: 5, max: 4 })
        );

        json["indices"] = json!([]);
        json["source"]["root"] = json!("0xdead");
        assert!(from_json(&json, &schema).is_err());
    }
}
