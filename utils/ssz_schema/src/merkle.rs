//! Hash tree roots.
//!
//! Values are assumed to already satisfy their schema. Use [`crate::validate`] first when the
//! value did not come out of [`crate::deserialize`].

use eth2_hashing::{hash32_concat, zero_hash, HASH_LEN};
use ethereum_types::H256;

use crate::encode::{encode_shape, pack_bits};
use crate::schema::{Schema, Shape, BITS_PER_CHUNK};
use crate::value::Value;
use crate::BYTES_PER_CHUNK;

type Chunk = [u8; HASH_LEN];

/// # Panics
///
/// Panics if `value` does not match `schema`.
pub fn hash_tree_root(value: &Value, schema: &Schema) -> H256 {
    H256(container_root(value, schema))
}

fn container_root(value: &Value, schema: &Schema) -> Chunk {
    let fields = match value {
        Value::Container(fields) if fields.len() == schema.fields().len() => fields,
        _ => panic!("expected a {} value, found {}", schema.name(), value.kind()),
    };

    let roots: Vec<Chunk> = schema
        .fields()
        .iter()
        .zip(fields)
        .map(|(field, value)| shape_root(value, &field.shape))
        .collect();

    merkleize(&roots, roots.len())
}

fn shape_root(value: &Value, shape: &Shape) -> Chunk {
    match (shape, value) {
        (Shape::Boolean, _) | (Shape::Uint(_), _) => {
            let bytes = encode_basic(value, shape);
            merkleize(&pack(&bytes), 1)
        }
        (Shape::ByteVector(length), Value::Bytes(bytes)) => {
            merkleize(&pack(bytes), chunk_count(*length, BYTES_PER_CHUNK))
        }
        (Shape::ByteList(max), Value::Bytes(bytes)) => mix_in_length(
            &merkleize(&pack(bytes), chunk_count(*max, BYTES_PER_CHUNK)),
            bytes.len(),
        ),
        (Shape::Bitvector(length), Value::Bits(bits)) => merkleize(
            &pack(&pack_bits(bits, false)),
            chunk_count(*length, BITS_PER_CHUNK),
        ),
        (Shape::Bitlist(max), Value::Bits(bits)) => mix_in_length(
            &merkleize(
                &pack(&pack_bits(bits, false)),
                chunk_count(*max, BITS_PER_CHUNK),
            ),
            bits.len(),
        ),
        (Shape::Vector(element, length), Value::Sequence(elements)) => {
            sequence_root(elements, element, *length)
        }
        (Shape::List(element, max), Value::Sequence(elements)) => {
            mix_in_length(&sequence_root(elements, element, *max), elements.len())
        }
        (Shape::Container(schema), value) => container_root(value, schema),
        (shape, value) => panic!("expected a {} value, found {}", shape, value.kind()),
    }
}

fn sequence_root(elements: &[Value], element: &Shape, capacity: usize) -> Chunk {
    if element.is_basic() {
        let bytes: Vec<u8> = elements
            .iter()
            .flat_map(|element_value| encode_basic(element_value, element))
            .collect();
        let limit = chunk_count(capacity * element.fixed_len(), BYTES_PER_CHUNK);
        merkleize(&pack(&bytes), limit)
    } else {
        let roots: Vec<Chunk> = elements
            .iter()
            .map(|element_value| shape_root(element_value, element))
            .collect();
        merkleize(&roots, capacity)
    }
}

fn encode_basic(value: &Value, shape: &Shape) -> Vec<u8> {
    match encode_shape(value, shape) {
        Ok(bytes) => bytes,
        Err(error) => panic!("cannot merkleize {}: {}", shape, error),
    }
}

fn chunk_count(len: usize, per_chunk: usize) -> usize {
    (len + per_chunk - 1) / per_chunk
}

/// Splits bytes into chunks, zero-padding the last one.
pub fn pack(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = [0; HASH_LEN];
            chunk[..piece.len()].copy_from_slice(piece);
            chunk
        })
        .collect()
}

fn depth(limit: usize) -> usize {
    match limit {
        0 | 1 => 0,
        _ => (usize::max_value().count_ones() - (limit - 1).leading_zeros()) as usize,
    }
}

/// Root of a tree with `limit` leaves rounded up to a power of two, of which the first are
/// `chunks` and the rest are zero.
///
/// Only the populated part of the tree is hashed. Lone nodes pair with precomputed zero
/// subtree roots.
///
/// # Panics
///
/// Panics if there are more chunks than `limit` allows.
pub fn merkleize(chunks: &[Chunk], limit: usize) -> Chunk {
    assert!(
        chunks.len() <= limit.max(1),
        "{} chunks exceed the limit of {}",
        chunks.len(),
        limit,
    );

    let depth = depth(limit);

    if chunks.is_empty() {
        return *zero_hash(depth);
    }

    let mut layer = chunks.to_vec();
    for height in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(*zero_hash(height));
        }
        layer = layer
            .chunks(2)
            .map(|pair| hash32_concat(&pair[0], &pair[1]))
            .collect();
    }

    layer[0]
}

pub fn mix_in_length(root: &Chunk, length: usize) -> Chunk {
    let mut length_chunk = [0; HASH_LEN];
    length_chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    hash32_concat(root, &length_chunk)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eth2_hashing::hash;

    use crate::schema::Field;

    use super::*;

    fn single_field(shape: Shape) -> Schema {
        Schema::new("Test", vec![Field::new("field", shape)]).expect("Test")
    }

    fn chunk(byte: u8) -> Chunk {
        [byte; HASH_LEN]
    }

    fn concat(left: &Chunk, right: &Chunk) -> Chunk {
        let mut joined = left.to_vec();
        joined.extend_from_slice(right);
        let mut result = [0; HASH_LEN];
        result.copy_from_slice(&hash(&joined));
        result
    }

    #[test]
    fn depths() {
        assert_eq!(depth(0), 0);
        assert_eq!(depth(1), 0);
        assert_eq!(depth(2), 1);
        assert_eq!(depth(3), 2);
        assert_eq!(depth(4), 2);
        assert_eq!(depth(5), 3);
        assert_eq!(depth(1 << 40), 40);
    }

    #[test]
    fn merkleize_small_trees() {
        assert_eq!(merkleize(&[], 0), [0; HASH_LEN]);
        assert_eq!(merkleize(&[chunk(1)], 1), chunk(1));
        assert_eq!(merkleize(&[chunk(1), chunk(2)], 2), concat(&chunk(1), &chunk(2)));
        assert_eq!(
            merkleize(&[chunk(1), chunk(2), chunk(3)], 3),
            concat(
                &concat(&chunk(1), &chunk(2)),
                &concat(&chunk(3), &[0; HASH_LEN]),
            ),
        );
    }

    #[test]
    fn merkleize_pads_to_limit() {
        assert_eq!(
            merkleize(&[chunk(1)], 4),
            concat(
                &concat(&chunk(1), &[0; HASH_LEN]),
                zero_hash(1),
            ),
        );
        assert_eq!(merkleize(&[], 8), *zero_hash(3));
    }

    #[test]
    fn merkleize_huge_limit_is_cheap() {
        let mut expected = chunk(7);
        for height in 0..40 {
            expected = concat(&expected, zero_hash(height));
        }
        assert_eq!(merkleize(&[chunk(7)], 1 << 40), expected);
    }

    #[test]
    #[should_panic]
    fn merkleize_over_limit() {
        merkleize(&[chunk(1), chunk(2), chunk(3)], 2);
    }

    #[test]
    fn mix_in_length_appends_little_endian_count() {
        let mut length_chunk = [0; HASH_LEN];
        length_chunk[0] = 3;
        assert_eq!(mix_in_length(&chunk(9), 3), concat(&chunk(9), &length_chunk));
    }

    #[test]
    fn basic_roots() {
        let schema = single_field(Shape::Uint(8));
        let mut leaf = [0; HASH_LEN];
        leaf[0] = 5;
        assert_eq!(
            hash_tree_root(&Value::Container(vec![Value::Uint(5)]), &schema),
            H256(leaf),
        );
    }

    #[test]
    fn empty_list_root() {
        let list = Shape::list(Shape::Uint(8), 16);
        let vector = Shape::vector(Shape::Uint(8), 16);

        let list_root = shape_root(&Value::Sequence(vec![]), &list);
        let vector_root = shape_root(&vector.default_value(), &vector);

        // 16 uint64 values pack into 4 chunks.
        assert_eq!(list_root, concat(zero_hash(2), &[0; HASH_LEN]));
        assert_eq!(vector_root, *zero_hash(2));
        assert_ne!(list_root, vector_root);
    }

    #[test]
    fn list_roots_depend_on_length() {
        let shape = Shape::list(Shape::Uint(8), 16);
        let short = Value::Sequence(vec![Value::Uint(1), Value::Uint(0)]);
        let long = Value::Sequence(vec![Value::Uint(1), Value::Uint(0), Value::Uint(0)]);

        assert_ne!(shape_root(&short, &shape), shape_root(&long, &shape));
    }

    #[test]
    fn bitlist_root_excludes_delimiter() {
        let shape = Shape::Bitlist(2048);
        let bits = Value::Bits(vec![true, false, true]);

        let mut leaf = [0; HASH_LEN];
        leaf[0] = 0b0000_0101;
        let expected = mix_in_length(&merkleize(&[leaf], 8), 3);

        assert_eq!(shape_root(&bits, &shape), expected);
    }

    #[test]
    fn byte_vector_spanning_chunks() {
        let shape = Shape::ByteVector(48);
        let bytes: Vec<u8> = (0..48).collect();

        let mut first = [0; HASH_LEN];
        first.copy_from_slice(&bytes[..32]);
        let mut second = [0; HASH_LEN];
        second[..16].copy_from_slice(&bytes[32..]);

        assert_eq!(shape_root(&Value::Bytes(bytes), &shape), concat(&first, &second));
    }

    #[test]
    fn container_fields_are_leaves() {
        let inner = Arc::new(single_field(Shape::Uint(8)));
        let schema = Schema::new(
            "Outer",
            vec![
                Field::new("flag", Shape::Boolean),
                Field::new("inner", Shape::Container(inner)),
                Field::new("bytes", Shape::ByteList(64)),
            ],
        )
        .expect("Test");
        let value = Value::Container(vec![
            Value::Bool(true),
            Value::Container(vec![Value::Uint(2)]),
            Value::Bytes(vec![]),
        ]);

        let mut flag = [0; HASH_LEN];
        flag[0] = 1;
        let mut inner = [0; HASH_LEN];
        inner[0] = 2;
        let bytes = mix_in_length(zero_hash(1), 0);

        assert_eq!(
            hash_tree_root(&value, &schema),
            H256(concat(&concat(&flag, &inner), &concat(&bytes, &[0; HASH_LEN]))),
        );
    }

    #[test]
    #[should_panic]
    fn mismatched_value_panics() {
        hash_tree_root(&Value::Container(vec![Value::Bool(true)]), &single_field(Shape::Uint(8)));
    }
}
