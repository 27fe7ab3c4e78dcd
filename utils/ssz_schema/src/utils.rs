use core::convert::TryFrom;

use crate::error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind};
use crate::schema::Shape;
use crate::BYTES_PER_LENGTH_OFFSET;

pub fn encode_offset(offset: usize) -> Result<[u8; BYTES_PER_LENGTH_OFFSET], EncodeError> {
    u32::try_from(offset)
        .map(u32::to_le_bytes)
        .map_err(|_| EncodeErrorKind::OffsetOverflow { offset }.into())
}

/// Joins serialized items into one buffer.
///
/// `None` in `fixed_parts` marks a variable-size item. Its offset is written in place and its
/// content is taken from `variable_parts` in order.
pub fn encode_items_from_parts(
    fixed_parts: &[Option<Vec<u8>>],
    variable_parts: &[Vec<u8>],
) -> Result<Vec<u8>, EncodeError> {
    let fixed_length: usize = fixed_parts
        .iter()
        .map(|part| part.as_ref().map_or(BYTES_PER_LENGTH_OFFSET, Vec::len))
        .sum();
    let variable_length: usize = variable_parts.iter().map(Vec::len).sum();

    let mut result = Vec::with_capacity(fixed_length + variable_length);
    let mut offset = fixed_length;
    let mut variable_parts_iter = variable_parts.iter();

    for part in fixed_parts {
        match part {
            Some(bytes) => result.extend_from_slice(bytes),
            None => {
                result.extend_from_slice(&encode_offset(offset)?);
                offset += variable_parts_iter.next().map_or(0, Vec::len);
            }
        }
    }

    for part in variable_parts {
        result.extend_from_slice(part);
    }

    Ok(result)
}

pub fn decode_offset(bytes: &[u8]) -> Result<usize, DecodeError> {
    if bytes.len() == BYTES_PER_LENGTH_OFFSET {
        let mut arr = [0; BYTES_PER_LENGTH_OFFSET];
        arr.clone_from_slice(bytes);
        Ok(u32::from_le_bytes(arr) as usize)
    } else {
        Err(DecodeErrorKind::InvalidByteLength {
            len: bytes.len(),
            expected: BYTES_PER_LENGTH_OFFSET,
        }
        .into())
    }
}

fn read_offset(bytes: &[u8], position: usize) -> Result<usize, DecodeError> {
    match bytes.get(position..position + BYTES_PER_LENGTH_OFFSET) {
        Some(bytes) => decode_offset(bytes),
        None => Err(DecodeErrorKind::InvalidByteLength {
            len: bytes.len(),
            expected: position + BYTES_PER_LENGTH_OFFSET,
        }
        .into()),
    }
}

/// Splits a sequence of variable-size items into per-item byte ranges using its offset table.
///
/// Empty input is an empty sequence.
pub fn decode_variable_sized_items(
    bytes: &[u8],
    max_len: usize,
) -> Result<Vec<&[u8]>, DecodeError> {
    if bytes.is_empty() {
        return Ok(vec![]);
    }

    let first_offset = read_offset(bytes, 0)?;

    if first_offset == 0 || first_offset % BYTES_PER_LENGTH_OFFSET != 0 {
        return Err(DecodeErrorKind::InvalidOffsetTable {
            offset: first_offset,
        }
        .into());
    }

    if first_offset > bytes.len() {
        return Err(DecodeErrorKind::OffsetOutOfBounds {
            offset: first_offset,
            len: bytes.len(),
        }
        .into());
    }

    let number_of_elements = first_offset / BYTES_PER_LENGTH_OFFSET;

    if number_of_elements > max_len {
        return Err(DecodeErrorKind::TooManyElements {
            count: number_of_elements,
            max: max_len,
        }
        .into());
    }

    let mut result = Vec::with_capacity(number_of_elements);

    let mut previous_offset = first_offset;
    for i in 1..=number_of_elements {
        let next_offset = if i == number_of_elements {
            bytes.len()
        } else {
            read_offset(bytes, i * BYTES_PER_LENGTH_OFFSET)
                .and_then(|offset| check_offset(offset, previous_offset, bytes.len()))
                .map_err(|error| error.within_index(i))?
        };

        result.push(&bytes[previous_offset..next_offset]);
        previous_offset = next_offset;
    }

    Ok(result)
}

fn check_offset(offset: usize, previous: usize, len: usize) -> Result<usize, DecodeError> {
    if offset < previous {
        return Err(DecodeErrorKind::OffsetsDecreasing { previous, offset }.into());
    }
    if offset > len {
        return Err(DecodeErrorKind::OffsetOutOfBounds { offset, len }.into());
    }
    Ok(offset)
}

/// Walks the fixed part of a container.
///
/// Every item is first registered in order, which reads and validates the offsets of
/// variable-size items. The items are then taken back out in the same order.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    fixed_part_len: usize,
    registration_offset: usize,
    fixed_part_offset: usize,
    offsets: Vec<usize>,
    current_offset_index: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8], fixed_part_len: usize) -> Result<Self, DecodeError> {
        if bytes.len() < fixed_part_len {
            return Err(DecodeErrorKind::InvalidByteLength {
                len: bytes.len(),
                expected: fixed_part_len,
            }
            .into());
        }

        Ok(Self {
            bytes,
            fixed_part_len,
            registration_offset: 0,
            fixed_part_offset: 0,
            offsets: vec![],
            current_offset_index: 0,
        })
    }

    pub fn register(&mut self, shape: &Shape) -> Result<(), DecodeError> {
        if !shape.is_fixed_len() {
            let offset = read_offset(self.bytes, self.registration_offset)?;

            match self.offsets.last() {
                None if offset != self.fixed_part_len => {
                    return Err(DecodeErrorKind::FirstOffsetMismatch {
                        offset,
                        expected: self.fixed_part_len,
                    }
                    .into())
                }
                None => {}
                Some(previous) => {
                    check_offset(offset, *previous, self.bytes.len())?;
                }
            }

            self.offsets.push(offset);
        }
        self.registration_offset += shape.fixed_len();
        Ok(())
    }

    /// Returns the bytes of the next registered item.
    pub fn next_bytes(&mut self, shape: &Shape) -> Result<&'a [u8], DecodeError> {
        let range = if shape.is_fixed_len() {
            let start = self.fixed_part_offset;
            start..start + shape.fixed_len()
        } else {
            let current_offset = match self.offsets.get(self.current_offset_index) {
                Some(offset) => *offset,
                None => {
                    return Err(DecodeErrorKind::InvalidByteLength {
                        len: self.bytes.len(),
                        expected: self.fixed_part_len,
                    }
                    .into())
                }
            };

            let next_offset = match self.offsets.get(self.current_offset_index + 1) {
                Some(offset) => *offset,
                None => self.bytes.len(),
            };

            current_offset..next_offset
        };

        let bytes = self
            .bytes
            .get(range.clone())
            .ok_or(DecodeErrorKind::InvalidByteLength {
                len: self.bytes.len(),
                expected: range.end,
            })?;

        if !shape.is_fixed_len() {
            self.current_offset_index += 1;
        }
        self.fixed_part_offset += shape.fixed_len();

        Ok(bytes)
    }
}
