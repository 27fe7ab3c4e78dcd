//! Schema-driven SSZ.
//!
//! Types are described at runtime by a [`Schema`] instead of being Rust types. One generic
//! serializer, deserializer and Merkleizer interpret every schema, so record types can be
//! composed and resolved while the program runs.

mod decode;
mod descriptor;
mod encode;
mod error;
mod json;
pub mod merkle;
mod schema;
mod utils;
mod value;

pub use decode::deserialize;
pub use descriptor::{build_schema, Bound, ContainerDescriptor, SchemaContext, ShapeDescriptor};
pub use encode::{serialize, validate};
pub use error::{
    DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, FieldPath, JsonError,
    JsonErrorKind, PathSegment, SchemaError,
};
pub use json::{from_json, to_json};
pub use merkle::hash_tree_root;
pub use schema::{Field, Schema, Shape, UINT_WIDTHS};
pub use utils::{
    decode_offset, decode_variable_sized_items, encode_items_from_parts, encode_offset, Decoder,
};
pub use value::Value;

pub use ethereum_types::{H256, U256};

pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
pub const BYTES_PER_CHUNK: usize = 32;
