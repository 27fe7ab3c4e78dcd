//! Field types shared by every fork, named after their consensus-specs aliases.

use ssz_schema::{Bound, ShapeDescriptor};

use crate::consts::{
    BLS_PUBLIC_KEY_LEN, BLS_SIGNATURE_LEN, EXECUTION_ADDRESS_LEN, KZG_COMMITMENT_LEN,
    KZG_PROOF_LEN,
};

pub type Epoch = u64;
pub type Gwei = u64;
pub type Slot = u64;
pub type ValidatorIndex = u64;

pub fn boolean() -> ShapeDescriptor {
    ShapeDescriptor::Boolean
}

pub fn uint8() -> ShapeDescriptor {
    ShapeDescriptor::Uint(1)
}

pub fn uint64() -> ShapeDescriptor {
    ShapeDescriptor::Uint(8)
}

pub fn uint256() -> ShapeDescriptor {
    ShapeDescriptor::Uint(32)
}

pub fn slot() -> ShapeDescriptor {
    uint64()
}

pub fn epoch() -> ShapeDescriptor {
    uint64()
}

pub fn gwei() -> ShapeDescriptor {
    uint64()
}

pub fn validator_index() -> ShapeDescriptor {
    uint64()
}

pub fn committee_index() -> ShapeDescriptor {
    uint64()
}

pub fn withdrawal_index() -> ShapeDescriptor {
    uint64()
}

pub fn participation_flags() -> ShapeDescriptor {
    uint8()
}

pub fn bytes(length: usize) -> ShapeDescriptor {
    ShapeDescriptor::ByteVector(Bound::Fixed(length))
}

pub fn root() -> ShapeDescriptor {
    bytes(32)
}

pub fn hash32() -> ShapeDescriptor {
    bytes(32)
}

pub fn version() -> ShapeDescriptor {
    bytes(4)
}

pub fn bls_pubkey() -> ShapeDescriptor {
    bytes(BLS_PUBLIC_KEY_LEN)
}

pub fn bls_signature() -> ShapeDescriptor {
    bytes(BLS_SIGNATURE_LEN)
}

pub fn execution_address() -> ShapeDescriptor {
    bytes(EXECUTION_ADDRESS_LEN)
}

pub fn kzg_commitment() -> ShapeDescriptor {
    bytes(KZG_COMMITMENT_LEN)
}

pub fn kzg_proof() -> ShapeDescriptor {
    bytes(KZG_PROOF_LEN)
}

pub fn container(name: &str) -> ShapeDescriptor {
    ShapeDescriptor::container(name)
}

pub fn list(element: ShapeDescriptor, max_length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::list(element, max_length)
}

pub fn vector(element: ShapeDescriptor, length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::vector(element, length)
}

pub fn bitlist(max_length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::Bitlist(max_length.into())
}

pub fn bitvector(length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::Bitvector(length.into())
}

pub fn byte_list(max_length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::ByteList(max_length.into())
}

pub fn byte_vector(length: impl Into<Bound>) -> ShapeDescriptor {
    ShapeDescriptor::ByteVector(length.into())
}
