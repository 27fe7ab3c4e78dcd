use ssz_schema::ContainerDescriptor;

use crate::bounds::{BYTES_PER_BLOB, KZG_COMMITMENT_INCLUSION_PROOF_DEPTH, MAX_BLOB_COMMITMENTS_PER_BLOCK};
use crate::containers::{
    Definitions, BEACON_BLOCK_BODY, EXECUTION_PAYLOAD, EXECUTION_PAYLOAD_HEADER,
    SIGNED_BEACON_BLOCK_HEADER,
};
use crate::primitives::*;
use crate::registry::RegistryError;

pub const BLOB_SIDECAR: &str = "BlobSidecar";
pub const BLOB_IDENTIFIER: &str = "BlobIdentifier";

pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    for name in [EXECUTION_PAYLOAD, EXECUTION_PAYLOAD_HEADER].iter().copied() {
        definitions.modify(name, |payload| {
            payload
                .add("blob_gas_used", uint64())?
                .add("excess_blob_gas", uint64())
        })?;
    }

    definitions.modify(BEACON_BLOCK_BODY, |body| {
        body.add(
            "blob_kzg_commitments",
            list(kzg_commitment(), MAX_BLOB_COMMITMENTS_PER_BLOCK),
        )
    })?;

    definitions.insert(
        ContainerDescriptor::new(BLOB_SIDECAR)
            .field("index", uint64())
            .field("blob", byte_vector(BYTES_PER_BLOB))
            .field("kzg_commitment", kzg_commitment())
            .field("kzg_proof", kzg_proof())
            .field("signed_block_header", container(SIGNED_BEACON_BLOCK_HEADER))
            .field(
                "kzg_commitment_inclusion_proof",
                vector(bytes(32), KZG_COMMITMENT_INCLUSION_PROOF_DEPTH),
            ),
    );

    definitions.insert(
        ContainerDescriptor::new(BLOB_IDENTIFIER)
            .field("block_root", root())
            .field("index", uint64()),
    );

    Ok(())
}
