use ssz_schema::{ContainerDescriptor, ShapeDescriptor};

use crate::bounds::{
    BYTES_PER_LOGS_BLOOM, MAX_BYTES_PER_TRANSACTION, MAX_EXTRA_DATA_BYTES,
    MAX_TRANSACTIONS_PER_PAYLOAD,
};
use crate::containers::{Definitions, BEACON_BLOCK_BODY, BEACON_STATE};
use crate::primitives::*;
use crate::registry::RegistryError;

pub const EXECUTION_PAYLOAD: &str = "ExecutionPayload";
pub const EXECUTION_PAYLOAD_HEADER: &str = "ExecutionPayloadHeader";

fn transaction() -> ShapeDescriptor {
    byte_list(MAX_BYTES_PER_TRANSACTION)
}

// Leading fields shared by the payload and its header.
fn execution_block(name: &str) -> ContainerDescriptor {
    ContainerDescriptor::new(name)
        .field("parent_hash", hash32())
        .field("fee_recipient", execution_address())
        .field("state_root", bytes(32))
        .field("receipts_root", bytes(32))
        .field("logs_bloom", byte_vector(BYTES_PER_LOGS_BLOOM))
        .field("prev_randao", bytes(32))
        .field("block_number", uint64())
        .field("gas_limit", uint64())
        .field("gas_used", uint64())
        .field("timestamp", uint64())
        .field("extra_data", byte_list(MAX_EXTRA_DATA_BYTES))
        .field("base_fee_per_gas", uint256())
        .field("block_hash", hash32())
}

pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    definitions.insert(execution_block(EXECUTION_PAYLOAD).field(
        "transactions",
        list(transaction(), MAX_TRANSACTIONS_PER_PAYLOAD),
    ));

    definitions.insert(execution_block(EXECUTION_PAYLOAD_HEADER).field("transactions_root", root()));

    definitions.modify(BEACON_BLOCK_BODY, |body| {
        body.add("execution_payload", container(EXECUTION_PAYLOAD))
    })?;

    definitions.modify(BEACON_STATE, |state| {
        state.add(
            "latest_execution_payload_header",
            container(EXECUTION_PAYLOAD_HEADER),
        )
    })
}
