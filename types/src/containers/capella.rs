use ssz_schema::ContainerDescriptor;

use crate::bounds::{HISTORICAL_ROOTS_LIMIT, MAX_BLS_TO_EXECUTION_CHANGES, MAX_WITHDRAWALS_PER_PAYLOAD};
use crate::containers::{
    Definitions, BEACON_BLOCK_BODY, BEACON_STATE, EXECUTION_PAYLOAD, EXECUTION_PAYLOAD_HEADER,
};
use crate::primitives::*;
use crate::registry::RegistryError;

pub const WITHDRAWAL: &str = "Withdrawal";
pub const BLS_TO_EXECUTION_CHANGE: &str = "BLSToExecutionChange";
pub const SIGNED_BLS_TO_EXECUTION_CHANGE: &str = "SignedBLSToExecutionChange";
pub const HISTORICAL_SUMMARY: &str = "HistoricalSummary";

pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    definitions.insert(
        ContainerDescriptor::new(WITHDRAWAL)
            .field("index", withdrawal_index())
            .field("validator_index", validator_index())
            .field("address", execution_address())
            .field("amount", gwei()),
    );

    definitions.insert(
        ContainerDescriptor::new(BLS_TO_EXECUTION_CHANGE)
            .field("validator_index", validator_index())
            .field("from_bls_pubkey", bls_pubkey())
            .field("to_execution_address", execution_address()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_BLS_TO_EXECUTION_CHANGE)
            .field("message", container(BLS_TO_EXECUTION_CHANGE))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(HISTORICAL_SUMMARY)
            .field("block_summary_root", root())
            .field("state_summary_root", root()),
    );

    definitions.modify(EXECUTION_PAYLOAD, |payload| {
        payload.add(
            "withdrawals",
            list(container(WITHDRAWAL), MAX_WITHDRAWALS_PER_PAYLOAD),
        )
    })?;

    definitions.modify(EXECUTION_PAYLOAD_HEADER, |header| {
        header.add("withdrawals_root", root())
    })?;

    definitions.modify(BEACON_BLOCK_BODY, |body| {
        body.add(
            "bls_to_execution_changes",
            list(
                container(SIGNED_BLS_TO_EXECUTION_CHANGE),
                MAX_BLS_TO_EXECUTION_CHANGES,
            ),
        )
    })?;

    definitions.modify(BEACON_STATE, |state| {
        state
            .add("next_withdrawal_index", withdrawal_index())?
            .add("next_withdrawal_validator_index", validator_index())?
            .add(
                "historical_summaries",
                list(container(HISTORICAL_SUMMARY), HISTORICAL_ROOTS_LIMIT),
            )
    })
}
