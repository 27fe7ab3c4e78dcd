use ssz_schema::ContainerDescriptor;

use crate::bounds::{
    MAX_COMMITTEES_PER_SLOT, MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD,
    MAX_DEPOSIT_REQUESTS_PER_PAYLOAD, MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD, PENDING_CONSOLIDATIONS_LIMIT,
    PENDING_DEPOSITS_LIMIT, PENDING_PARTIAL_WITHDRAWALS_LIMIT,
};
use crate::containers::{Definitions, ATTESTATION, ATTESTATION_DATA, BEACON_BLOCK_BODY, BEACON_STATE};
use crate::primitives::*;
use crate::registry::RegistryError;

pub const DEPOSIT_REQUEST: &str = "DepositRequest";
pub const WITHDRAWAL_REQUEST: &str = "WithdrawalRequest";
pub const CONSOLIDATION_REQUEST: &str = "ConsolidationRequest";
pub const EXECUTION_REQUESTS: &str = "ExecutionRequests";
pub const SINGLE_ATTESTATION: &str = "SingleAttestation";
pub const PENDING_DEPOSIT: &str = "PendingDeposit";
pub const PENDING_PARTIAL_WITHDRAWAL: &str = "PendingPartialWithdrawal";
pub const PENDING_CONSOLIDATION: &str = "PendingConsolidation";

// `IndexedAttestation`, `AttesterSlashing` and the body caps change through fork-dependent bounds.
pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    definitions.insert(
        ContainerDescriptor::new(DEPOSIT_REQUEST)
            .field("pubkey", bls_pubkey())
            .field("withdrawal_credentials", bytes(32))
            .field("amount", gwei())
            .field("signature", bls_signature())
            .field("index", uint64()),
    );

    definitions.insert(
        ContainerDescriptor::new(WITHDRAWAL_REQUEST)
            .field("source_address", execution_address())
            .field("validator_pubkey", bls_pubkey())
            .field("amount", gwei()),
    );

    definitions.insert(
        ContainerDescriptor::new(CONSOLIDATION_REQUEST)
            .field("source_address", execution_address())
            .field("source_pubkey", bls_pubkey())
            .field("target_pubkey", bls_pubkey()),
    );

    definitions.insert(
        ContainerDescriptor::new(EXECUTION_REQUESTS)
            .field(
                "deposits",
                list(container(DEPOSIT_REQUEST), MAX_DEPOSIT_REQUESTS_PER_PAYLOAD),
            )
            .field(
                "withdrawals",
                list(
                    container(WITHDRAWAL_REQUEST),
                    MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD,
                ),
            )
            .field(
                "consolidations",
                list(
                    container(CONSOLIDATION_REQUEST),
                    MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD,
                ),
            ),
    );

    definitions.insert(
        ContainerDescriptor::new(SINGLE_ATTESTATION)
            .field("committee_index", committee_index())
            .field("attester_index", validator_index())
            .field("data", container(ATTESTATION_DATA))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(PENDING_DEPOSIT)
            .field("pubkey", bls_pubkey())
            .field("withdrawal_credentials", bytes(32))
            .field("amount", gwei())
            .field("signature", bls_signature())
            .field("slot", slot()),
    );

    definitions.insert(
        ContainerDescriptor::new(PENDING_PARTIAL_WITHDRAWAL)
            .field("validator_index", validator_index())
            .field("amount", gwei())
            .field("withdrawable_epoch", epoch()),
    );

    definitions.insert(
        ContainerDescriptor::new(PENDING_CONSOLIDATION)
            .field("source_index", validator_index())
            .field("target_index", validator_index()),
    );

    definitions.modify(ATTESTATION, |attestation| {
        attestation.add("committee_bits", bitvector(MAX_COMMITTEES_PER_SLOT))
    })?;

    definitions.modify(BEACON_BLOCK_BODY, |body| {
        body.add("execution_requests", container(EXECUTION_REQUESTS))
    })?;

    definitions.modify(BEACON_STATE, |state| {
        state
            .add("deposit_requests_start_index", uint64())?
            .add("deposit_balance_to_consume", gwei())?
            .add("exit_balance_to_consume", gwei())?
            .add("earliest_exit_epoch", epoch())?
            .add("consolidation_balance_to_consume", gwei())?
            .add("earliest_consolidation_epoch", epoch())?
            .add(
                "pending_deposits",
                list(container(PENDING_DEPOSIT), PENDING_DEPOSITS_LIMIT),
            )?
            .add(
                "pending_partial_withdrawals",
                list(
                    container(PENDING_PARTIAL_WITHDRAWAL),
                    PENDING_PARTIAL_WITHDRAWALS_LIMIT,
                ),
            )?
            .add(
                "pending_consolidations",
                list(container(PENDING_CONSOLIDATION), PENDING_CONSOLIDATIONS_LIMIT),
            )
    })
}
