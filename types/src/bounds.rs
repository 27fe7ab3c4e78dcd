//! Named maximum lengths and their values under a given preset and fork.

use core::marker::PhantomData;
use std::collections::HashMap;
use std::sync::Arc;

use ssz_schema::{Schema, SchemaContext};
use typenum::Unsigned;

use crate::config::Config;
use crate::consts::{BYTES_PER_FIELD_ELEMENT, SYNC_COMMITTEE_SUBNET_COUNT};
use crate::forks::ForkName;

pub const MAX_VALIDATORS_PER_COMMITTEE: &str = "MAX_VALIDATORS_PER_COMMITTEE";
pub const MAX_VALIDATORS_PER_ATTESTATION: &str = "MAX_VALIDATORS_PER_ATTESTATION";
pub const MAX_COMMITTEES_PER_SLOT: &str = "MAX_COMMITTEES_PER_SLOT";
pub const SLOTS_PER_HISTORICAL_ROOT: &str = "SLOTS_PER_HISTORICAL_ROOT";
pub const HISTORICAL_ROOTS_LIMIT: &str = "HISTORICAL_ROOTS_LIMIT";
pub const SLOTS_PER_ETH1_VOTING_PERIOD: &str = "SLOTS_PER_ETH1_VOTING_PERIOD";
pub const VALIDATOR_REGISTRY_LIMIT: &str = "VALIDATOR_REGISTRY_LIMIT";
pub const EPOCHS_PER_HISTORICAL_VECTOR: &str = "EPOCHS_PER_HISTORICAL_VECTOR";
pub const EPOCHS_PER_SLASHINGS_VECTOR: &str = "EPOCHS_PER_SLASHINGS_VECTOR";
pub const MAX_PENDING_ATTESTATIONS: &str = "MAX_PENDING_ATTESTATIONS";
pub const MAX_PROPOSER_SLASHINGS: &str = "MAX_PROPOSER_SLASHINGS";
pub const MAX_ATTESTER_SLASHINGS: &str = "MAX_ATTESTER_SLASHINGS";
pub const MAX_ATTESTATIONS: &str = "MAX_ATTESTATIONS";
pub const MAX_DEPOSITS: &str = "MAX_DEPOSITS";
pub const MAX_VOLUNTARY_EXITS: &str = "MAX_VOLUNTARY_EXITS";

pub const SYNC_COMMITTEE_SIZE: &str = "SYNC_COMMITTEE_SIZE";
pub const SYNC_SUBCOMMITTEE_SIZE: &str = "SYNC_SUBCOMMITTEE_SIZE";

pub const MAX_BYTES_PER_TRANSACTION: &str = "MAX_BYTES_PER_TRANSACTION";
pub const MAX_TRANSACTIONS_PER_PAYLOAD: &str = "MAX_TRANSACTIONS_PER_PAYLOAD";
pub const BYTES_PER_LOGS_BLOOM: &str = "BYTES_PER_LOGS_BLOOM";
pub const MAX_EXTRA_DATA_BYTES: &str = "MAX_EXTRA_DATA_BYTES";

pub const MAX_BLS_TO_EXECUTION_CHANGES: &str = "MAX_BLS_TO_EXECUTION_CHANGES";
pub const MAX_WITHDRAWALS_PER_PAYLOAD: &str = "MAX_WITHDRAWALS_PER_PAYLOAD";

pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: &str = "MAX_BLOB_COMMITMENTS_PER_BLOCK";
pub const KZG_COMMITMENT_INCLUSION_PROOF_DEPTH: &str = "KZG_COMMITMENT_INCLUSION_PROOF_DEPTH";
pub const BYTES_PER_BLOB: &str = "BYTES_PER_BLOB";

pub const MAX_DEPOSIT_REQUESTS_PER_PAYLOAD: &str = "MAX_DEPOSIT_REQUESTS_PER_PAYLOAD";
pub const MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD: &str = "MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD";
pub const MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD: &str = "MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD";
pub const PENDING_DEPOSITS_LIMIT: &str = "PENDING_DEPOSITS_LIMIT";
pub const PENDING_PARTIAL_WITHDRAWALS_LIMIT: &str = "PENDING_PARTIAL_WITHDRAWALS_LIMIT";
pub const PENDING_CONSOLIDATIONS_LIMIT: &str = "PENDING_CONSOLIDATIONS_LIMIT";

/// Resolves a bound for `fork` under preset `C`.
///
/// Returns `None` for unknown names and for bounds introduced after `fork`.
pub fn resolve_bound<C: Config>(fork: ForkName, name: &str) -> Option<usize> {
    let electra = fork >= ForkName::Electra;

    let (introduced_in, value) = match name {
        MAX_VALIDATORS_PER_COMMITTEE => (ForkName::Phase0, Some(C::MaxValidatorsPerCommittee::USIZE)),
        // Electra attestations aggregate across every committee of a slot.
        MAX_VALIDATORS_PER_ATTESTATION if electra => (
            ForkName::Electra,
            C::MaxValidatorsPerCommittee::USIZE.checked_mul(C::MaxCommitteesPerSlot::USIZE),
        ),
        MAX_VALIDATORS_PER_ATTESTATION => {
            (ForkName::Phase0, Some(C::MaxValidatorsPerCommittee::USIZE))
        }
        MAX_COMMITTEES_PER_SLOT => (ForkName::Phase0, Some(C::MaxCommitteesPerSlot::USIZE)),
        SLOTS_PER_HISTORICAL_ROOT => (ForkName::Phase0, Some(C::SlotsPerHistoricalRoot::USIZE)),
        HISTORICAL_ROOTS_LIMIT => (ForkName::Phase0, Some(C::HistoricalRootsLimit::USIZE)),
        SLOTS_PER_ETH1_VOTING_PERIOD => (
            ForkName::Phase0,
            C::EpochsPerEth1VotingPeriod::USIZE.checked_mul(C::SlotsPerEpoch::USIZE),
        ),
        VALIDATOR_REGISTRY_LIMIT => (ForkName::Phase0, Some(C::ValidatorRegistryLimit::USIZE)),
        EPOCHS_PER_HISTORICAL_VECTOR => {
            (ForkName::Phase0, Some(C::EpochsPerHistoricalVector::USIZE))
        }
        EPOCHS_PER_SLASHINGS_VECTOR => (ForkName::Phase0, Some(C::EpochsPerSlashingsVector::USIZE)),
        MAX_PENDING_ATTESTATIONS => (
            ForkName::Phase0,
            C::MaxAttestations::USIZE.checked_mul(C::SlotsPerEpoch::USIZE),
        ),
        MAX_PROPOSER_SLASHINGS => (ForkName::Phase0, Some(C::MaxProposerSlashings::USIZE)),
        MAX_ATTESTER_SLASHINGS if electra => {
            (ForkName::Electra, Some(C::MaxAttesterSlashingsElectra::USIZE))
        }
        MAX_ATTESTER_SLASHINGS => (ForkName::Phase0, Some(C::MaxAttesterSlashings::USIZE)),
        MAX_ATTESTATIONS if electra => (ForkName::Electra, Some(C::MaxAttestationsElectra::USIZE)),
        MAX_ATTESTATIONS => (ForkName::Phase0, Some(C::MaxAttestations::USIZE)),
        MAX_DEPOSITS => (ForkName::Phase0, Some(C::MaxDeposits::USIZE)),
        MAX_VOLUNTARY_EXITS => (ForkName::Phase0, Some(C::MaxVoluntaryExits::USIZE)),

        SYNC_COMMITTEE_SIZE => (ForkName::Altair, Some(C::SyncCommitteeSize::USIZE)),
        SYNC_SUBCOMMITTEE_SIZE => (
            ForkName::Altair,
            Some(C::SyncCommitteeSize::USIZE / SYNC_COMMITTEE_SUBNET_COUNT),
        ),

        MAX_BYTES_PER_TRANSACTION => (ForkName::Bellatrix, Some(C::MaxBytesPerTransaction::USIZE)),
        MAX_TRANSACTIONS_PER_PAYLOAD => {
            (ForkName::Bellatrix, Some(C::MaxTransactionsPerPayload::USIZE))
        }
        BYTES_PER_LOGS_BLOOM => (ForkName::Bellatrix, Some(C::BytesPerLogsBloom::USIZE)),
        MAX_EXTRA_DATA_BYTES => (ForkName::Bellatrix, Some(C::MaxExtraDataBytes::USIZE)),

        MAX_BLS_TO_EXECUTION_CHANGES => {
            (ForkName::Capella, Some(C::MaxBlsToExecutionChanges::USIZE))
        }
        MAX_WITHDRAWALS_PER_PAYLOAD => (ForkName::Capella, Some(C::MaxWithdrawalsPerPayload::USIZE)),

        MAX_BLOB_COMMITMENTS_PER_BLOCK => {
            (ForkName::Deneb, Some(C::MaxBlobCommitmentsPerBlock::USIZE))
        }
        KZG_COMMITMENT_INCLUSION_PROOF_DEPTH => (
            ForkName::Deneb,
            Some(C::KzgCommitmentInclusionProofDepth::USIZE),
        ),
        BYTES_PER_BLOB => (
            ForkName::Deneb,
            C::FieldElementsPerBlob::USIZE.checked_mul(BYTES_PER_FIELD_ELEMENT),
        ),

        MAX_DEPOSIT_REQUESTS_PER_PAYLOAD => (
            ForkName::Electra,
            Some(C::MaxDepositRequestsPerPayload::USIZE),
        ),
        MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD => (
            ForkName::Electra,
            Some(C::MaxWithdrawalRequestsPerPayload::USIZE),
        ),
        MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD => (
            ForkName::Electra,
            Some(C::MaxConsolidationRequestsPerPayload::USIZE),
        ),
        PENDING_DEPOSITS_LIMIT => (ForkName::Electra, Some(C::PendingDepositsLimit::USIZE)),
        PENDING_PARTIAL_WITHDRAWALS_LIMIT => (
            ForkName::Electra,
            Some(C::PendingPartialWithdrawalsLimit::USIZE),
        ),
        PENDING_CONSOLIDATIONS_LIMIT => {
            (ForkName::Electra, Some(C::PendingConsolidationsLimit::USIZE))
        }

        _ => return None,
    };

    if fork < introduced_in {
        return None;
    }

    value
}

/// Resolution context for building the records of one fork.
///
/// Containers resolve to the schemas already built for the same fork.
pub struct ForkContext<'built, C> {
    fork: ForkName,
    built: &'built HashMap<String, Arc<Schema>>,
    phantom: PhantomData<C>,
}

impl<'built, C: Config> ForkContext<'built, C> {
    pub fn new(fork: ForkName, built: &'built HashMap<String, Arc<Schema>>) -> Self {
        Self {
            fork,
            built,
            phantom: PhantomData,
        }
    }

    pub fn fork(&self) -> ForkName {
        self.fork
    }
}

impl<C: Config> SchemaContext for ForkContext<'_, C> {
    fn resolve_bound(&self, name: &str) -> Option<usize> {
        resolve_bound::<C>(self.fork, name)
    }

    fn resolve_container(&self, name: &str) -> Option<Arc<Schema>> {
        self.built.get(name).cloned()
    }
}
