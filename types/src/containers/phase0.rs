use ssz_schema::ContainerDescriptor;

use crate::bounds::{
    EPOCHS_PER_HISTORICAL_VECTOR, EPOCHS_PER_SLASHINGS_VECTOR, HISTORICAL_ROOTS_LIMIT,
    MAX_ATTESTATIONS, MAX_ATTESTER_SLASHINGS, MAX_DEPOSITS, MAX_PENDING_ATTESTATIONS,
    MAX_PROPOSER_SLASHINGS, MAX_VALIDATORS_PER_ATTESTATION, MAX_VALIDATORS_PER_COMMITTEE,
    MAX_VOLUNTARY_EXITS, SLOTS_PER_ETH1_VOTING_PERIOD, SLOTS_PER_HISTORICAL_ROOT,
    VALIDATOR_REGISTRY_LIMIT,
};
use crate::consts::{DEPOSIT_CONTRACT_TREE_DEPTH, JUSTIFICATION_BITS_LENGTH};
use crate::containers::Definitions;
use crate::primitives::*;
use crate::registry::RegistryError;

pub const FORK: &str = "Fork";
pub const FORK_DATA: &str = "ForkData";
pub const CHECKPOINT: &str = "Checkpoint";
pub const VALIDATOR: &str = "Validator";
pub const ATTESTATION_DATA: &str = "AttestationData";
pub const INDEXED_ATTESTATION: &str = "IndexedAttestation";
pub const PENDING_ATTESTATION: &str = "PendingAttestation";
pub const ETH1_DATA: &str = "Eth1Data";
pub const HISTORICAL_BATCH: &str = "HistoricalBatch";
pub const DEPOSIT_MESSAGE: &str = "DepositMessage";
pub const DEPOSIT_DATA: &str = "DepositData";
pub const BEACON_BLOCK_HEADER: &str = "BeaconBlockHeader";
pub const SIGNED_BEACON_BLOCK_HEADER: &str = "SignedBeaconBlockHeader";
pub const SIGNING_DATA: &str = "SigningData";
pub const PROPOSER_SLASHING: &str = "ProposerSlashing";
pub const ATTESTER_SLASHING: &str = "AttesterSlashing";
pub const ATTESTATION: &str = "Attestation";
pub const DEPOSIT: &str = "Deposit";
pub const VOLUNTARY_EXIT: &str = "VoluntaryExit";
pub const SIGNED_VOLUNTARY_EXIT: &str = "SignedVoluntaryExit";
pub const BEACON_BLOCK_BODY: &str = "BeaconBlockBody";
pub const BEACON_BLOCK: &str = "BeaconBlock";
pub const SIGNED_BEACON_BLOCK: &str = "SignedBeaconBlock";
pub const BEACON_STATE: &str = "BeaconState";
pub const AGGREGATE_AND_PROOF: &str = "AggregateAndProof";
pub const SIGNED_AGGREGATE_AND_PROOF: &str = "SignedAggregateAndProof";

pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    definitions.insert(
        ContainerDescriptor::new(FORK)
            .field("previous_version", version())
            .field("current_version", version())
            .field("epoch", epoch()),
    );

    definitions.insert(
        ContainerDescriptor::new(FORK_DATA)
            .field("current_version", version())
            .field("genesis_validators_root", root()),
    );

    definitions.insert(
        ContainerDescriptor::new(CHECKPOINT)
            .field("epoch", epoch())
            .field("root", root()),
    );

    definitions.insert(
        ContainerDescriptor::new(VALIDATOR)
            .field("pubkey", bls_pubkey())
            .field("withdrawal_credentials", bytes(32))
            .field("effective_balance", gwei())
            .field("slashed", boolean())
            .field("activation_eligibility_epoch", epoch())
            .field("activation_epoch", epoch())
            .field("exit_epoch", epoch())
            .field("withdrawable_epoch", epoch()),
    );

    definitions.insert(
        ContainerDescriptor::new(ATTESTATION_DATA)
            .field("slot", slot())
            .field("index", committee_index())
            .field("beacon_block_root", root())
            .field("source", container(CHECKPOINT))
            .field("target", container(CHECKPOINT)),
    );

    definitions.insert(
        ContainerDescriptor::new(INDEXED_ATTESTATION)
            .field(
                "attesting_indices",
                list(validator_index(), MAX_VALIDATORS_PER_ATTESTATION),
            )
            .field("data", container(ATTESTATION_DATA))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(PENDING_ATTESTATION)
            .field("aggregation_bits", bitlist(MAX_VALIDATORS_PER_COMMITTEE))
            .field("data", container(ATTESTATION_DATA))
            .field("inclusion_delay", slot())
            .field("proposer_index", validator_index()),
    );

    definitions.insert(
        ContainerDescriptor::new(ETH1_DATA)
            .field("deposit_root", root())
            .field("deposit_count", uint64())
            .field("block_hash", hash32()),
    );

    definitions.insert(
        ContainerDescriptor::new(HISTORICAL_BATCH)
            .field("block_roots", vector(root(), SLOTS_PER_HISTORICAL_ROOT))
            .field("state_roots", vector(root(), SLOTS_PER_HISTORICAL_ROOT)),
    );

    definitions.insert(
        ContainerDescriptor::new(DEPOSIT_MESSAGE)
            .field("pubkey", bls_pubkey())
            .field("withdrawal_credentials", bytes(32))
            .field("amount", gwei()),
    );

    definitions.insert(
        ContainerDescriptor::new(DEPOSIT_DATA)
            .field("pubkey", bls_pubkey())
            .field("withdrawal_credentials", bytes(32))
            .field("amount", gwei())
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(BEACON_BLOCK_HEADER)
            .field("slot", slot())
            .field("proposer_index", validator_index())
            .field("parent_root", root())
            .field("state_root", root())
            .field("body_root", root()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_BEACON_BLOCK_HEADER)
            .field("message", container(BEACON_BLOCK_HEADER))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNING_DATA)
            .field("object_root", root())
            .field("domain", bytes(32)),
    );

    definitions.insert(
        ContainerDescriptor::new(PROPOSER_SLASHING)
            .field("signed_header_1", container(SIGNED_BEACON_BLOCK_HEADER))
            .field("signed_header_2", container(SIGNED_BEACON_BLOCK_HEADER)),
    );

    definitions.insert(
        ContainerDescriptor::new(ATTESTER_SLASHING)
            .field("attestation_1", container(INDEXED_ATTESTATION))
            .field("attestation_2", container(INDEXED_ATTESTATION)),
    );

    definitions.insert(
        ContainerDescriptor::new(ATTESTATION)
            .field("aggregation_bits", bitlist(MAX_VALIDATORS_PER_ATTESTATION))
            .field("data", container(ATTESTATION_DATA))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(DEPOSIT)
            .field("proof", vector(bytes(32), DEPOSIT_CONTRACT_TREE_DEPTH + 1))
            .field("data", container(DEPOSIT_DATA)),
    );

    definitions.insert(
        ContainerDescriptor::new(VOLUNTARY_EXIT)
            .field("epoch", epoch())
            .field("validator_index", validator_index()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_VOLUNTARY_EXIT)
            .field("message", container(VOLUNTARY_EXIT))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(BEACON_BLOCK_BODY)
            .field("randao_reveal", bls_signature())
            .field("eth1_data", container(ETH1_DATA))
            .field("graffiti", bytes(32))
            .field(
                "proposer_slashings",
                list(container(PROPOSER_SLASHING), MAX_PROPOSER_SLASHINGS),
            )
            .field(
                "attester_slashings",
                list(container(ATTESTER_SLASHING), MAX_ATTESTER_SLASHINGS),
            )
            .field("attestations", list(container(ATTESTATION), MAX_ATTESTATIONS))
            .field("deposits", list(container(DEPOSIT), MAX_DEPOSITS))
            .field(
                "voluntary_exits",
                list(container(SIGNED_VOLUNTARY_EXIT), MAX_VOLUNTARY_EXITS),
            ),
    );

    definitions.insert(
        ContainerDescriptor::new(BEACON_BLOCK)
            .field("slot", slot())
            .field("proposer_index", validator_index())
            .field("parent_root", root())
            .field("state_root", root())
            .field("body", container(BEACON_BLOCK_BODY)),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_BEACON_BLOCK)
            .field("message", container(BEACON_BLOCK))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(BEACON_STATE)
            .field("genesis_time", uint64())
            .field("genesis_validators_root", root())
            .field("slot", slot())
            .field("fork", container(FORK))
            .field("latest_block_header", container(BEACON_BLOCK_HEADER))
            .field("block_roots", vector(root(), SLOTS_PER_HISTORICAL_ROOT))
            .field("state_roots", vector(root(), SLOTS_PER_HISTORICAL_ROOT))
            .field("historical_roots", list(root(), HISTORICAL_ROOTS_LIMIT))
            .field("eth1_data", container(ETH1_DATA))
            .field(
                "eth1_data_votes",
                list(container(ETH1_DATA), SLOTS_PER_ETH1_VOTING_PERIOD),
            )
            .field("eth1_deposit_index", uint64())
            .field("validators", list(container(VALIDATOR), VALIDATOR_REGISTRY_LIMIT))
            .field("balances", list(gwei(), VALIDATOR_REGISTRY_LIMIT))
            .field("randao_mixes", vector(bytes(32), EPOCHS_PER_HISTORICAL_VECTOR))
            .field("slashings", vector(gwei(), EPOCHS_PER_SLASHINGS_VECTOR))
            .field(
                "previous_epoch_attestations",
                list(container(PENDING_ATTESTATION), MAX_PENDING_ATTESTATIONS),
            )
            .field(
                "current_epoch_attestations",
                list(container(PENDING_ATTESTATION), MAX_PENDING_ATTESTATIONS),
            )
            .field("justification_bits", bitvector(JUSTIFICATION_BITS_LENGTH))
            .field("previous_justified_checkpoint", container(CHECKPOINT))
            .field("current_justified_checkpoint", container(CHECKPOINT))
            .field("finalized_checkpoint", container(CHECKPOINT)),
    );

    definitions.insert(
        ContainerDescriptor::new(AGGREGATE_AND_PROOF)
            .field("aggregator_index", validator_index())
            .field("aggregate", container(ATTESTATION))
            .field("selection_proof", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_AGGREGATE_AND_PROOF)
            .field("message", container(AGGREGATE_AND_PROOF))
            .field("signature", bls_signature()),
    );

    Ok(())
}
