use ssz_schema::ContainerDescriptor;

use crate::bounds::{SYNC_COMMITTEE_SIZE, SYNC_SUBCOMMITTEE_SIZE, VALIDATOR_REGISTRY_LIMIT};
use crate::containers::{Definitions, BEACON_BLOCK_BODY, BEACON_STATE};
use crate::primitives::*;
use crate::registry::RegistryError;

pub const SYNC_AGGREGATE: &str = "SyncAggregate";
pub const SYNC_COMMITTEE: &str = "SyncCommittee";
pub const SYNC_COMMITTEE_MESSAGE: &str = "SyncCommitteeMessage";
pub const SYNC_COMMITTEE_CONTRIBUTION: &str = "SyncCommitteeContribution";
pub const CONTRIBUTION_AND_PROOF: &str = "ContributionAndProof";
pub const SIGNED_CONTRIBUTION_AND_PROOF: &str = "SignedContributionAndProof";

pub(super) fn define(definitions: &mut Definitions) -> Result<(), RegistryError> {
    definitions.insert(
        ContainerDescriptor::new(SYNC_AGGREGATE)
            .field("sync_committee_bits", bitvector(SYNC_COMMITTEE_SIZE))
            .field("sync_committee_signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(SYNC_COMMITTEE)
            .field("pubkeys", vector(bls_pubkey(), SYNC_COMMITTEE_SIZE))
            .field("aggregate_pubkey", bls_pubkey()),
    );

    definitions.insert(
        ContainerDescriptor::new(SYNC_COMMITTEE_MESSAGE)
            .field("slot", slot())
            .field("beacon_block_root", root())
            .field("validator_index", validator_index())
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(SYNC_COMMITTEE_CONTRIBUTION)
            .field("slot", slot())
            .field("beacon_block_root", root())
            .field("subcommittee_index", uint64())
            .field("aggregation_bits", bitvector(SYNC_SUBCOMMITTEE_SIZE))
            .field("signature", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(CONTRIBUTION_AND_PROOF)
            .field("aggregator_index", validator_index())
            .field("contribution", container(SYNC_COMMITTEE_CONTRIBUTION))
            .field("selection_proof", bls_signature()),
    );

    definitions.insert(
        ContainerDescriptor::new(SIGNED_CONTRIBUTION_AND_PROOF)
            .field("message", container(CONTRIBUTION_AND_PROOF))
            .field("signature", bls_signature()),
    );

    definitions.modify(BEACON_BLOCK_BODY, |body| {
        body.add("sync_aggregate", container(SYNC_AGGREGATE))
    })?;

    definitions.modify(BEACON_STATE, |state| {
        state
            .replace(
                "previous_epoch_attestations",
                "previous_epoch_participation",
                list(participation_flags(), VALIDATOR_REGISTRY_LIMIT),
            )?
            .replace(
                "current_epoch_attestations",
                "current_epoch_participation",
                list(participation_flags(), VALIDATOR_REGISTRY_LIMIT),
            )?
            .add("inactivity_scores", list(uint64(), VALIDATOR_REGISTRY_LIMIT))?
            .add("current_sync_committee", container(SYNC_COMMITTEE))?
            .add("next_sync_committee", container(SYNC_COMMITTEE))
    })
}
