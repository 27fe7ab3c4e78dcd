use core::fmt::Debug;
use core::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typenum::{
    Unsigned, U1, U10, U1048576, U1073741824, U1099511627776, U128, U134217728, U16, U16777216,
    U17, U2, U2048, U256, U262144, U32, U4, U4096, U512, U64, U65536, U8, U8192,
};

/// Preset values. Each associated type is a `typenum` constant.
pub trait Config: Copy + Default + Debug + Send + Sync + 'static {
    const PRESET: PresetName;

    // Phase 0
    type MaxValidatorsPerCommittee: Unsigned;
    type MaxCommitteesPerSlot: Unsigned;
    type SlotsPerEpoch: Unsigned;
    type SlotsPerHistoricalRoot: Unsigned;
    type HistoricalRootsLimit: Unsigned;
    type EpochsPerEth1VotingPeriod: Unsigned;
    type ValidatorRegistryLimit: Unsigned;
    type EpochsPerHistoricalVector: Unsigned;
    type EpochsPerSlashingsVector: Unsigned;
    type MaxProposerSlashings: Unsigned;
    type MaxAttesterSlashings: Unsigned;
    type MaxAttestations: Unsigned;
    type MaxDeposits: Unsigned;
    type MaxVoluntaryExits: Unsigned;

    // Altair
    type SyncCommitteeSize: Unsigned;

    // Bellatrix
    type MaxBytesPerTransaction: Unsigned;
    type MaxTransactionsPerPayload: Unsigned;
    type BytesPerLogsBloom: Unsigned;
    type MaxExtraDataBytes: Unsigned;

    // Capella
    type MaxBlsToExecutionChanges: Unsigned;
    type MaxWithdrawalsPerPayload: Unsigned;

    // Deneb
    type MaxBlobCommitmentsPerBlock: Unsigned;
    type FieldElementsPerBlob: Unsigned;
    type KzgCommitmentInclusionProofDepth: Unsigned;

    // Electra
    type MaxAttesterSlashingsElectra: Unsigned;
    type MaxAttestationsElectra: Unsigned;
    type MaxDepositRequestsPerPayload: Unsigned;
    type MaxWithdrawalRequestsPerPayload: Unsigned;
    type MaxConsolidationRequestsPerPayload: Unsigned;
    type PendingDepositsLimit: Unsigned;
    type PendingPartialWithdrawalsLimit: Unsigned;
    type PendingConsolidationsLimit: Unsigned;
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct MainnetConfig;

impl Config for MainnetConfig {
    const PRESET: PresetName = PresetName::Mainnet;

    type MaxValidatorsPerCommittee = U2048;
    type MaxCommitteesPerSlot = U64;
    type SlotsPerEpoch = U32;
    type SlotsPerHistoricalRoot = U8192;
    type HistoricalRootsLimit = U16777216;
    type EpochsPerEth1VotingPeriod = U64;
    type ValidatorRegistryLimit = U1099511627776;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;

    type SyncCommitteeSize = U512;

    type MaxBytesPerTransaction = U1073741824;
    type MaxTransactionsPerPayload = U1048576;
    type BytesPerLogsBloom = U256;
    type MaxExtraDataBytes = U32;

    type MaxBlsToExecutionChanges = U16;
    type MaxWithdrawalsPerPayload = U16;

    type MaxBlobCommitmentsPerBlock = U4096;
    type FieldElementsPerBlob = U4096;
    type KzgCommitmentInclusionProofDepth = U17;

    type MaxAttesterSlashingsElectra = U1;
    type MaxAttestationsElectra = U8;
    type MaxDepositRequestsPerPayload = U8192;
    type MaxWithdrawalRequestsPerPayload = U16;
    type MaxConsolidationRequestsPerPayload = U2;
    type PendingDepositsLimit = U134217728;
    type PendingPartialWithdrawalsLimit = U134217728;
    type PendingConsolidationsLimit = U262144;
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct MinimalConfig;

impl Config for MinimalConfig {
    const PRESET: PresetName = PresetName::Minimal;

    type MaxValidatorsPerCommittee = U2048;
    type MaxCommitteesPerSlot = U4;
    type SlotsPerEpoch = U8;
    type SlotsPerHistoricalRoot = U64;
    type HistoricalRootsLimit = U16777216;
    type EpochsPerEth1VotingPeriod = U4;
    type ValidatorRegistryLimit = U1099511627776;
    type EpochsPerHistoricalVector = U64;
    type EpochsPerSlashingsVector = U64;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;

    type SyncCommitteeSize = U32;

    type MaxBytesPerTransaction = U1073741824;
    type MaxTransactionsPerPayload = U1048576;
    type BytesPerLogsBloom = U256;
    type MaxExtraDataBytes = U32;

    type MaxBlsToExecutionChanges = U16;
    type MaxWithdrawalsPerPayload = U4;

    type MaxBlobCommitmentsPerBlock = U32;
    type FieldElementsPerBlob = U4096;
    type KzgCommitmentInclusionProofDepth = U10;

    type MaxAttesterSlashingsElectra = U1;
    type MaxAttestationsElectra = U8;
    type MaxDepositRequestsPerPayload = U4;
    type MaxWithdrawalRequestsPerPayload = U2;
    type MaxConsolidationRequestsPerPayload = U2;
    type PendingDepositsLimit = U134217728;
    type PendingPartialWithdrawalsLimit = U64;
    type PendingConsolidationsLimit = U64;
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    #[display(fmt = "mainnet")]
    Mainnet,
    #[display(fmt = "minimal")]
    Minimal,
}

#[derive(PartialEq, Eq, Debug, Error)]
#[error("unknown preset {0:?}")]
pub struct UnknownPreset(String);

impl FromStr for PresetName {
    type Err = UnknownPreset;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "mainnet" => Ok(PresetName::Mainnet),
            "minimal" => Ok(PresetName::Minimal),
            _ => Err(UnknownPreset(string.to_owned())),
        }
    }
}
