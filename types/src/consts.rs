use crate::primitives::Epoch;

pub const GENESIS_EPOCH: Epoch = 0;
pub const FAR_FUTURE_EPOCH: Epoch = u64::max_value();

pub const JUSTIFICATION_BITS_LENGTH: usize = 4;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;
pub const SYNC_COMMITTEE_SUBNET_COUNT: usize = 4;
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

pub const BLS_PUBLIC_KEY_LEN: usize = 48;
pub const BLS_SIGNATURE_LEN: usize = 96;
pub const KZG_COMMITMENT_LEN: usize = 48;
pub const KZG_PROOF_LEN: usize = 48;
pub const EXECUTION_ADDRESS_LEN: usize = 20;
