use std::sync::Arc;

use serde_json::json;
use ssz_schema::Value;
use types::config::{MainnetConfig, MinimalConfig};
use types::containers::{
    ATTESTATION, BEACON_BLOCK_BODY, BEACON_STATE, CHECKPOINT, EXECUTION_PAYLOAD_HEADER,
    INDEXED_ATTESTATION, SIGNED_VOLUNTARY_EXIT, VALIDATOR,
};
use types::{ForkName, ForkSchedule, TypeRegistry};

fn decode_hex(text: &str) -> Vec<u8> {
    hex::decode(text.trim_start_matches("0x")).expect("Test")
}

#[test]
fn checkpoint_to_json() {
    let registry = TypeRegistry::build::<MainnetConfig>().expect("Test");
    let codec = registry.codec(ForkName::Phase0, CHECKPOINT).expect("Test");

    let mut bytes = vec![0; 40];
    bytes[..8].copy_from_slice(&3_u64.to_le_bytes());
    bytes[8..].copy_from_slice(&[0x11; 32]);

    let value = codec.decode(&bytes).expect("Test");
    assert_eq!(
        codec.to_json(&value).expect("Test"),
        json!({
            "epoch": "3",
            "root": format!("0x{}", "11".repeat(32)),
        })
    );
}

#[test]
fn signed_voluntary_exit_from_json() {
    let registry = TypeRegistry::build::<MinimalConfig>().expect("Test");
    let codec = registry
        .codec(ForkName::Capella, SIGNED_VOLUNTARY_EXIT)
        .expect("Test");

    let json = json!({
        "message": { "epoch": "1", "validator_index": "513" },
        "signature": format!("0x{}", "ab".repeat(96)),
    });
    let value = codec.from_json(&json).expect("Test");
    let bytes = codec.encode(&value).expect("Test");

    let mut expected = decode_hex("0x01000000000000000102000000000000");
    expected.extend_from_slice(&[0xab; 96]);
    assert_eq!(bytes, expected);
}

#[test]
fn default_checkpoint_root() {
    let registry = TypeRegistry::build::<MainnetConfig>().expect("Test");
    let codec = registry.codec(ForkName::Electra, CHECKPOINT).expect("Test");

    let root = codec.hash_tree_root(&codec.default_value()).expect("Test");
    assert_eq!(
        hex::encode(root.as_bytes()),
        "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
    );
}

fn attestation_data() -> serde_json::Value {
    json!({
        "slot": "7",
        "index": "2",
        "beacon_block_root": format!("0x{}", "aa".repeat(32)),
        "source": { "epoch": "1", "root": format!("0x{}", "bb".repeat(32)) },
        "target": { "epoch": "2", "root": format!("0x{}", "cc".repeat(32)) },
    })
}

#[test]
fn electra_attestation_root() {
    let registry = TypeRegistry::build::<MainnetConfig>().expect("Test");
    let codec = registry.codec(ForkName::Electra, ATTESTATION).expect("Test");

    let value = codec
        .from_json(&json!({
            // Bits 1, 0, 1, 1, 0 and the delimiter.
            "aggregation_bits": "0x2d",
            "data": attestation_data(),
            "signature": format!("0x{}", "11".repeat(96)),
            "committee_bits": "0x0800000000000000",
        }))
        .expect("Test");

    let bytes = codec.encode(&value).expect("Test");
    assert!(hex::encode(&bytes).ends_with("08000000000000002d"));
    assert_eq!(
        hex::encode(codec.hash_tree_root(&value).expect("Test").as_bytes()),
        "6212d84dcc074dc94c9407191b8322ff4004f8e3d2302b7d007257975cf47564"
    );
}

#[test]
fn deneb_indexed_attestation_root() {
    let registry = TypeRegistry::build::<MainnetConfig>().expect("Test");
    let codec = registry
        .codec(ForkName::Deneb, INDEXED_ATTESTATION)
        .expect("Test");

    let value = codec
        .from_json(&json!({
            "attesting_indices": ["3", "9", "100"],
            "data": attestation_data(),
            "signature": format!("0x{}", "22".repeat(96)),
        }))
        .expect("Test");

    assert_eq!(
        hex::encode(codec.hash_tree_root(&value).expect("Test").as_bytes()),
        "4be962132d9519c3b4356810373af37ec4ace644dcee749287b06e793bb2522f"
    );
}

#[test]
fn deneb_payload_header_root() {
    let registry = TypeRegistry::build::<MainnetConfig>().expect("Test");
    let codec = registry
        .codec(ForkName::Deneb, EXECUTION_PAYLOAD_HEADER)
        .expect("Test");

    let mut json = codec.to_json(&codec.default_value()).expect("Test");
    json["block_number"] = json!("42");
    json["extra_data"] = json!("0x010203");
    json["base_fee_per_gas"] = json!("1000000007");

    let value = codec.from_json(&json).expect("Test");
    assert_eq!(
        hex::encode(codec.hash_tree_root(&value).expect("Test").as_bytes()),
        "aa697037ebc8875602e04e2407876fe9dd54aae49332d00c7a99ce2e4f8eeb9d"
    );
}

#[test]
fn empty_attestation_encoding() {
    let registry = TypeRegistry::build::<MinimalConfig>().expect("Test");

    // Offset, then data and signature, then the lone delimiter bit.
    let deneb = registry.codec(ForkName::Deneb, ATTESTATION).expect("Test");
    let bytes = deneb.encode(&deneb.default_value()).expect("Test");
    assert_eq!(bytes.len(), 4 + 128 + 96 + 1);
    assert_eq!(&bytes[..4], &[228, 0, 0, 0]);
    assert_eq!(bytes.last(), Some(&1));

    // Electra appends four committee bits, which move the offset by one byte.
    let electra = registry.codec(ForkName::Electra, ATTESTATION).expect("Test");
    let bytes = electra.encode(&electra.default_value()).expect("Test");
    assert_eq!(bytes.len(), 4 + 128 + 96 + 1 + 1);
    assert_eq!(&bytes[..4], &[229, 0, 0, 0]);
}

#[test]
fn malformed_body_names_the_failing_field() {
    let registry = TypeRegistry::build::<MinimalConfig>().expect("Test");
    let codec = registry.codec(ForkName::Phase0, BEACON_BLOCK_BODY).expect("Test");

    let mut bytes = codec.encode(&codec.default_value()).expect("Test");
    // The `attestations` offset is the third of five, after 96 + 72 + 32 + 8 bytes.
    let position = 96 + 72 + 32 + 4 + 4;
    let offset = u32::from_le_bytes([
        bytes[position],
        bytes[position + 1],
        bytes[position + 2],
        bytes[position + 3],
    ]);
    bytes[position..position + 4].copy_from_slice(&(offset + 1_000).to_le_bytes());

    let error = codec.decode(&bytes).expect_err("Test");
    assert_eq!(error.path.to_string(), "BeaconBlockBody.attestations");
}

#[test]
fn state_shares_validator_records() {
    let registry = TypeRegistry::build::<MinimalConfig>().expect("Test");

    let phase0 = registry.codec(ForkName::Phase0, VALIDATOR).expect("Test");
    let electra = registry.codec(ForkName::Electra, VALIDATOR).expect("Test");
    assert!(Arc::ptr_eq(phase0, electra));

    for fork in ForkName::ALL.iter().copied() {
        let state = registry.codec(fork, BEACON_STATE).expect("Test");
        let value = state.default_value();
        let bytes = state.encode(&value).expect("Test");
        assert_eq!(state.decode(&bytes).as_ref(), Ok(&value));
        assert!(state.hash_tree_root(&value).is_ok());
    }
}

#[test]
fn schedule_selects_codecs() {
    let registry = TypeRegistry::build::<MinimalConfig>().expect("Test");
    let schedule = ForkSchedule::from_yaml("ALTAIR_FORK_EPOCH: 1\nELECTRA_FORK_EPOCH: 2\n");

    // Electra cannot activate while Deneb is unscheduled.
    assert!(schedule.is_err());

    let schedule = ForkSchedule::all_at_genesis();
    let fork = schedule.fork_at_slot::<MinimalConfig>(0);
    assert_eq!(fork, ForkName::Electra);
    assert!(registry.records(fork).any(|name| name == "PendingDeposit"));

    let empty = Value::Container(vec![]);
    assert!(registry
        .codec(fork, CHECKPOINT)
        .expect("Test")
        .hash_tree_root(&empty)
        .is_err());
}
