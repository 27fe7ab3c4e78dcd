use anyhow::{Context as _, Result};

/// Accepts either raw SSZ or `0x`-prefixed hex text, optionally surrounded by whitespace.
pub fn ssz_bytes(contents: Vec<u8>) -> Result<Vec<u8>> {
    let trimmed = trim_ascii(&contents);

    match trimmed.strip_prefix(b"0x") {
        Some(digits) if digits.iter().all(u8::is_ascii_hexdigit) => {
            hex::decode(digits).context("hex input has an odd number of digits")
        }
        _ => Ok(contents),
    }
}

pub fn json(contents: &[u8]) -> Result<serde_json::Value> {
    serde_json::from_slice(contents).context("input is not valid JSON")
}

pub fn hex_string(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(start, |position| position + 1);
    &bytes[start..end]
}
