use std::sync::OnceLock;

use ring::digest::{digest, Context, SHA256};

pub const HASH_LEN: usize = 32;

/// Height of the tallest all-zero subtree whose root is precomputed.
/// Chunk limits are `usize`, so no tree can be taller than this.
pub const ZERO_HASHES_MAX_INDEX: usize = 64;

pub fn hash(input: &[u8]) -> Vec<u8> {
    digest(&SHA256, input).as_ref().to_vec()
}

pub fn hash32_concat(left: &[u8], right: &[u8]) -> [u8; HASH_LEN] {
    let mut context = Context::new(&SHA256);
    context.update(left);
    context.update(right);

    let mut output = [0; HASH_LEN];
    output.copy_from_slice(context.finish().as_ref());
    output
}

/// Root of a perfect binary tree of the given height whose leaves are all zero chunks.
///
/// # Panics
///
/// Panics if `height` exceeds [`ZERO_HASHES_MAX_INDEX`].
pub fn zero_hash(height: usize) -> &'static [u8; HASH_LEN] {
    &zero_hashes()[height]
}

fn zero_hashes() -> &'static [[u8; HASH_LEN]] {
    static ZERO_HASHES: OnceLock<Vec<[u8; HASH_LEN]>> = OnceLock::new();

    ZERO_HASHES.get_or_init(|| {
        let mut hashes = Vec::with_capacity(ZERO_HASHES_MAX_INDEX + 1);
        hashes.push([0; HASH_LEN]);
        for height in 0..ZERO_HASHES_MAX_INDEX {
            let below = &hashes[height];
            let next = hash32_concat(below, below);
            hashes.push(next);
        }
        hashes
    })
}
