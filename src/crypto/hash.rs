//! Content hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Length in bytes of every content hash.
pub const HASH_LENGTH: usize = 32;

type Blake2b256 = Blake2b<U32>;

/// blake2b with a 32-byte output.
pub fn blake2b_hash(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}
