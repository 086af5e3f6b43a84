//! Hash functions for the invertible Bloom filter
//!
//! Uses 32-bit MurmurHash3 (x86_32) with different seeds: one seed
//! fingerprints a key's content, the index seeds pick bucket positions.

use std::io::Cursor;

/// Hash a key with 32-bit MurmurHash3 using a seed
pub fn murmur_hash32(key: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(key);

    // Reading from an in-memory slice cannot fail
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}
