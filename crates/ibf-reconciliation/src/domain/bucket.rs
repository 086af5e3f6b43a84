//! A single IBF cell
//!
//! Holds the algebraic summary of every key mapped to it: a signed count, the
//! XOR of the keys and the XOR of their hashes. All three updates are XOR or
//! plus/minus one, so `add` and `delete` of the same key cancel exactly.
//! Counts wrap modulo 2^64, which keeps that cancellation exact for any
//! count a peer can send.

use serde::{Deserialize, Serialize};

use super::bytes::{is_all_zero, xor_assign};

/// Bucket of an invertible Bloom filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Net additions minus deletions; negative after subtraction
    count: i64,
    /// XOR of all keys mapped here
    #[serde(with = "key_sum_serde")]
    key_sum: Vec<u8>,
    /// XOR of the hashes of all keys mapped here
    hash_sum: u32,
}

/// Hex in human-readable formats (JSON), raw bytes otherwise
mod key_sum_serde {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            hex::encode(bytes).serialize(serializer)
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(s).map_err(de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

impl Bucket {
    /// Create an empty bucket for keys of `key_length` bytes
    pub fn new(key_length: usize) -> Self {
        Self {
            count: 0,
            key_sum: vec![0u8; key_length],
            hash_sum: 0,
        }
    }

    /// Fold a key in with `count += 1`.
    ///
    /// # Panics
    /// Panics if `key` is not as long as the key sum.
    pub fn add(&mut self, key: &[u8], hash: u32) {
        self.count = self.count.wrapping_add(1);
        self.update(key, hash);
    }

    /// Fold a key in with `count -= 1`. No membership check is possible;
    /// deleting a key that was never added leaves a negative count.
    ///
    /// # Panics
    /// Panics if `key` is not as long as the key sum.
    pub fn delete(&mut self, key: &[u8], hash: u32) {
        self.count = self.count.wrapping_sub(1);
        self.update(key, hash);
    }

    /// Fold another bucket's whole state in, negating its count.
    ///
    /// # Panics
    /// Panics if the key sums differ in length.
    pub fn subtract(&mut self, other: &Bucket) {
        self.count = self.count.wrapping_sub(other.count);
        self.update(&other.key_sum, other.hash_sum);
    }

    fn update(&mut self, key: &[u8], hash: u32) {
        xor_assign(&mut self.key_sum, key);
        self.hash_sum ^= hash;
    }

    /// True iff count, hash sum and key sum are all zero.
    ///
    /// A zero count alone is not enough: an even number of colliding keys can
    /// cancel the count while leaving garbage in the sums.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.hash_sum == 0 && is_all_zero(&self.key_sum)
    }

    /// Count of ±1, without verifying the hash sum
    pub fn has_unit_count(&self) -> bool {
        self.count == 1 || self.count == -1
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn key_sum(&self) -> &[u8] {
        &self.key_sum
    }

    pub fn hash_sum(&self) -> u32 {
        self.hash_sum
    }
}
