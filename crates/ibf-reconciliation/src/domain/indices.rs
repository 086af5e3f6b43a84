//! Bucket index selection
//!
//! Each key is hashed once per index seed; every hash reduced modulo the
//! bucket count names one bucket. Two seeds can land on the same bucket for a
//! given key, in which case the duplicate is dropped and the key touches fewer
//! buckets. Indices keep first-seen seed order.

use serde::{Deserialize, Serialize};

use super::hash_functions::murmur_hash32;

/// How bucket indices are derived from a key.
///
/// Part of the filter configuration: filters using different schemes place
/// the same key in different buckets and can never be combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexScheme {
    /// `murmur3_32(key, seed) % bucket_count` for each index seed
    #[default]
    MultiSeedMurmur3,
}

/// Compute the distinct bucket indices for a key
///
/// # Arguments
/// * `key` - Key bytes
/// * `seeds` - Index seeds, one candidate index per seed
/// * `bucket_count` - Number of buckets; zero buckets yield no indices
pub(crate) fn compute_bucket_indices(
    key: &[u8],
    seeds: &[u32],
    bucket_count: usize,
) -> Vec<usize> {
    if bucket_count == 0 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        let idx = (murmur_hash32(key, seed) as u64 % bucket_count as u64) as usize;
        if !indices.contains(&idx) {
            indices.push(idx);
        }
    }
    indices
}
