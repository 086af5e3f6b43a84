//! Core invertible Bloom filter
//!
//! A fixed array of buckets summarising a set of fixed-length keys. Two
//! filters with the same configuration can be subtracted bucket-wise, and
//! the result peeled to recover the symmetric difference of the two sets.
//!
//! INVARIANTS:
//! - Every key ever applied is exactly `key_length` bytes
//! - The bucket array length equals `bucket_count` for the filter's lifetime
//! - Subtraction is all-or-nothing: configuration is checked before any bucket changes
//! - Decode either empties the filter or reports `DecodeFailed`, never a silent partial answer

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::bucket::Bucket;
use super::config::IbfConfig;
use super::hash_functions::murmur_hash32;
use super::indices::compute_bucket_indices;
use crate::error::{DecodeFailed, IbfError};

/// Keys recovered by peeling a filter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetDifference {
    /// Keys only in the filter that was subtracted from (A after `A - B`)
    pub remaining: Vec<Vec<u8>>,
    /// Keys only in the subtrahend (B after `A - B`)
    pub missing: Vec<Vec<u8>>,
    /// Peeling passes that extracted at least one key
    pub rounds: usize,
}

impl SetDifference {
    /// Total number of recovered keys on both sides
    pub fn len(&self) -> usize {
        self.remaining.len() + self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty() && self.missing.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Update {
    Insert,
    Remove,
}

/// Invertible Bloom filter (IBLT) for set reconciliation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ibf {
    config: IbfConfig,
    buckets: Vec<Bucket>,
}

impl Ibf {
    /// Create an empty filter with default configuration and `bucket_count` buckets
    pub fn new(bucket_count: usize) -> Result<Self, IbfError> {
        Self::with_config(IbfConfig::with_bucket_count(bucket_count)?)
    }

    /// Create an empty filter from a configuration
    pub fn with_config(config: IbfConfig) -> Result<Self, IbfError> {
        config.validate()?;
        let buckets = vec![Bucket::new(config.key_length); config.bucket_count];
        Ok(Self { config, buckets })
    }

    /// Add a key to every bucket it maps to.
    ///
    /// Returns whether the insertion is still recoverable from a pure bucket,
    /// i.e. at least one touched bucket has `|count| < 2`. This is telemetry
    /// only: it holds as long as nothing has been deleted or subtracted.
    pub fn add(&mut self, key: &[u8]) -> Result<bool, IbfError> {
        self.check_key(key)?;
        let touched = self.apply(key, Update::Insert);
        Ok(touched
            .iter()
            .any(|&idx| self.buckets[idx].count().unsigned_abs() < 2))
    }

    /// Remove a key from every bucket it maps to.
    ///
    /// Does not verify that the key was added; deleting an unknown key leaves
    /// negative counts that decode reports as `missing`.
    pub fn delete(&mut self, key: &[u8]) -> Result<(), IbfError> {
        self.check_key(key)?;
        self.apply(key, Update::Remove);
        Ok(())
    }

    /// Subtract `other` from this filter bucket by bucket.
    ///
    /// Fails without touching either filter if the configurations differ.
    pub fn subtract(&mut self, other: &Ibf) -> Result<(), IbfError> {
        if let Err(mismatch) = self.config.compatibility(&other.config) {
            warn!(%mismatch, "Rejected IBF subtraction");
            return Err(mismatch.into());
        }

        for (ours, theirs) in self.buckets.iter_mut().zip(&other.buckets) {
            ours.subtract(theirs);
        }

        debug!(
            bucket_count = self.buckets.len(),
            non_empty = self.non_empty_buckets(),
            "Subtracted IBF"
        );
        Ok(())
    }

    /// Peel pure buckets into `remaining` (count +1) or `missing` (count -1).
    ///
    /// Destructive: each recovered key is cancelled out of every bucket it
    /// maps to, which may expose new pure buckets. On success the filter is
    /// left empty. If peeling stalls with non-empty buckets, the keys found so
    /// far are returned inside `DecodeFailed`. Output order carries no meaning.
    pub fn decode(&mut self) -> Result<SetDifference, DecodeFailed> {
        let mut diff = SetDifference::default();

        loop {
            let mut updated = false;

            for idx in 0..self.buckets.len() {
                let bucket = &self.buckets[idx];
                if !self.is_pure(bucket) {
                    continue;
                }

                let key = bucket.key_sum().to_vec();
                let count = bucket.count();
                // Peeling a key that does not map here would leave this bucket pure forever
                if !self.bucket_indices(&key).contains(&idx) {
                    continue;
                }

                if count == 1 {
                    self.apply(&key, Update::Remove);
                    trace!(key = %hex::encode(&key), "Peeled remaining key");
                    diff.remaining.push(key);
                } else {
                    self.apply(&key, Update::Insert);
                    trace!(key = %hex::encode(&key), "Peeled missing key");
                    diff.missing.push(key);
                }
                updated = true;
            }

            if !updated {
                break;
            }
            diff.rounds += 1;
        }

        let residual_buckets = self.non_empty_buckets();
        if residual_buckets > 0 {
            warn!(
                residual_buckets,
                remaining = diff.remaining.len(),
                missing = diff.missing.len(),
                rounds = diff.rounds,
                "IBF decode stalled"
            );
            return Err(DecodeFailed {
                partial: diff,
                residual_buckets,
            });
        }

        debug!(
            remaining = diff.remaining.len(),
            missing = diff.missing.len(),
            rounds = diff.rounds,
            "IBF decoded"
        );
        Ok(diff)
    }

    /// Pure: count of ±1 and the hash sum matches the hash of the key sum.
    ///
    /// The hash check rejects buckets whose count reached ±1 through
    /// cancellation of several keys.
    pub fn is_pure(&self, bucket: &Bucket) -> bool {
        bucket.has_unit_count() && self.key_hash(bucket.key_sum()) == bucket.hash_sum()
    }

    /// True when every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Number of buckets that are not empty
    pub fn non_empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Distinct bucket positions for a key
    pub fn bucket_indices(&self, key: &[u8]) -> Vec<usize> {
        compute_bucket_indices(key, &self.config.index_seeds, self.buckets.len())
    }

    /// Fingerprint hash stored in bucket hash sums
    pub fn key_hash(&self, key: &[u8]) -> u32 {
        murmur_hash32(key, self.config.key_seed)
    }

    pub fn config(&self) -> &IbfConfig {
        &self.config
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn key_length(&self) -> usize {
        self.config.key_length
    }

    /// Check the invariants a deserialized filter cannot guarantee by itself
    pub(crate) fn validate_structure(&self) -> Result<(), IbfError> {
        self.config.validate()?;

        if self.buckets.len() != self.config.bucket_count {
            return Err(IbfError::SerializationError(format!(
                "expected {} buckets, found {}",
                self.config.bucket_count,
                self.buckets.len()
            )));
        }

        if let Some((idx, bucket)) = self
            .buckets
            .iter()
            .enumerate()
            .find(|(_, b)| b.key_sum().len() != self.config.key_length)
        {
            return Err(IbfError::SerializationError(format!(
                "bucket {} has a {}-byte key sum, expected {}",
                idx,
                bucket.key_sum().len(),
                self.config.key_length
            )));
        }

        Ok(())
    }

    fn check_key(&self, key: &[u8]) -> Result<(), IbfError> {
        if key.len() != self.config.key_length {
            return Err(IbfError::InvalidKeyLength {
                expected: self.config.key_length,
                actual: key.len(),
            });
        }
        Ok(())
    }

    /// Shared by add, delete and decode so peeling can never drift from
    /// ordinary mutation.
    fn apply(&mut self, key: &[u8], update: Update) -> Vec<usize> {
        let hash = self.key_hash(key);
        let indices = self.bucket_indices(key);
        for &idx in &indices {
            match update {
                Update::Insert => self.buckets[idx].add(key, hash),
                Update::Remove => self.buckets[idx].delete(key, hash),
            }
        }
        indices
    }
}
