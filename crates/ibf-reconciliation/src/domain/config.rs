//! IBF configuration and validation
//!
//! Two filters can only be subtracted when every configuration field agrees.
//! Everything that used to be a process-wide constant (key length, minimum
//! bucket count) lives here so differently configured filters can coexist.
//!
//! # Example
//!
//! ```
//! use ibf_reconciliation::domain::IbfConfigBuilder;
//!
//! let config = IbfConfigBuilder::new()
//!     .bucket_count(1024)
//!     .key_length(32)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.index_seeds, vec![0, 1, 2, 4]);
//! ```

use serde::{Deserialize, Serialize};

use super::indices::IndexScheme;
use crate::error::{ConfigMismatch, IbfError};

/// Transaction ids are 256-bit hashes
pub const DEFAULT_KEY_LENGTH: usize = 32;

/// Default number of buckets
pub const DEFAULT_BUCKET_COUNT: usize = 128;

/// Seed of the key fingerprint hash
pub const DEFAULT_KEY_SEED: u32 = 33;

/// Seeds used to derive bucket indices (at most 4 buckets per key)
pub const DEFAULT_INDEX_SEEDS: [u32; 4] = [0, 1, 2, 4];

/// IBF configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbfConfig {
    /// Number of buckets
    pub bucket_count: usize,
    /// Byte length of every key
    pub key_length: usize,
    /// Seed of the hash stored in each bucket's hash sum
    pub key_seed: u32,
    /// One candidate bucket per seed
    pub index_seeds: Vec<u32>,
    /// Smallest accepted bucket count
    pub min_buckets: usize,
    /// Index derivation scheme
    pub scheme: IndexScheme,
}

impl Default for IbfConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            key_length: DEFAULT_KEY_LENGTH,
            key_seed: DEFAULT_KEY_SEED,
            index_seeds: DEFAULT_INDEX_SEEDS.to_vec(),
            min_buckets: 1,
            scheme: IndexScheme::default(),
        }
    }
}

impl IbfConfig {
    /// Default configuration with the given bucket count, validated
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, IbfError> {
        let config = Self {
            bucket_count,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), IbfError> {
        if self.bucket_count == 0 {
            return Err(IbfError::InvalidParameters(
                "bucket_count cannot be 0".to_string(),
            ));
        }

        if self.bucket_count < self.min_buckets {
            return Err(IbfError::InvalidParameters(format!(
                "bucket_count {} is below the minimum of {}",
                self.bucket_count, self.min_buckets
            )));
        }

        if self.key_length == 0 {
            return Err(IbfError::InvalidParameters(
                "key_length cannot be 0".to_string(),
            ));
        }

        if self.index_seeds.is_empty() {
            return Err(IbfError::InvalidParameters(
                "at least one index seed is required".to_string(),
            ));
        }

        if sorted(&self.index_seeds).windows(2).any(|w| w[0] == w[1]) {
            return Err(IbfError::InvalidParameters(format!(
                "index seeds must be distinct, got {:?}",
                self.index_seeds
            )));
        }

        Ok(())
    }

    /// Check that a filter built with `other` can be subtracted from one
    /// built with `self`. Index seeds are compared as a set.
    pub fn compatibility(&self, other: &IbfConfig) -> Result<(), ConfigMismatch> {
        if self.bucket_count != other.bucket_count {
            return Err(ConfigMismatch::BucketCount {
                expected: self.bucket_count,
                actual: other.bucket_count,
            });
        }

        if self.key_seed != other.key_seed {
            return Err(ConfigMismatch::KeySeed {
                expected: self.key_seed,
                actual: other.key_seed,
            });
        }

        if self.key_length != other.key_length {
            return Err(ConfigMismatch::KeyLength {
                expected: self.key_length,
                actual: other.key_length,
            });
        }

        if self.scheme != other.scheme {
            return Err(ConfigMismatch::Scheme {
                expected: self.scheme,
                actual: other.scheme,
            });
        }

        if sorted(&self.index_seeds) != sorted(&other.index_seeds) {
            return Err(ConfigMismatch::IndexSeeds {
                expected: self.index_seeds.clone(),
                actual: other.index_seeds.clone(),
            });
        }

        Ok(())
    }
}

fn sorted(seeds: &[u32]) -> Vec<u32> {
    let mut seeds = seeds.to_vec();
    seeds.sort_unstable();
    seeds
}

/// Builder for IbfConfig with validation
///
/// # Example
///
/// ```ignore
/// let config = IbfConfigBuilder::new()
///     .bucket_count(256)
///     .key_seed(7)
///     .index_seeds(vec![3, 5, 7])
///     .min_buckets(128)
///     .build()?;
/// ```
#[derive(Default)]
pub struct IbfConfigBuilder {
    bucket_count: Option<usize>,
    key_length: Option<usize>,
    key_seed: Option<u32>,
    index_seeds: Option<Vec<u32>>,
    min_buckets: Option<usize>,
}

impl IbfConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of buckets
    pub fn bucket_count(mut self, buckets: usize) -> Self {
        self.bucket_count = Some(buckets);
        self
    }

    /// Set byte length of keys
    pub fn key_length(mut self, length: usize) -> Self {
        self.key_length = Some(length);
        self
    }

    /// Set seed of the key fingerprint hash
    pub fn key_seed(mut self, seed: u32) -> Self {
        self.key_seed = Some(seed);
        self
    }

    /// Set seeds used for bucket index selection
    pub fn index_seeds(mut self, seeds: Vec<u32>) -> Self {
        self.index_seeds = Some(seeds);
        self
    }

    /// Set smallest accepted bucket count
    pub fn min_buckets(mut self, buckets: usize) -> Self {
        self.min_buckets = Some(buckets);
        self
    }

    /// Build the IbfConfig, validating all parameters
    pub fn build(self) -> Result<IbfConfig, IbfError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> IbfConfig {
        let defaults = IbfConfig::default();

        IbfConfig {
            bucket_count: self.bucket_count.unwrap_or(defaults.bucket_count),
            key_length: self.key_length.unwrap_or(defaults.key_length),
            key_seed: self.key_seed.unwrap_or(defaults.key_seed),
            index_seeds: self.index_seeds.unwrap_or(defaults.index_seeds),
            min_buckets: self.min_buckets.unwrap_or(defaults.min_buckets),
            scheme: defaults.scheme,
        }
    }
}
