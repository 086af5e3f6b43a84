//! Error types for the IBF reconciliation crate

use thiserror::Error;

use crate::domain::SetDifference;

/// Errors that can occur while building, combining or transmitting filters
#[derive(Debug, Error)]
pub enum IbfError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Byte length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Configuration mismatch: {0}")]
    ConfigMismatch(#[from] ConfigMismatch),

    #[error(transparent)]
    DecodeFailed(#[from] DecodeFailed),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Key source error: {0}")]
    KeySource(String),
}

/// The specific field on which two filter configurations disagree
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigMismatch {
    #[error("unequal number of buckets, expected ({expected}) got ({actual})")]
    BucketCount { expected: usize, actual: usize },

    #[error("key seeds do not match, expected ({expected}) got ({actual})")]
    KeySeed { expected: u32, actual: u32 },

    #[error("key lengths do not match, expected ({expected}) got ({actual})")]
    KeyLength { expected: usize, actual: usize },

    #[error("index seeds do not match, expected {expected:?} got {actual:?}")]
    IndexSeeds { expected: Vec<u32>, actual: Vec<u32> },

    #[error("index schemes do not match, expected {expected:?} got {actual:?}")]
    Scheme {
        expected: crate::domain::IndexScheme,
        actual: crate::domain::IndexScheme,
    },
}

/// Peeling stalled with non-empty buckets left over.
///
/// The keys extracted before the stall are kept in `partial`; each of them is
/// individually valid, but the difference as a whole is inconclusive.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "decode failed: {residual_buckets} non-empty buckets after extracting {} remaining / {} missing keys",
    .partial.remaining.len(),
    .partial.missing.len()
)]
pub struct DecodeFailed {
    pub partial: SetDifference,
    pub residual_buckets: usize,
}
