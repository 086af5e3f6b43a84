//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - XOR algebra over key bytes
//! - Hash functions
//! - Bucket index selection
//! - Buckets and the invertible Bloom filter
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bucket;
pub mod bytes;
pub mod config;
pub mod hash_functions;
pub mod ibf;
pub mod indices;

pub use bucket::Bucket;
pub use bytes::{bytes_equal, is_all_zero, xor_assign, xor_bytes};
pub use config::{
    IbfConfig, IbfConfigBuilder, DEFAULT_BUCKET_COUNT, DEFAULT_INDEX_SEEDS, DEFAULT_KEY_LENGTH,
    DEFAULT_KEY_SEED,
};
pub use hash_functions::murmur_hash32;
pub use ibf::{Ibf, SetDifference};
pub use indices::IndexScheme;
