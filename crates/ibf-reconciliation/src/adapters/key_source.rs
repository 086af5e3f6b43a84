//! Key source adapters
//!
//! - `StaticKeys` - keys that are already fixed-length ids
//! - `ContentHashKeys` - derives 32-byte keys as SHA-256 of raw content

use sha2::{Digest, Sha256};

use crate::error::IbfError;
use crate::ports::KeySource;

/// In-memory list of precomputed keys
#[derive(Clone, Debug, Default)]
pub struct StaticKeys {
    keys: Vec<Vec<u8>>,
}

impl StaticKeys {
    pub fn new(keys: Vec<Vec<u8>>) -> Self {
        Self { keys }
    }
}

impl FromIterator<Vec<u8>> for StaticKeys {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl KeySource for StaticKeys {
    fn keys(&self) -> Result<Vec<Vec<u8>>, IbfError> {
        Ok(self.keys.clone())
    }
}

/// Content items keyed by their SHA-256 digest
#[derive(Clone, Debug, Default)]
pub struct ContentHashKeys {
    items: Vec<Vec<u8>>,
}

impl ContentHashKeys {
    pub fn new(items: Vec<Vec<u8>>) -> Self {
        Self { items }
    }

    /// Key of a single content item
    pub fn key_of(content: &[u8]) -> Vec<u8> {
        Sha256::digest(content).to_vec()
    }
}

impl KeySource for ContentHashKeys {
    fn keys(&self) -> Result<Vec<Vec<u8>>, IbfError> {
        Ok(self.items.iter().map(|item| Self::key_of(item)).collect())
    }
}
