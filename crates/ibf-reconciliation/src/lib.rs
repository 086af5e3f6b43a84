//! # IBF Reconciliation
//!
//! Set reconciliation with invertible Bloom filters (IBF / IBLT).
//!
//! Two parties each summarize a large set of fixed-length keys (e.g.
//! transaction ids) into a fixed-size filter. Subtracting one summary from
//! the other and peeling the result recovers the symmetric difference without
//! either side ever sending its full set.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `Ibf`: Bucket array with add / delete / subtract / decode
//!   - `Bucket`: Count, key XOR-sum and hash XOR-sum of the keys mapped to it
//!   - `IbfConfig`: Configuration with validation
//!   - `IbfConfigBuilder`: Fluent builder for configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SetReconciliationApi`: Driving port (inbound API)
//!   - `KeySource`, `FilterCodec`: Driven ports
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `ReconciliationService`: Implements `SetReconciliationApi`
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `BincodeCodec`, `JsonCodec`: Wire framing
//!   - `StaticKeys`, `ContentHashKeys`: Key sources
//!
//! ## Invariants
//!
//! - **Inverse law**: `add(k)` followed by `delete(k)` restores every bucket exactly
//! - **Comparability**: only filters with identical configuration can be subtracted
//! - **Honest failure**: decode either empties the filter or returns `DecodeFailed`
//!
//! ## Usage Example
//!
//! ```
//! use ibf_reconciliation::Ibf;
//!
//! let mut ours = Ibf::new(1024)?;
//! let mut theirs = Ibf::new(1024)?;
//!
//! ours.add(&[1u8; 32])?;
//! ours.add(&[2u8; 32])?;
//! theirs.add(&[2u8; 32])?;
//! theirs.add(&[3u8; 32])?;
//!
//! ours.subtract(&theirs)?;
//! let diff = ours.decode()?;
//!
//! assert_eq!(diff.remaining, vec![vec![1u8; 32]]);
//! assert_eq!(diff.missing, vec![vec![3u8; 32]]);
//! # Ok::<(), ibf_reconciliation::IbfError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{BincodeCodec, ContentHashKeys, JsonCodec, StaticKeys};
pub use domain::{Bucket, Ibf, IbfConfig, IbfConfigBuilder, IndexScheme, SetDifference};
pub use error::{ConfigMismatch, DecodeFailed, IbfError};
pub use ports::{FilterCodec, KeySource, SetReconciliationApi};
pub use service::ReconciliationService;
