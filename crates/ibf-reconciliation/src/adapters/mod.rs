//! Adapters Layer (Driven Adapters)
//!
//! Contains implementations of driven ports.
//!
//! ## Adapters
//!
//! - `BincodeCodec` / `JsonCodec` - Wire framing of filters for transport
//! - `StaticKeys` / `ContentHashKeys` - Key sources

pub mod codec;
pub mod key_source;

pub use codec::{BincodeCodec, JsonCodec, SERIAL_VERSION};
pub use key_source::{ContentHashKeys, StaticKeys};
