//! Outbound Ports (Driven Ports)
//!
//! Dependencies the filter needs from surrounding code: where keys come from
//! and how a filter is framed for transport. The core performs no I/O.

use crate::domain::Ibf;
use crate::error::IbfError;

/// Supplies the fixed-length keys held by one party (e.g. transaction ids)
pub trait KeySource {
    /// All keys of this party. Every key must have the filter's key length.
    fn keys(&self) -> Result<Vec<Vec<u8>>, IbfError>;
}

/// Opaque round-trip encoding of a filter's full state.
///
/// `decode(encode(f))` must equal `f` bucket for bucket, and a malformed
/// payload must fail with `SerializationError` instead of producing a
/// partially constructed filter.
pub trait FilterCodec: Send + Sync {
    /// Encode a filter for transport
    fn encode(&self, filter: &Ibf) -> Result<Vec<u8>, IbfError>;

    /// Decode a filter received from a peer
    fn decode(&self, bytes: &[u8]) -> Result<Ibf, IbfError>;
}
