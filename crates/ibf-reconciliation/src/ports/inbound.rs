//! Inbound Ports (Driving Ports)
//!
//! The API a party uses to reconcile its key set against a peer's summary.

use crate::domain::{Ibf, SetDifference};
use crate::error::IbfError;
use crate::ports::outbound::KeySource;

/// Set reconciliation API (Driving Port)
///
/// Protocol:
/// 1. Each party summarizes its keys into a filter of the agreed configuration
/// 2. The summaries are exchanged through the transport
/// 3. Each party subtracts the peer's summary from its own and peels the result
pub trait SetReconciliationApi {
    /// Build a filter containing every key of the source
    fn build_filter(&self, source: &dyn KeySource) -> Result<Ibf, IbfError>;

    /// Build a filter and encode it for transport
    fn summarize(&self, source: &dyn KeySource) -> Result<Vec<u8>, IbfError>;

    /// Compute the symmetric difference between the local filter and a peer's
    /// encoded summary.
    ///
    /// `remaining` holds keys only the local side has, `missing` keys only the
    /// peer has. The local filter is not modified. A stalled decode is
    /// returned as `IbfError::DecodeFailed` with the partial result inside.
    fn reconcile(&self, local: &Ibf, remote_summary: &[u8]) -> Result<SetDifference, IbfError>;
}
