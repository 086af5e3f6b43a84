//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for reconciling parties
//! - Driven Ports (outbound) - Key sources and wire codecs

pub mod inbound;
pub mod outbound;

pub use inbound::SetReconciliationApi;
pub use outbound::{FilterCodec, KeySource};
