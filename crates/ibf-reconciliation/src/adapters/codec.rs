//! Wire codecs for transmitting filters
//!
//! Both codecs wrap the filter in a versioned envelope. The version names the
//! index derivation scheme and bucket layout; peers must agree on it.
//!
//! - `BincodeCodec` - compact binary framing; the version is the first byte
//! - `JsonCodec` - human-readable framing, key sums as hex strings
//!
//! Decoding validates the filter's structure before handing it out, so a
//! malformed payload never yields a partially constructed filter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Ibf;
use crate::error::IbfError;
use crate::ports::FilterCodec;

/// Current wire format version
pub const SERIAL_VERSION: u8 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u8,
    filter: &'a Ibf,
}

#[derive(Deserialize)]
struct Envelope {
    version: u8,
    filter: Ibf,
}

impl Envelope {
    fn into_filter(self) -> Result<Ibf, IbfError> {
        check_version(self.version)?;
        self.filter.validate_structure()?;
        Ok(self.filter)
    }
}

fn check_version(version: u8) -> Result<(), IbfError> {
    if version != SERIAL_VERSION {
        return Err(IbfError::SerializationError(format!(
            "unsupported serial version: expected {}, got {}",
            SERIAL_VERSION, version
        )));
    }
    Ok(())
}

/// Binary codec backed by bincode
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl FilterCodec for BincodeCodec {
    fn encode(&self, filter: &Ibf) -> Result<Vec<u8>, IbfError> {
        let bytes = bincode::serialize(&EnvelopeRef {
            version: SERIAL_VERSION,
            filter,
        })
        .map_err(|e| IbfError::SerializationError(e.to_string()))?;

        debug!(
            bytes = bytes.len(),
            bucket_count = filter.bucket_count(),
            "Encoded IBF"
        );
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Ibf, IbfError> {
        // Reject foreign versions before parsing a layout we may not know
        let version = *bytes.first().ok_or_else(|| {
            IbfError::SerializationError("insufficient data: empty payload".to_string())
        })?;
        check_version(version)?;

        let envelope: Envelope =
            bincode::deserialize(bytes).map_err(|e| IbfError::SerializationError(e.to_string()))?;
        envelope.into_filter()
    }
}

/// JSON codec backed by serde_json
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl FilterCodec for JsonCodec {
    fn encode(&self, filter: &Ibf) -> Result<Vec<u8>, IbfError> {
        serde_json::to_vec(&EnvelopeRef {
            version: SERIAL_VERSION,
            filter,
        })
        .map_err(|e| IbfError::SerializationError(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Ibf, IbfError> {
        let envelope: Envelope = serde_json::from_slice(bytes)
            .map_err(|e| IbfError::SerializationError(e.to_string()))?;
        envelope.into_filter()
    }
}
