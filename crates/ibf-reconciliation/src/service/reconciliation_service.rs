//! Reconciliation Service
//!
//! Orchestrates filter construction, transport framing and peeling for one
//! party of a set reconciliation.

use tracing::{debug, warn};

use crate::domain::{Ibf, IbfConfig, SetDifference};
use crate::error::IbfError;
use crate::ports::{FilterCodec, KeySource, SetReconciliationApi};

/// Reconciliation Service implementation
///
/// Implements the `SetReconciliationApi` port using an injected codec.
/// Both parties must use the same configuration and codec.
pub struct ReconciliationService<C: FilterCodec> {
    /// Wire codec (driven port)
    codec: C,
    /// Configuration of every filter this service builds
    config: IbfConfig,
}

impl<C: FilterCodec> ReconciliationService<C> {
    /// Create a new service, validating the configuration
    pub fn new(codec: C, config: IbfConfig) -> Result<Self, IbfError> {
        config.validate()?;
        Ok(Self { codec, config })
    }

    pub fn config(&self) -> &IbfConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: FilterCodec> SetReconciliationApi for ReconciliationService<C> {
    fn build_filter(&self, source: &dyn KeySource) -> Result<Ibf, IbfError> {
        let keys = source.keys()?;
        let mut filter = Ibf::with_config(self.config.clone())?;

        let mut saturated = 0usize;
        for key in &keys {
            if !filter.add(key)? {
                saturated += 1;
            }
        }

        debug!(
            keys = keys.len(),
            saturated,
            bucket_count = filter.bucket_count(),
            "Built IBF from key source"
        );
        Ok(filter)
    }

    fn summarize(&self, source: &dyn KeySource) -> Result<Vec<u8>, IbfError> {
        let filter = self.build_filter(source)?;
        self.codec.encode(&filter)
    }

    fn reconcile(&self, local: &Ibf, remote_summary: &[u8]) -> Result<SetDifference, IbfError> {
        let remote = self.codec.decode(remote_summary)?;

        let mut difference = local.clone();
        difference.subtract(&remote)?;

        match difference.decode() {
            Ok(diff) => {
                debug!(
                    remaining = diff.remaining.len(),
                    missing = diff.missing.len(),
                    "Reconciled with peer summary"
                );
                Ok(diff)
            }
            Err(failed) => {
                warn!(
                    residual_buckets = failed.residual_buckets,
                    "Reconciliation inconclusive, peer difference exceeds filter capacity"
                );
                Err(failed.into())
            }
        }
    }
}
