//! Weight commitment preparation and submission.

use tracing::{debug, info};
use vigil_api::{LedgerClient, WeightConfig};
use vigil_primitives::{MAX_WEIGHT, PeerIdentity};

use crate::commitment::WeightCommitment;
use crate::error::PublishError;
use crate::normalize::{normalize, quantize};

/// Normalizes score snapshots and commits them to the ledger.
///
/// Commit failures are returned to the caller; there is no local retry. The
/// next due epoch simply tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightPublisher {
    max_weight: u16,
}

impl Default for WeightPublisher {
    fn default() -> Self {
        Self::new(MAX_WEIGHT)
    }
}

impl WeightPublisher {
    /// Create a publisher quantizing to `[0, max_weight]`.
    pub fn new(max_weight: u16) -> Self {
        Self { max_weight }
    }

    /// Create a publisher from configuration.
    pub fn from_config(config: &impl WeightConfig) -> Self {
        Self::new(config.max_weight_value())
    }

    /// Largest quantized weight.
    pub fn max_weight(&self) -> u16 {
        self.max_weight
    }

    /// Build a commitment from a score snapshot without submitting it.
    pub fn prepare(
        &self,
        identities: &[PeerIdentity],
        scores: &[f64],
    ) -> Result<WeightCommitment, PublishError> {
        if identities.len() != scores.len() {
            return Err(PublishError::LengthMismatch {
                identities: identities.len(),
                scores: scores.len(),
            });
        }

        let normalized = normalize(scores)?;
        let weights = quantize(&normalized, self.max_weight);
        Ok(WeightCommitment {
            identities: identities.to_vec(),
            weights,
        })
    }

    /// Prepare a commitment and submit it to `ledger`.
    ///
    /// Nothing is submitted when preparation fails.
    pub async fn publish<L: LedgerClient>(
        &self,
        ledger: &L,
        identities: &[PeerIdentity],
        scores: &[f64],
    ) -> Result<WeightCommitment, PublishError> {
        let commitment = self.prepare(identities, scores)?;
        debug!(
            peers = commitment.len(),
            total = commitment.total(),
            "submitting weight commitment"
        );

        ledger
            .commit_weights(&commitment.identities, &commitment.weights)
            .await?;

        info!(peers = commitment.len(), "weights committed");
        Ok(commitment)
    }
}
