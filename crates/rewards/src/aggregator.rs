//! Per-response scoring with fault isolation.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{trace, warn};
use vigil_api::{QueryOutcome, RewardFn};
use vigil_primitives::PeerSlot;

use crate::batch::RewardBatch;

/// Scores settled query outcomes with a pluggable [`RewardFn`].
///
/// A timed out or failed query scores exactly `0.0` without consulting the
/// scorer. A scorer error or panic scores `0.0` for that response only.
#[derive(Debug, Clone, Default)]
pub struct RewardAggregator<F> {
    scorer: F,
}

impl<F> RewardAggregator<F> {
    /// Create an aggregator around `scorer`.
    pub fn new(scorer: F) -> Self {
        Self { scorer }
    }

    /// The scoring function.
    pub fn scorer(&self) -> &F {
        &self.scorer
    }

    /// Score every outcome, producing rewards aligned with the slots.
    pub fn aggregate<R>(&self, outcomes: &[(PeerSlot, QueryOutcome<R>)]) -> RewardBatch
    where
        F: RewardFn<R>,
    {
        let mut batch = RewardBatch::default();
        for (slot, outcome) in outcomes {
            let reward = match outcome {
                QueryOutcome::Success(response) => match self.score_isolated(*slot, response) {
                    Some(reward) => reward,
                    None => {
                        batch.scoring_errors += 1;
                        0.0
                    }
                },
                QueryOutcome::Timeout => {
                    batch.timeouts += 1;
                    0.0
                }
                QueryOutcome::TransportFailure(_) => {
                    batch.failures += 1;
                    0.0
                }
            };
            trace!(%slot, reward, "scored response");
            batch.push(*slot, reward);
        }
        batch
    }

    fn score_isolated<R>(&self, slot: PeerSlot, response: &R) -> Option<f64>
    where
        F: RewardFn<R>,
    {
        match catch_unwind(AssertUnwindSafe(|| self.scorer.score(Some(response)))) {
            Ok(Ok(reward)) => Some(reward),
            Ok(Err(err)) => {
                warn!(%slot, error = %err, "scoring failed, rewarding zero");
                None
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!(%slot, panic = %message, "scoring panicked, rewarding zero");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_api::{ScoringError, TransportError};
    use vigil_primitives::PeerIdentity;

    fn identity_scorer(response: Option<&f64>) -> Result<f64, ScoringError> {
        Ok(response.copied().unwrap_or(1.0))
    }

    #[test]
    fn test_failures_score_zero() {
        // would score 1.0 if consulted on a failure
        let aggregator = RewardAggregator::new(identity_scorer);
        let outcomes = vec![
            (PeerSlot::new(0), QueryOutcome::Success(0.7)),
            (PeerSlot::new(1), QueryOutcome::Timeout),
            (
                PeerSlot::new(2),
                QueryOutcome::TransportFailure(TransportError::Unreachable {
                    peer: PeerIdentity::from("peer-2"),
                    reason: "refused".into(),
                }),
            ),
        ];

        let batch = aggregator.aggregate(&outcomes);
        assert_eq!(batch.rewards, vec![0.7, 0.0, 0.0]);
        assert_eq!(
            batch.slots,
            vec![PeerSlot::new(0), PeerSlot::new(1), PeerSlot::new(2)]
        );
        assert_eq!(batch.failures, 1);
        assert_eq!(batch.timeouts, 1);
        assert_eq!(batch.scoring_errors, 0);
    }

    #[test]
    fn test_scoring_error_isolated() {
        let aggregator = RewardAggregator::new(|response: Option<&f64>| match response {
            Some(r) if *r < 0.0 => Err(ScoringError::Malformed("negative".into())),
            Some(r) => Ok(*r),
            None => Ok(0.0),
        });
        let outcomes = vec![
            (PeerSlot::new(0), QueryOutcome::Success(-1.0)),
            (PeerSlot::new(1), QueryOutcome::Success(0.4)),
        ];

        let batch = aggregator.aggregate(&outcomes);
        assert_eq!(batch.rewards, vec![0.0, 0.4]);
        assert_eq!(batch.scoring_errors, 1);
    }

    #[test]
    fn test_scoring_panic_isolated() {
        let aggregator = RewardAggregator::new(|response: Option<&f64>| {
            if response.is_some_and(|r| *r > 0.9) {
                panic!("scorer bug");
            }
            Ok::<_, ScoringError>(response.copied().unwrap_or_default())
        });
        let outcomes = vec![
            (PeerSlot::new(0), QueryOutcome::Success(0.95)),
            (PeerSlot::new(1), QueryOutcome::Success(0.5)),
        ];

        let batch = aggregator.aggregate(&outcomes);
        assert_eq!(batch.rewards, vec![0.0, 0.5]);
        assert_eq!(batch.scoring_errors, 1);
    }

    #[test]
    fn test_empty_outcomes() {
        let aggregator = RewardAggregator::new(identity_scorer);
        let outcomes: Vec<(PeerSlot, QueryOutcome<f64>)> = Vec::new();
        assert!(aggregator.aggregate(&outcomes).is_empty());
    }
}
