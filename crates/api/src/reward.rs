//! Pluggable per-response scoring.

use crate::error::ScoringError;

/// Scores a single peer response.
///
/// `None` stands for a failed query. Implementations should be pure: the
/// same response always yields the same score. The aggregator forces failed
/// queries to `0.0` and isolates errors and panics to the offending peer.
pub trait RewardFn<R>: Send + Sync {
    /// Score one response, typically into `[0, 1]`.
    fn score(&self, response: Option<&R>) -> Result<f64, ScoringError>;
}

impl<R, F> RewardFn<R> for F
where
    F: Fn(Option<&R>) -> Result<f64, ScoringError> + Send + Sync,
{
    fn score(&self, response: Option<&R>) -> Result<f64, ScoringError> {
        self(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_reward_fn() {
        let double = |r: Option<&f64>| Ok::<_, ScoringError>(r.copied().unwrap_or_default() * 2.0);
        assert_eq!(RewardFn::score(&double, Some(&0.25)), Ok(0.5));
        assert_eq!(RewardFn::score(&double, None), Ok(0.0));
    }
}
