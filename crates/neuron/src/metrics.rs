//! Neuron metrics

use metrics::{Counter, Gauge};
use vigil_rewards::RewardBatch;

/// Neuron metrics
#[derive(Clone, Debug)]
pub struct NeuronMetrics {
    /// Number of completed rounds
    pub(crate) rounds_total: Counter,
    /// Number of peer queries issued
    pub(crate) queries_total: Counter,
    /// Number of peer queries that failed in transport
    pub(crate) queries_failed_total: Counter,
    /// Number of peer queries that timed out
    pub(crate) queries_timed_out_total: Counter,
    /// Number of responses whose scoring failed
    pub(crate) scoring_errors_total: Counter,
    /// Number of rewards replaced during sanitization
    pub(crate) rewards_sanitized_total: Counter,
    /// Number of successful metagraph resyncs
    pub(crate) resyncs_total: Counter,
    /// Number of failed metagraph resyncs
    pub(crate) resync_failures_total: Counter,
    /// Number of accepted weight commits
    pub(crate) commits_total: Counter,
    /// Number of rejected or failed weight commits
    pub(crate) commit_failures_total: Counter,
    /// Number of commits skipped because scores were degenerate
    pub(crate) commits_degenerate_total: Counter,
    /// Current step
    pub(crate) step: Gauge,
    /// Current peer set size
    pub(crate) peers: Gauge,
}

impl Default for NeuronMetrics {
    fn default() -> Self {
        Self {
            rounds_total: metrics::counter!("neuron.rounds_total"),
            queries_total: metrics::counter!("neuron.queries_total"),
            queries_failed_total: metrics::counter!("neuron.queries_failed_total"),
            queries_timed_out_total: metrics::counter!("neuron.queries_timed_out_total"),
            scoring_errors_total: metrics::counter!("neuron.scoring_errors_total"),
            rewards_sanitized_total: metrics::counter!("neuron.rewards_sanitized_total"),
            resyncs_total: metrics::counter!("neuron.resyncs_total"),
            resync_failures_total: metrics::counter!("neuron.resync_failures_total"),
            commits_total: metrics::counter!("neuron.commits_total"),
            commit_failures_total: metrics::counter!("neuron.commit_failures_total"),
            commits_degenerate_total: metrics::counter!("neuron.commits_degenerate_total"),
            step: metrics::gauge!("neuron.step"),
            peers: metrics::gauge!("neuron.peers"),
        }
    }
}

impl NeuronMetrics {
    /// Records the queries and rewards of one round.
    pub(crate) fn record_batch(&self, queries: usize, batch: &RewardBatch) {
        self.queries_total.increment(queries as u64);
        self.queries_failed_total.increment(batch.failures as u64);
        self.queries_timed_out_total.increment(batch.timeouts as u64);
        self.scoring_errors_total.increment(batch.scoring_errors as u64);
    }

    /// Records a completed round.
    pub(crate) fn record_round(&self, step: u64) {
        self.rounds_total.increment(1);
        self.step.set(step as f64);
    }
}
