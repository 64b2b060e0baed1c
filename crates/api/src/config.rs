//! Configuration traits for the scoring loop components.

use std::time::Duration;

/// Epoch scheduling configuration.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait EpochConfig {
    /// Number of blocks after which a resync or commit becomes due.
    fn epoch_length(&self) -> u64;

    /// Whether weight commits are administratively disabled.
    fn weight_commit_disabled(&self) -> bool;
}

/// Peer sampling and query dispatch configuration.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait DispatchConfig {
    /// Number of peers sampled per forward batch.
    fn sample_size(&self) -> usize;

    /// Number of forward batches run concurrently each round.
    fn num_concurrent_queries(&self) -> usize;

    /// Upper bound on a single peer query.
    fn per_request_timeout(&self) -> Duration;
}

/// Score smoothing configuration.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ScoreConfig {
    /// EMA smoothing factor in `(0, 1]`.
    fn moving_average_alpha(&self) -> f64;
}

/// Weight quantization configuration.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait WeightConfig {
    /// Largest quantized weight value.
    fn max_weight_value(&self) -> u16;
}
