//! Reward aggregation.
//!
//! Turns the settled outcomes of a round into a reward vector aligned with
//! the sampled slots. Scoring is delegated to a pluggable
//! [`RewardFn`](vigil_api::RewardFn); [`SearchResultScorer`] is the default
//! for the search protocol.

mod aggregator;
mod batch;
mod search;

pub use aggregator::RewardAggregator;
pub use batch::{RewardBatch, merge_batches};
pub use search::SearchResultScorer;
