//! The neuron lifecycle.
//!
//! A [`Neuron`] owns the epoch state, score store and metagraph and drives
//! rounds sequentially:
//!
//! ```text
//! Idle -> Sampling -> Aggregating -> ScoreUpdate -> (Resync) -> (Commit) -> Idle
//! ```
//!
//! with [`NeuronState::Stopped`] reachable from anywhere on an external stop
//! or loss of registration. What happens in the sampling and aggregation
//! phases is decided by the injected [`NeuronRole`]: a [`ValidatorRole`]
//! queries and scores peers, a [`MinerRole`] only keeps its view of the
//! metagraph current for request gating.

pub mod args;
mod constants;
mod error;
mod handle;
mod metagraph;
mod metrics;
mod neuron;
mod role;
mod state;

pub use args::NeuronArgs;
pub use constants::{DEFAULT_MINER_ROUND_INTERVAL_MS, DEFAULT_VALIDATOR_ROUND_INTERVAL_MS};
pub use error::{BackendError, NeuronError, Rejection};
pub use handle::NeuronHandle;
pub use metagraph::Metagraph;
pub use metrics::NeuronMetrics;
pub use neuron::{CommitStatus, Neuron, RoundOutcome, RoundReport};
pub use role::{
    MinerRole, MinerService, NeuronRole, RoundContext, SearchBackend, Settled, ValidatorRole,
};
pub use state::NeuronState;
