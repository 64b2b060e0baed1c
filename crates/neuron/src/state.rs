//! Lifecycle phases and shared run status.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Phase of the neuron's round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NeuronState {
    /// Between rounds.
    #[default]
    Idle,
    /// Selecting peers and waiting for their responses.
    Sampling,
    /// Turning responses into rewards.
    Aggregating,
    /// Folding rewards into the scores.
    ScoreUpdate,
    /// Refreshing the metagraph.
    Resync,
    /// Publishing weights.
    Commit,
    /// Terminal.
    Stopped,
}

/// Progress shared between the run loop and its handle.
#[derive(Debug, Default)]
pub(crate) struct NeuronStatus {
    step: AtomicU64,
    state: Mutex<NeuronState>,
}

impl NeuronStatus {
    pub(crate) fn step(&self) -> u64 {
        self.step.load(Ordering::Acquire)
    }

    pub(crate) fn set_step(&self, step: u64) {
        self.step.store(step, Ordering::Release);
    }

    pub(crate) fn state(&self) -> NeuronState {
        *self.state.lock()
    }

    pub(crate) fn set_state(&self, state: NeuronState) {
        *self.state.lock() = state;
    }
}
