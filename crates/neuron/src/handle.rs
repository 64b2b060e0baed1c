//! Handle to a spawned neuron.

use std::sync::Arc;

use tokio::task::JoinHandle;
use vigil_dispatch::StopHandle;

use crate::error::NeuronError;
use crate::state::{NeuronState, NeuronStatus};

/// Controls a neuron started with [`Neuron::start`](crate::Neuron::start).
#[derive(Debug)]
pub struct NeuronHandle {
    stop: StopHandle,
    status: Arc<NeuronStatus>,
    task: JoinHandle<Result<(), NeuronError>>,
}

impl NeuronHandle {
    pub(crate) fn new(
        stop: StopHandle,
        status: Arc<NeuronStatus>,
        task: JoinHandle<Result<(), NeuronError>>,
    ) -> Self {
        Self { stop, status, task }
    }

    /// A stop handle that outlives [`join`](Self::join), for signal handlers.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Ask the neuron to stop. It exits before starting another round and
    /// drops any in-flight queries.
    pub fn request_stop(&self) {
        self.stop.stop();
    }

    /// Number of completed rounds.
    pub fn current_step(&self) -> u64 {
        self.status.step()
    }

    /// Current phase.
    pub fn state(&self) -> NeuronState {
        self.status.state()
    }

    /// Returns `true` once the run loop has returned.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run loop to return.
    pub async fn join(self) -> Result<(), NeuronError> {
        self.task
            .await
            .map_err(|err| NeuronError::Task(err.to_string()))?
    }
}
