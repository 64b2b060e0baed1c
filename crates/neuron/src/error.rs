//! Neuron error types.

use vigil_api::TransportError;
use vigil_primitives::PeerIdentity;
use vigil_scores::ScoreError;

/// Errors that end the neuron's run loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuronError {
    /// The local identity is no longer registered on the ledger.
    #[error("identity {0} is not registered")]
    NotRegistered(PeerIdentity),

    /// The score store could not be configured.
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// The spawned run task failed to complete.
    #[error("neuron task failed: {0}")]
    Task(String),
}

/// Reasons a miner refuses to serve a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The query is empty or whitespace.
    #[error("empty query")]
    EmptyQuery,

    /// The caller is not in the metagraph.
    #[error("unknown caller {0}")]
    UnknownCaller(PeerIdentity),
}

impl Rejection {
    /// The transport error a rejected caller observes.
    pub fn into_transport_error(self, peer: PeerIdentity) -> TransportError {
        TransportError::Rejected {
            peer,
            reason: self.to_string(),
        }
    }
}

/// Failure reported by a [`SearchBackend`](crate::SearchBackend).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("search backend failed: {0}")]
pub struct BackendError(pub String);
