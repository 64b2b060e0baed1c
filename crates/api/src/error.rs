//! Error types reported by collaborators.

use vigil_primitives::{PeerIdentity, PeerSlot};

/// Errors reported by a [`LedgerClient`](crate::LedgerClient) read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// The ledger endpoint could not be reached.
    #[error("ledger unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// The requested slot does not exist in the current peer set.
    #[error("unknown peer slot {0}")]
    UnknownSlot(PeerSlot),

    /// The ledger answered with something that could not be interpreted.
    #[error("invalid ledger response: {reason}")]
    InvalidResponse {
        /// Description of the failure.
        reason: String,
    },
}

/// Errors reported when submitting a weight commitment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommitError {
    /// The ledger rejected the transaction.
    #[error("weight commit rejected: {reason}")]
    Rejected {
        /// Reason given by the ledger.
        reason: String,
    },

    /// The commitment could not be submitted at all.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors reported by a [`PeerTransport`](crate::PeerTransport) exchange.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The peer could not be reached.
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable {
        /// The peer that was queried.
        peer: PeerIdentity,
        /// Description of the failure.
        reason: String,
    },

    /// The peer refused to serve the request.
    #[error("peer {peer} rejected request: {reason}")]
    Rejected {
        /// The peer that was queried.
        peer: PeerIdentity,
        /// Reason given by the peer.
        reason: String,
    },

    /// The peer answered but the response could not be decoded.
    #[error("malformed response from {peer}: {reason}")]
    Malformed {
        /// The peer that was queried.
        peer: PeerIdentity,
        /// Description of the decoding failure.
        reason: String,
    },
}

/// Errors raised by a [`RewardFn`](crate::RewardFn) on a single response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The response content could not be evaluated.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Any other scoring failure.
    #[error("scoring failed: {0}")]
    Other(String),
}
