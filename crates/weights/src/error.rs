//! Weight publishing errors.

use vigil_api::CommitError;

/// Errors that can occur when publishing weights.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PublishError {
    /// Scores sum to zero or less (or are not finite); nothing to normalize.
    #[error("degenerate scores: sum {sum} is not positive")]
    DegenerateScores {
        /// The offending sum.
        sum: f64,
    },

    /// Identities and scores are not parallel.
    #[error("{identities} identities for {scores} scores")]
    LengthMismatch {
        /// Number of identities.
        identities: usize,
        /// Number of scores.
        scores: usize,
    },

    /// The ledger did not accept the commitment.
    #[error(transparent)]
    Commit(#[from] CommitError),
}
