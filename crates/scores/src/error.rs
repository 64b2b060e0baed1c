//! Score store error types.

use vigil_primitives::PeerSlot;

/// Errors that can occur when updating scores.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    /// Smoothing factor outside `(0, 1]`.
    #[error("moving average alpha {0} must be in (0, 1]")]
    InvalidAlpha(f64),

    /// Reward and slot vectors have different lengths.
    #[error("{rewards} rewards for {slots} sampled slots")]
    LengthMismatch {
        /// Number of rewards supplied.
        rewards: usize,
        /// Number of slots supplied.
        slots: usize,
    },

    /// A sampled slot is outside the current peer set.
    #[error("slot {slot} out of range for {peers} peers")]
    SlotOutOfRange {
        /// The offending slot.
        slot: PeerSlot,
        /// Current peer set size.
        peers: usize,
    },
}
