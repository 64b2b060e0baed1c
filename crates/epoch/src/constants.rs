//! Default constants for epoch scheduling.

/// Default epoch length in blocks.
pub const DEFAULT_EPOCH_LENGTH: u64 = 100;

/// Weight commits are enabled by default.
pub const DEFAULT_DISABLE_WEIGHT_COMMIT: bool = false;
