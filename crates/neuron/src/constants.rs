//! Default constants for the neuron lifecycle.

/// Default pause between validator rounds, in milliseconds.
pub const DEFAULT_VALIDATOR_ROUND_INTERVAL_MS: u64 = 0;

/// Default pause between miner rounds, in milliseconds.
pub const DEFAULT_MINER_ROUND_INTERVAL_MS: u64 = 1_000;
