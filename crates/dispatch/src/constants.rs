//! Default constants for sampling and dispatch.

/// Default number of peers queried per forward batch.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Default number of forward batches per round.
pub const DEFAULT_NUM_CONCURRENT_QUERIES: usize = 1;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_PER_REQUEST_TIMEOUT_MS: u64 = 10_000;
