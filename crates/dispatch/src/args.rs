//! CLI arguments for peer sampling and dispatch.

use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};
use vigil_api::DispatchConfig;

use crate::constants::*;

/// Sampling and dispatch arguments.
#[derive(Debug, Args, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Dispatch")]
#[serde(default)]
pub struct DispatchArgs {
    /// Number of peers queried per forward batch.
    #[arg(long = "dispatch.sample-size", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Number of forward batches run concurrently each round.
    #[arg(
        long = "dispatch.concurrent-queries",
        default_value_t = DEFAULT_NUM_CONCURRENT_QUERIES
    )]
    pub num_concurrent_queries: usize,

    /// Timeout for a single peer query, in milliseconds.
    #[arg(long = "dispatch.timeout-ms", default_value_t = DEFAULT_PER_REQUEST_TIMEOUT_MS)]
    pub per_request_timeout_ms: u64,
}

impl Default for DispatchArgs {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            num_concurrent_queries: DEFAULT_NUM_CONCURRENT_QUERIES,
            per_request_timeout_ms: DEFAULT_PER_REQUEST_TIMEOUT_MS,
        }
    }
}

impl DispatchArgs {
    /// Validate argument values.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_size == 0 {
            return Err("dispatch.sample-size must be at least 1".to_string());
        }
        if self.num_concurrent_queries == 0 {
            return Err("dispatch.concurrent-queries must be at least 1".to_string());
        }
        if self.per_request_timeout_ms == 0 {
            return Err("dispatch.timeout-ms must be non-zero".to_string());
        }
        Ok(())
    }
}

impl DispatchConfig for DispatchArgs {
    fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn num_concurrent_queries(&self) -> usize {
        self.num_concurrent_queries
    }

    fn per_request_timeout(&self) -> Duration {
        Duration::from_millis(self.per_request_timeout_ms)
    }
}
