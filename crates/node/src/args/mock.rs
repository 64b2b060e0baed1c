//! Mock network CLI arguments.

use clap::Args;
use serde::{Deserialize, Serialize};

/// Default number of peers in the mock network.
pub const DEFAULT_MOCK_PEERS: usize = 8;

/// Default number of blocks the mock ledger advances per block read.
pub const DEFAULT_MOCK_BLOCKS_PER_READ: u64 = 1;

/// In-process mock network, for running a neuron without an external ledger.
#[derive(Debug, Args, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Mock network")]
#[serde(default)]
pub struct MockArgs {
    /// Run against an in-process ledger and loopback miners.
    #[arg(long = "mock")]
    pub enabled: bool,

    /// Number of peers in the mock peer set.
    #[arg(long = "mock.peers", default_value_t = DEFAULT_MOCK_PEERS)]
    pub peers: usize,

    /// Blocks the mock ledger advances on every block read.
    #[arg(long = "mock.blocks-per-read", default_value_t = DEFAULT_MOCK_BLOCKS_PER_READ)]
    pub blocks_per_read: u64,
}

impl Default for MockArgs {
    fn default() -> Self {
        Self {
            enabled: false,
            peers: DEFAULT_MOCK_PEERS,
            blocks_per_read: DEFAULT_MOCK_BLOCKS_PER_READ,
        }
    }
}

impl MockArgs {
    /// Validate the mock network arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.peers == 0 {
            return Err("mock.peers must be at least 1".to_string());
        }
        Ok(())
    }
}
