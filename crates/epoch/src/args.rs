//! CLI arguments for epoch scheduling.

use clap::Args;
use serde::{Deserialize, Serialize};
use vigil_api::EpochConfig;

use crate::constants::*;

/// Epoch scheduling arguments.
#[derive(Debug, Args, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Epoch")]
#[serde(default)]
pub struct EpochArgs {
    /// Blocks between metagraph resyncs and weight commits.
    #[arg(long = "epoch.length", default_value_t = DEFAULT_EPOCH_LENGTH)]
    pub epoch_length: u64,

    /// Never commit weights to the ledger.
    #[arg(long = "epoch.disable-weight-commit")]
    pub disable_weight_commit: bool,
}

impl Default for EpochArgs {
    fn default() -> Self {
        Self {
            epoch_length: DEFAULT_EPOCH_LENGTH,
            disable_weight_commit: DEFAULT_DISABLE_WEIGHT_COMMIT,
        }
    }
}

impl EpochArgs {
    /// Validate argument values.
    pub fn validate(&self) -> Result<(), String> {
        if self.epoch_length == 0 {
            return Err("epoch length must be at least one block".to_string());
        }
        Ok(())
    }
}

impl EpochConfig for EpochArgs {
    fn epoch_length(&self) -> u64 {
        self.epoch_length
    }

    fn weight_commit_disabled(&self) -> bool {
        self.disable_weight_commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = EpochArgs::default();
        assert_eq!(args.epoch_length(), 100);
        assert!(!args.weight_commit_disabled());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_zero_epoch_rejected() {
        let args = EpochArgs {
            epoch_length: 0,
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }
}
