//! CLI arguments for a neuron.

use std::time::Duration;

use clap::Args;
use serde::{Deserialize, Serialize};
use vigil_api::{DispatchConfig, EpochConfig, ScoreConfig, WeightConfig};
use vigil_dispatch::DispatchArgs;
use vigil_epoch::EpochArgs;
use vigil_scores::ScoreArgs;
use vigil_weights::WeightArgs;

/// Neuron arguments, grouping every component's configuration.
#[derive(Debug, Args, Clone, Default, PartialEq, Serialize, Deserialize)]
#[command(next_help_heading = "Neuron")]
#[serde(default)]
pub struct NeuronArgs {
    /// Identity of the local node in the peer set.
    #[arg(long = "neuron.identity", value_name = "KEY")]
    pub identity: Option<String>,

    /// Pause between rounds, in milliseconds.
    ///
    /// Defaults to 0 for validators and 1000 for miners.
    #[arg(long = "neuron.round-interval-ms", value_name = "MS")]
    pub round_interval_ms: Option<u64>,

    /// Seed for peer sampling. Random if unset.
    #[arg(long = "neuron.seed")]
    pub seed: Option<u64>,

    /// Epoch scheduling.
    #[command(flatten)]
    pub epoch: EpochArgs,

    /// Sampling and dispatch.
    #[command(flatten)]
    pub dispatch: DispatchArgs,

    /// Score smoothing.
    #[command(flatten)]
    pub scores: ScoreArgs,

    /// Weight quantization.
    #[command(flatten)]
    pub weights: WeightArgs,
}

impl NeuronArgs {
    /// Validate every component's arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.identity.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err("neuron.identity must not be empty".to_string());
        }
        self.epoch.validate()?;
        self.dispatch.validate()?;
        self.scores.validate()?;
        self.weights.validate()
    }

    /// Pause between rounds, falling back to `default_ms`.
    pub fn round_interval(&self, default_ms: u64) -> Duration {
        Duration::from_millis(self.round_interval_ms.unwrap_or(default_ms))
    }
}

impl EpochConfig for NeuronArgs {
    fn epoch_length(&self) -> u64 {
        self.epoch.epoch_length()
    }

    fn weight_commit_disabled(&self) -> bool {
        self.epoch.weight_commit_disabled()
    }
}

impl DispatchConfig for NeuronArgs {
    fn sample_size(&self) -> usize {
        self.dispatch.sample_size()
    }

    fn num_concurrent_queries(&self) -> usize {
        self.dispatch.num_concurrent_queries()
    }

    fn per_request_timeout(&self) -> Duration {
        self.dispatch.per_request_timeout()
    }
}

impl ScoreConfig for NeuronArgs {
    fn moving_average_alpha(&self) -> f64 {
        self.scores.moving_average_alpha()
    }
}

impl WeightConfig for NeuronArgs {
    fn max_weight_value(&self) -> u16 {
        self.weights.max_weight_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_MINER_ROUND_INTERVAL_MS, DEFAULT_VALIDATOR_ROUND_INTERVAL_MS};

    #[test]
    fn test_defaults_validate() {
        let args = NeuronArgs::default();
        assert!(args.validate().is_ok());
        assert_eq!(args.epoch_length(), 100);
        assert_eq!(args.moving_average_alpha(), 0.5);
        assert_eq!(args.max_weight_value(), 65535);
        assert_eq!(
            args.round_interval(DEFAULT_VALIDATOR_ROUND_INTERVAL_MS),
            Duration::ZERO
        );
        assert_eq!(
            args.round_interval(DEFAULT_MINER_ROUND_INTERVAL_MS),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_component_errors_surface() {
        let mut args = NeuronArgs::default();
        args.scores.moving_average_alpha = 2.0;
        assert!(args.validate().unwrap_err().contains("scores.alpha"));

        let args = NeuronArgs {
            identity: Some(" ".into()),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }
}
