//! CLI arguments for score smoothing.

use clap::Args;
use serde::{Deserialize, Serialize};
use vigil_api::ScoreConfig;

use crate::constants::*;

/// Score smoothing arguments.
#[derive(Debug, Args, Clone, PartialEq, Serialize, Deserialize)]
#[command(next_help_heading = "Scores")]
#[serde(default)]
pub struct ScoreArgs {
    /// EMA smoothing factor in (0, 1]. Higher values favour recent rewards.
    #[arg(long = "scores.alpha", default_value_t = DEFAULT_MOVING_AVERAGE_ALPHA)]
    pub moving_average_alpha: f64,
}

impl Default for ScoreArgs {
    fn default() -> Self {
        Self {
            moving_average_alpha: DEFAULT_MOVING_AVERAGE_ALPHA,
        }
    }
}

impl ScoreArgs {
    /// Validate argument values.
    pub fn validate(&self) -> Result<(), String> {
        let alpha = self.moving_average_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(format!("scores.alpha must be in (0, 1], got {alpha}"));
        }
        Ok(())
    }
}

impl ScoreConfig for ScoreArgs {
    fn moving_average_alpha(&self) -> f64 {
        self.moving_average_alpha
    }
}
