//! CLI arguments for weight quantization.

use clap::Args;
use serde::{Deserialize, Serialize};
use vigil_api::WeightConfig;
use vigil_primitives::MAX_WEIGHT;

/// Weight quantization arguments.
#[derive(Debug, Args, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Weights")]
#[serde(default)]
pub struct WeightArgs {
    /// Largest quantized weight value (1..=65535).
    #[arg(long = "weights.max-value", default_value_t = MAX_WEIGHT)]
    pub max_weight_value: u16,
}

impl Default for WeightArgs {
    fn default() -> Self {
        Self {
            max_weight_value: MAX_WEIGHT,
        }
    }
}

impl WeightArgs {
    /// Validate argument values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_weight_value == 0 {
            return Err("weights.max-value must be at least 1".to_string());
        }
        Ok(())
    }
}

impl WeightConfig for WeightArgs {
    fn max_weight_value(&self) -> u16 {
        self.max_weight_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(WeightArgs::default().validate().is_ok());
        assert_eq!(WeightArgs::default().max_weight_value(), 65535);
        assert!(WeightArgs { max_weight_value: 0 }.validate().is_err());
    }
}
