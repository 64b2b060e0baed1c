//! Figment-based configuration loading.
//!
//! Configuration priority (highest wins):
//! 1. CLI arguments given explicitly (applied after Figment load)
//! 2. Config file (TOML)
//! 3. Environment variables (`VIGIL_` prefix)
//! 4. Defaults
//!
//! Environment keys use `__` between sections, so
//! `VIGIL_NEURON__DISPATCH__SAMPLE_SIZE=4` sets `neuron.dispatch.sample_size`.

use std::path::Path;

use clap::{ArgMatches, parser::ValueSource};
use eyre::{Result, WrapErr, eyre};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use vigil_neuron::NeuronArgs;
use vigil_primitives::PeerIdentity;

use crate::{args::MockArgs, cli::RunArgs};

/// Identity used when none is configured. Matches the first mock peer.
pub const DEFAULT_IDENTITY: &str = "peer-0";

/// Complete neuron configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuronConfig {
    /// Neuron configuration.
    pub neuron: NeuronArgs,

    /// Mock network configuration.
    pub mock: MockArgs,
}

impl NeuronConfig {
    /// Load configuration from defaults, environment, and config file.
    /// CLI overrides should be applied separately after loading.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("VIGIL_").split("__"));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(eyre!("config file {} does not exist", path.display()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().wrap_err("Failed to load configuration")
    }

    /// Overwrite fields with the values given explicitly on the command line.
    ///
    /// `matches` are the matches of the subcommand that produced `args`.
    /// Flags left at their clap defaults do not override the file or the
    /// environment.
    pub fn apply_cli(&mut self, args: &RunArgs, matches: &ArgMatches) {
        let explicit = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        let cli = &args.neuron;
        let neuron = &mut self.neuron;
        if explicit("identity") {
            neuron.identity.clone_from(&cli.identity);
        }
        if explicit("round_interval_ms") {
            neuron.round_interval_ms = cli.round_interval_ms;
        }
        if explicit("seed") {
            neuron.seed = cli.seed;
        }
        if explicit("epoch_length") {
            neuron.epoch.epoch_length = cli.epoch.epoch_length;
        }
        if explicit("disable_weight_commit") {
            neuron.epoch.disable_weight_commit = cli.epoch.disable_weight_commit;
        }
        if explicit("sample_size") {
            neuron.dispatch.sample_size = cli.dispatch.sample_size;
        }
        if explicit("num_concurrent_queries") {
            neuron.dispatch.num_concurrent_queries = cli.dispatch.num_concurrent_queries;
        }
        if explicit("per_request_timeout_ms") {
            neuron.dispatch.per_request_timeout_ms = cli.dispatch.per_request_timeout_ms;
        }
        if explicit("moving_average_alpha") {
            neuron.scores.moving_average_alpha = cli.scores.moving_average_alpha;
        }
        if explicit("max_weight_value") {
            neuron.weights.max_weight_value = cli.weights.max_weight_value;
        }

        if explicit("enabled") {
            self.mock.enabled = args.mock.enabled;
        }
        if explicit("peers") {
            self.mock.peers = args.mock.peers;
        }
        if explicit("blocks_per_read") {
            self.mock.blocks_per_read = args.mock.blocks_per_read;
        }
    }

    /// Reject configurations the neuron cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.neuron
            .validate()
            .map_err(|err| eyre!("invalid configuration: {err}"))?;
        self.mock
            .validate()
            .map_err(|err| eyre!("invalid configuration: {err}"))
    }

    /// Identity of the local node.
    pub fn identity(&self) -> PeerIdentity {
        PeerIdentity::from(self.neuron.identity.as_deref().unwrap_or(DEFAULT_IDENTITY))
    }
}
