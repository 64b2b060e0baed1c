//! CLI argument assembly and top-level parser.

use std::path::PathBuf;

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use vigil_neuron::NeuronArgs;

use crate::{
    args::{LogArgs, MockArgs},
    version,
};

/// Vigil - peer scoring and weight commitment for incentive networks
#[derive(Debug, Parser)]
#[command(author, version = version::SHORT_VERSION, long_version = version::LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Logging configuration.
    #[command(flatten)]
    pub logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse the process arguments, keeping the raw matches so callers can
    /// tell explicit flags from defaults.
    pub fn parse_with_matches() -> (Self, ArgMatches) {
        let matches = Self::command().get_matches();
        let cli = Self::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
        (cli, matches)
    }
}

/// Neuron commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a validator: query sampled peers, score them and commit weights.
    Validator(RunArgs),
    /// Run a miner: serve search requests and keep the peer view current.
    Miner(RunArgs),
}

impl Commands {
    /// Split into the role to run and its arguments.
    pub fn into_parts(self) -> (Role, RunArgs) {
        match self {
            Self::Validator(args) => (Role::Validator, args),
            Self::Miner(args) => (Role::Miner, args),
        }
    }
}

/// Role a neuron runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Scores peers and commits weights.
    Validator,
    /// Serves requests.
    Miner,
}

/// Arguments shared by the `validator` and `miner` commands.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// In-process mock network.
    #[command(flatten)]
    pub mock: MockArgs,

    /// Neuron configuration.
    #[command(flatten)]
    pub neuron: NeuronArgs,
}
