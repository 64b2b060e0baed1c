//! Command line entry point for vigil neurons.
//!
//! - [`Cli`] - Top-level CLI parser
//! - [`Commands`] - `validator` and `miner` subcommands
//! - [`NeuronConfig`] - Layered configuration
//!
//! Configuration is loaded using Figment with the following priority
//! (highest wins):
//!
//! 1. CLI arguments given explicitly on the command line
//! 2. Config file (TOML)
//! 3. Environment variables (`VIGIL_` prefix, `__` between sections)
//! 4. Defaults

pub mod args;
mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod mock;
pub mod version;

pub use cli::{Cli, Commands, Role, RunArgs};
pub use config::NeuronConfig;

use color_eyre::eyre;
use tracing::info;

/// Run a vigil neuron with the process's command line arguments.
///
/// This is the main entry point that should be called from the binary.
pub async fn run() -> eyre::Result<()> {
    color_eyre::install()?;

    let (cli, matches) = Cli::parse_with_matches();

    logging::init_logging(&cli.logs)?;

    info!("Starting vigil {}", version::SHORT_VERSION);

    let (role, args) = cli.command.into_parts();
    let Some((_, run_matches)) = matches.subcommand() else {
        eyre::bail!("no subcommand given");
    };

    commands::run::run(role, args, run_matches).await
}
