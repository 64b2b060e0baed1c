//! The `validator` and `miner` commands.

use clap::ArgMatches;
use eyre::{Result, WrapErr, bail};
use tracing::{info, warn};
use vigil_api::LedgerClient;
use vigil_neuron::{
    DEFAULT_MINER_ROUND_INTERVAL_MS, DEFAULT_VALIDATOR_ROUND_INTERVAL_MS, MinerRole, Neuron,
    NeuronHandle, NeuronRole, ValidatorRole,
};
use vigil_primitives::SearchRequest;
use vigil_rewards::SearchResultScorer;

use crate::{
    cli::{Role, RunArgs},
    config::NeuronConfig,
    mock::{MockNetwork, MockSearchBackend},
};

/// Query sent to sampled peers every round.
pub const DEFAULT_SEARCH_QUERY: &str = "test search query";

/// Load the configuration, start the neuron and wait for it to stop.
///
/// The neuron stops after the round in progress when the process receives
/// Ctrl-C.
pub async fn run(role: Role, args: RunArgs, matches: &ArgMatches) -> Result<()> {
    let mut config = NeuronConfig::load(args.config.as_deref())?;
    config.apply_cli(&args, matches);
    config.validate()?;

    if !config.mock.enabled {
        bail!("no external ledger client is available in this build; run with --mock");
    }

    let identity = config.identity();
    info!(
        %role,
        %identity,
        peers = config.mock.peers,
        epoch_length = config.neuron.epoch.epoch_length,
        "running against the mock network"
    );

    let network = MockNetwork::new(&config.mock, &identity);
    let handle = spawn(role, &config, &network)?;
    wait_for_shutdown(handle).await
}

/// Build the neuron for `role` on `network` and start its run loop.
pub fn spawn(role: Role, config: &NeuronConfig, network: &MockNetwork) -> Result<NeuronHandle> {
    let neuron_args = &config.neuron;
    let identity = config.identity();

    let handle = match role {
        Role::Validator => {
            let mut validator = ValidatorRole::new(
                network.transport(),
                SearchResultScorer,
                neuron_args,
                |_step| SearchRequest::new(DEFAULT_SEARCH_QUERY),
            );
            if let Some(seed) = neuron_args.seed {
                validator = validator.with_seed(seed);
            }
            start(
                network.ledger(),
                validator,
                config,
                DEFAULT_VALIDATOR_ROUND_INTERVAL_MS,
            )?
        }
        Role::Miner => start(
            network.ledger(),
            MinerRole::new(MockSearchBackend::complete()),
            config,
            DEFAULT_MINER_ROUND_INTERVAL_MS,
        )?,
    };

    info!(%role, %identity, "neuron started");
    Ok(handle)
}

fn start<L, R>(
    ledger: L,
    role: R,
    config: &NeuronConfig,
    default_interval_ms: u64,
) -> Result<NeuronHandle>
where
    L: LedgerClient + 'static,
    R: NeuronRole,
{
    let neuron = Neuron::new(ledger, role, config.identity(), &config.neuron)
        .wrap_err("failed to build neuron")?
        .with_round_interval(config.neuron.round_interval(default_interval_ms));
    Ok(neuron.start())
}

async fn wait_for_shutdown(handle: NeuronHandle) -> Result<()> {
    let stop = handle.stop_handle();
    let signals = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl-C, stopping after the current round");
                stop.stop();
            }
            Err(err) => warn!(error = %err, "failed to listen for Ctrl-C"),
        }
    });

    let result = handle.join().await;
    signals.abort();
    result.wrap_err("neuron exited with an error")
}
