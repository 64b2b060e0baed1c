//! The round-driving state machine.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use vigil_api::{EpochConfig, LedgerClient, LedgerError, ScoreConfig, WeightConfig};
use vigil_dispatch::{DispatchError, StopHandle, StopSignal, stop_channel};
use vigil_epoch::{EpochScheduler, EpochState};
use vigil_primitives::{BlockNumber, PeerIdentity, PeerSlot};
use vigil_scores::{ChurnSummary, ScoreStore};
use vigil_weights::{PublishError, WeightPublisher};

use crate::error::NeuronError;
use crate::handle::NeuronHandle;
use crate::metagraph::Metagraph;
use crate::metrics::NeuronMetrics;
use crate::role::{NeuronRole, RoundContext};
use crate::state::{NeuronState, NeuronStatus};

/// How a weight commit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The ledger accepted the weights.
    Committed,
    /// Scores summed to zero; nothing was submitted.
    Degenerate,
    /// The ledger rejected the weights or could not be reached.
    Failed,
}

/// Summary of one completed round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Step the round ran as.
    pub step: u64,
    /// Block height observed at the start of the round.
    pub block: BlockNumber,
    /// Number of slots folded into the scores.
    pub sampled: usize,
    /// Whether the metagraph was resynced.
    pub resynced: bool,
    /// Outcome of the weight commit, if one was due.
    pub commit: Option<CommitStatus>,
}

/// Result of [`Neuron::round`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round ran to completion.
    Completed(RoundReport),
    /// A stop was requested during the round.
    Stopped,
}

/// Drives rounds for a role against a ledger.
///
/// Owns all mutable loop state: the epoch view, the score store and the
/// metagraph. Nothing else mutates them while the loop runs.
pub struct Neuron<L, R> {
    ledger: L,
    role: R,
    identity: PeerIdentity,
    epoch: EpochState,
    scheduler: EpochScheduler,
    scores: ScoreStore,
    publisher: WeightPublisher,
    metagraph: Metagraph,
    self_slot: Option<PeerSlot>,
    round_interval: Duration,
    stop_handle: StopHandle,
    stop: StopSignal,
    status: Arc<NeuronStatus>,
    metrics: NeuronMetrics,
}

impl<L, R> Neuron<L, R>
where
    L: LedgerClient,
    R: NeuronRole,
{
    /// Create a neuron for `identity`.
    pub fn new<C>(
        ledger: L,
        role: R,
        identity: impl Into<PeerIdentity>,
        config: &C,
    ) -> Result<Self, NeuronError>
    where
        C: EpochConfig + ScoreConfig + WeightConfig,
    {
        let (stop_handle, stop) = stop_channel();
        Ok(Self {
            ledger,
            role,
            identity: identity.into(),
            epoch: EpochState::new(config.epoch_length()),
            scheduler: EpochScheduler::from_config(config),
            scores: ScoreStore::from_config(config)?,
            publisher: WeightPublisher::from_config(config),
            metagraph: Metagraph::default(),
            self_slot: None,
            round_interval: Duration::ZERO,
            stop_handle,
            stop,
            status: Arc::default(),
            metrics: NeuronMetrics::default(),
        })
    }

    /// Pause between rounds.
    pub fn with_round_interval(mut self, round_interval: Duration) -> Self {
        self.round_interval = round_interval;
        self
    }

    /// The local identity.
    pub fn identity(&self) -> &PeerIdentity {
        &self.identity
    }

    /// The role strategy.
    pub fn role(&self) -> &R {
        &self.role
    }

    /// Current scores.
    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// Current metagraph.
    pub fn metagraph(&self) -> &Metagraph {
        &self.metagraph
    }

    /// Current epoch view.
    pub fn epoch(&self) -> &EpochState {
        &self.epoch
    }

    /// Slot of the local identity after the last resync.
    pub fn self_slot(&self) -> Option<PeerSlot> {
        self.self_slot
    }

    /// Number of completed rounds.
    pub fn current_step(&self) -> u64 {
        self.epoch.step()
    }

    /// Current phase.
    pub fn state(&self) -> NeuronState {
        self.status.state()
    }

    /// Handle for requesting a cooperative stop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Request a cooperative stop.
    pub fn request_stop(&self) {
        self.stop_handle.stop();
    }

    /// Spawn the run loop onto the current tokio runtime.
    pub fn start(self) -> NeuronHandle
    where
        L: 'static,
    {
        let stop = self.stop_handle.clone();
        let status = Arc::clone(&self.status);
        let task = tokio::spawn(async move {
            let mut neuron = self;
            neuron.run().await
        });
        NeuronHandle::new(stop, status, task)
    }

    /// Run rounds until stopped or deregistered.
    ///
    /// Returns `Ok(())` after a requested stop and
    /// [`NeuronError::NotRegistered`] if the local identity drops out of the
    /// ledger. Every other failure is logged and retried on the next round.
    pub async fn run(&mut self) -> Result<(), NeuronError> {
        info!(identity = %self.identity, role = self.role.name(), "starting neuron");
        let result = self.run_rounds().await;
        self.set_state(NeuronState::Stopped);
        match &result {
            Ok(()) => info!(step = self.current_step(), "neuron stopped"),
            Err(err) => error!(step = self.current_step(), error = %err, "neuron terminated"),
        }
        result
    }

    async fn run_rounds(&mut self) -> Result<(), NeuronError> {
        self.initialize().await?;

        while !self.stop.is_stopped() {
            match self.round().await? {
                RoundOutcome::Stopped => break,
                RoundOutcome::Completed(report) => info!(
                    step = report.step,
                    block = report.block,
                    sampled = report.sampled,
                    resynced = report.resynced,
                    commit = ?report.commit,
                    "round complete"
                ),
            }

            if self.round_interval.is_zero() {
                tokio::task::yield_now().await;
                continue;
            }
            tokio::select! {
                biased;
                _ = self.stop.stopped() => break,
                _ = tokio::time::sleep(self.round_interval) => {}
            }
        }
        Ok(())
    }

    /// Check registration and load the initial metagraph.
    ///
    /// A failed initial resync is logged; it is retried on the first round
    /// since a neuron without a slot is always due for resync.
    pub async fn initialize(&mut self) -> Result<(), NeuronError> {
        self.refresh_block().await;
        self.check_registration().await?;
        if let Err(err) = self.resync().await {
            warn!(error = %err, "initial metagraph sync failed, retrying next round");
        }
        Ok(())
    }

    /// Run a single round.
    pub async fn round(&mut self) -> Result<RoundOutcome, NeuronError> {
        let step = self.epoch.step();
        self.set_state(NeuronState::Idle);
        self.refresh_block().await;
        self.check_registration().await?;

        let mut report = RoundReport {
            step,
            block: self.epoch.current_block(),
            ..Default::default()
        };

        if self.role.scores_peers() {
            self.set_state(NeuronState::Sampling);
            let ctx = RoundContext {
                step,
                block: report.block,
                metagraph: &self.metagraph,
                stop: &self.stop,
            };
            let settled = match self.role.query(ctx).await {
                Ok(settled) => settled,
                Err(DispatchError::Stopped) => return Ok(self.stopped(step)),
            };

            self.set_state(NeuronState::Aggregating);
            let batch = self.role.aggregate(&settled);
            self.metrics
                .record_batch(settled.iter().map(Vec::len).sum(), &batch);

            // Last exit point before the scores change. A round that updates
            // them always runs to completion and counts as a step.
            if self.stop.is_stopped() {
                return Ok(self.stopped(step));
            }

            self.set_state(NeuronState::ScoreUpdate);
            match self.scores.update(&batch.rewards, &batch.slots) {
                Ok(summary) => {
                    report.sampled = summary.sampled;
                    self.metrics
                        .rewards_sanitized_total
                        .increment(summary.sanitized as u64);
                }
                Err(err) => warn!(step, error = %err, "score update rejected"),
            }
        } else if self.stop.is_stopped() {
            return Ok(self.stopped(step));
        }

        if self.scheduler.should_resync(&self.epoch, self.self_slot) {
            self.set_state(NeuronState::Resync);
            match self.resync().await {
                Ok(_) => report.resynced = true,
                Err(err) => {
                    self.metrics.resync_failures_total.increment(1);
                    warn!(step, error = %err, "metagraph sync failed, retrying next round");
                }
            }
        }

        if self.role.scores_peers() && self.scheduler.should_commit(&self.epoch, self.self_slot) {
            self.set_state(NeuronState::Commit);
            report.commit = Some(self.commit(step).await);
        }

        let completed = self.epoch.complete_step();
        self.status.set_step(completed);
        self.metrics.record_round(completed);
        self.set_state(NeuronState::Idle);
        Ok(RoundOutcome::Completed(report))
    }

    /// Refresh the metagraph and remap scores onto it.
    pub async fn resync(&mut self) -> Result<ChurnSummary, LedgerError> {
        let metagraph = Metagraph::sync(&self.ledger).await?;

        let churn = self.scores.resync(&metagraph.identities());
        self.epoch
            .set_last_update_blocks(metagraph.last_update_blocks().to_vec());
        self.self_slot = metagraph.slot_of(&self.identity);
        if self.self_slot.is_none() {
            warn!(identity = %self.identity, "local identity missing from peer set");
        }
        self.role.on_resync(&metagraph);

        self.metrics.resyncs_total.increment(1);
        self.metrics.peers.set(metagraph.len() as f64);
        info!(
            peers = metagraph.len(),
            slot = ?self.self_slot.map(PeerSlot::index),
            added = churn.added,
            removed = churn.removed,
            moved = churn.moved,
            "metagraph synced"
        );
        self.metagraph = metagraph;
        Ok(churn)
    }

    async fn commit(&mut self, step: u64) -> CommitStatus {
        let identities = self.scores.identities().to_vec();
        let snapshot = self.scores.snapshot();

        match self
            .publisher
            .publish(&self.ledger, &identities, &snapshot)
            .await
        {
            Ok(commitment) => {
                self.metrics.commits_total.increment(1);
                info!(step, peers = commitment.len(), "weights committed");
                CommitStatus::Committed
            }
            Err(PublishError::DegenerateScores { sum }) => {
                self.metrics.commits_degenerate_total.increment(1);
                warn!(step, sum, "scores are degenerate, skipping weight commit");
                CommitStatus::Degenerate
            }
            Err(err) => {
                self.metrics.commit_failures_total.increment(1);
                warn!(step, error = %err, "weight commit failed, retrying next epoch");
                CommitStatus::Failed
            }
        }
    }

    async fn refresh_block(&mut self) {
        match self.ledger.current_block().await {
            Ok(block) => {
                self.epoch.observe_block(block);
            }
            Err(err) => warn!(
                step = self.epoch.step(),
                block = self.epoch.current_block(),
                error = %err,
                "failed to read block height, keeping last known"
            ),
        }
    }

    async fn check_registration(&mut self) -> Result<(), NeuronError> {
        match self.ledger.is_registered(&self.identity).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                error!(identity = %self.identity, "identity is no longer registered");
                self.set_state(NeuronState::Stopped);
                Err(NeuronError::NotRegistered(self.identity.clone()))
            }
            Err(err) => {
                warn!(
                    step = self.epoch.step(),
                    error = %err,
                    "registration check failed, assuming still registered"
                );
                Ok(())
            }
        }
    }

    fn stopped(&self, step: u64) -> RoundOutcome {
        debug!(step, "stop requested mid-round");
        self.set_state(NeuronState::Stopped);
        RoundOutcome::Stopped
    }

    fn set_state(&self, state: NeuronState) {
        self.status.set_state(state);
    }
}

impl<L, R> std::fmt::Debug for Neuron<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neuron")
            .field("identity", &self.identity)
            .field("epoch", &self.epoch)
            .field("self_slot", &self.self_slot)
            .field("peers", &self.metagraph.len())
            .field("state", &self.status.state())
            .finish_non_exhaustive()
    }
}
