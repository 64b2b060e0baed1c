//! Role strategies injected into the neuron lifecycle.

mod miner;
mod validator;

pub use miner::{MinerRole, MinerService, SearchBackend};
pub use validator::ValidatorRole;

use vigil_api::QueryOutcome;
use vigil_dispatch::{DispatchError, StopSignal};
use vigil_primitives::{BlockNumber, PeerSlot};
use vigil_rewards::RewardBatch;

use crate::metagraph::Metagraph;

/// Outcomes of one forward batch, one entry per sampled slot.
pub type Settled<R> = Vec<(PeerSlot, QueryOutcome<R>)>;

/// What a role sees of the current round.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    /// Step counter at the start of the round.
    pub step: u64,
    /// Latest observed block height.
    pub block: BlockNumber,
    /// Current metagraph.
    pub metagraph: &'a Metagraph,
    /// Stop signal to honour while waiting on peers.
    pub stop: &'a StopSignal,
}

/// Role-specific behaviour of a neuron.
///
/// The lifecycle (registration checks, resync, commit scheduling) is shared;
/// a role decides whether peers are queried and how their answers become
/// rewards.
#[async_trait::async_trait]
pub trait NeuronRole: Send + 'static {
    /// Response type produced by this role's queries.
    type Response: Send + 'static;

    /// Short role name for logs.
    fn name(&self) -> &'static str;

    /// Whether this role queries peers, maintains scores and commits weights.
    fn scores_peers(&self) -> bool;

    /// Called after every successful metagraph resync.
    fn on_resync(&mut self, _metagraph: &Metagraph) {}

    /// Sample peers and query them. Returns one settled batch per forward
    /// batch.
    async fn query(
        &mut self,
        ctx: RoundContext<'_>,
    ) -> Result<Vec<Settled<Self::Response>>, DispatchError>;

    /// Turn settled batches into a single reward batch.
    fn aggregate(&self, batches: &[Settled<Self::Response>]) -> RewardBatch;
}
