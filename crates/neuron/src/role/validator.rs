//! Validator role: query a random sample of peers and score their answers.

use futures::future::try_join_all;
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;
use vigil_api::{DispatchConfig, PeerTransport, RewardFn};
use vigil_dispatch::{DispatchError, Dispatcher, select_peers};
use vigil_primitives::{PeerInfo, PeerSlot};
use vigil_rewards::{RewardAggregator, RewardBatch, merge_batches};

use super::{NeuronRole, RoundContext, Settled};

type RequestFactory<Req> = Box<dyn Fn(u64) -> Req + Send + Sync>;

/// Queries `num_concurrent_queries` independent peer samples per round and
/// scores the responses with `F`.
pub struct ValidatorRole<T: PeerTransport, F> {
    dispatcher: Dispatcher<T>,
    aggregator: RewardAggregator<F>,
    sample_size: usize,
    batches: usize,
    rng: StdRng,
    request_factory: RequestFactory<T::Request>,
}

impl<T, F> ValidatorRole<T, F>
where
    T: PeerTransport,
    F: RewardFn<T::Response>,
{
    /// Create a validator role.
    ///
    /// `request_factory` builds the request sent to peers for a given step.
    pub fn new(
        transport: T,
        scorer: F,
        config: &impl DispatchConfig,
        request_factory: impl Fn(u64) -> T::Request + Send + Sync + 'static,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::from_config(transport, config),
            aggregator: RewardAggregator::new(scorer),
            sample_size: config.sample_size(),
            batches: config.num_concurrent_queries().max(1),
            rng: StdRng::from_os_rng(),
            request_factory: Box::new(request_factory),
        }
    }

    /// Use a deterministic sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The dispatcher used for queries.
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }
}

impl<T: PeerTransport, F> std::fmt::Debug for ValidatorRole<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRole")
            .field("sample_size", &self.sample_size)
            .field("batches", &self.batches)
            .field("timeout", &self.dispatcher.per_request_timeout())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<T, F> NeuronRole for ValidatorRole<T, F>
where
    T: PeerTransport + 'static,
    F: RewardFn<T::Response> + 'static,
{
    type Response = T::Response;

    fn name(&self) -> &'static str {
        "validator"
    }

    fn scores_peers(&self) -> bool {
        true
    }

    async fn query(
        &mut self,
        ctx: RoundContext<'_>,
    ) -> Result<Vec<Settled<T::Response>>, DispatchError> {
        let peer_count = ctx.metagraph.len();
        let selections: Vec<Vec<(PeerSlot, PeerInfo)>> = (0..self.batches)
            .map(|_| {
                select_peers(&mut self.rng, peer_count, self.sample_size)
                    .into_iter()
                    .filter_map(|slot| ctx.metagraph.peer(slot).map(|peer| (slot, peer.clone())))
                    .collect()
            })
            .collect();

        let request = (self.request_factory)(ctx.step);
        debug!(
            step = ctx.step,
            batches = selections.len(),
            peers = peer_count,
            "dispatching forward batches"
        );

        let dispatcher = &self.dispatcher;
        try_join_all(
            selections
                .iter()
                .map(|targets| dispatcher.dispatch(targets, &request, ctx.stop)),
        )
        .await
    }

    fn aggregate(&self, batches: &[Settled<T::Response>]) -> RewardBatch {
        merge_batches(batches.iter().map(|settled| self.aggregator.aggregate(settled)))
    }
}
