//! Miner role: serve search requests from registered callers.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};
use vigil_dispatch::DispatchError;
use vigil_primitives::{PeerIdentity, SearchRequest, SearchResponse, SearchResult};
use vigil_rewards::RewardBatch;

use super::{NeuronRole, RoundContext, Settled};
use crate::error::{BackendError, Rejection};
use crate::metagraph::Metagraph;

/// Source of search results for a miner.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait SearchBackend: Send + Sync {
    /// Look up `query`. `Ok(None)` means nothing was found.
    async fn search(&self, query: &str) -> Result<Option<SearchResult>, BackendError>;
}

/// Request gating and handling for a miner.
///
/// Cheap to clone; clones share the metagraph view, so a transport server can
/// hold one while the neuron keeps it current.
#[derive(Debug, Clone)]
pub struct MinerService<B> {
    backend: B,
    metagraph: Arc<RwLock<Metagraph>>,
}

impl<B: SearchBackend> MinerService<B> {
    /// Create a service with an empty metagraph view.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            metagraph: Arc::default(),
        }
    }

    /// Replace the metagraph view used for gating.
    pub fn update_metagraph(&self, metagraph: Metagraph) {
        *self.metagraph.write() = metagraph;
    }

    /// Reject empty queries and callers outside the metagraph.
    pub fn blacklist(&self, request: &SearchRequest, caller: &PeerIdentity) -> Result<(), Rejection> {
        if request.is_blank() {
            return Err(Rejection::EmptyQuery);
        }
        if !self.metagraph.read().contains(caller) {
            return Err(Rejection::UnknownCaller(caller.clone()));
        }
        Ok(())
    }

    /// Serving priority of `caller`: its stake, or zero if unknown.
    pub fn priority(&self, caller: &PeerIdentity) -> f64 {
        self.metagraph.read().stake_of(caller).unwrap_or_default()
    }

    /// Gate and answer a request.
    ///
    /// Backend failures produce an empty response instead of an error.
    pub async fn handle(
        &self,
        request: &SearchRequest,
        caller: &PeerIdentity,
    ) -> Result<SearchResponse, Rejection> {
        self.blacklist(request, caller)?;

        match self.backend.search(&request.query).await {
            Ok(Some(result)) => Ok(SearchResponse::found(result)),
            Ok(None) => Ok(SearchResponse::empty()),
            Err(err) => {
                warn!(%caller, error = %err, "search backend failed, answering empty");
                Ok(SearchResponse::empty())
            }
        }
    }
}

/// Miner role. Never queries peers or commits weights; keeps the
/// [`MinerService`] metagraph view current on every resync.
#[derive(Debug, Clone)]
pub struct MinerRole<B> {
    service: MinerService<B>,
}

impl<B: SearchBackend> MinerRole<B> {
    /// Create a miner role around `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            service: MinerService::new(backend),
        }
    }

    /// Service handle for a transport server.
    pub fn service(&self) -> MinerService<B>
    where
        B: Clone,
    {
        self.service.clone()
    }
}

#[async_trait::async_trait]
impl<B: SearchBackend + 'static> NeuronRole for MinerRole<B> {
    type Response = SearchResponse;

    fn name(&self) -> &'static str {
        "miner"
    }

    fn scores_peers(&self) -> bool {
        false
    }

    fn on_resync(&mut self, metagraph: &Metagraph) {
        debug!(peers = metagraph.len(), "refreshing miner metagraph view");
        self.service.update_metagraph(metagraph.clone());
    }

    async fn query(
        &mut self,
        _ctx: RoundContext<'_>,
    ) -> Result<Vec<Settled<SearchResponse>>, DispatchError> {
        Ok(Vec::new())
    }

    fn aggregate(&self, _batches: &[Settled<SearchResponse>]) -> RewardBatch {
        RewardBatch::default()
    }
}
