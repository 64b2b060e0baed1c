//! In-process network for `--mock` runs.
//!
//! The ledger is a [`MockLedger`] that advances on every block read. Every
//! peer except the local one is served by a [`MinerService`] with a
//! [`MockSearchBackend`] of varying quality, reached over a
//! [`LoopbackTransport`].

use std::{collections::HashMap, sync::Arc, time::Duration};

use vigil_api::{PeerTransport, TransportError};
use vigil_neuron::{BackendError, Metagraph, MinerService, SearchBackend};
use vigil_primitives::{PeerIdentity, PeerInfo, SearchRequest, SearchResponse, SearchResult};
use vigil_test_utils::{MockLedger, generate_peers};

use crate::args::MockArgs;

/// Placeholder image payload returned by complete mock results.
const MOCK_IMAGE_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

/// Highest [`MockSearchBackend`] quality level.
pub const MAX_MOCK_QUALITY: u8 = 3;

/// Search backend answering from the query text alone.
///
/// `quality` controls which result fields are filled:
/// 0 finds nothing, 1 adds the url, 2 adds title and preview, 3 adds an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSearchBackend {
    quality: u8,
}

impl MockSearchBackend {
    /// Create a backend with the given quality, capped at [`MAX_MOCK_QUALITY`].
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.min(MAX_MOCK_QUALITY),
        }
    }

    /// A backend that fills every field.
    pub fn complete() -> Self {
        Self::new(MAX_MOCK_QUALITY)
    }

    /// Quality level.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

#[async_trait::async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(&self, query: &str) -> Result<Option<SearchResult>, BackendError> {
        if self.quality == 0 {
            return Ok(None);
        }

        let mut result = SearchResult {
            host_url: format!("https://search.invalid/?q={}", query.trim().replace(' ', "+")),
            ..Default::default()
        };
        if self.quality >= 2 {
            result.title = format!("Results for {}", query.trim());
            result.preview_text = format!("Top match for \"{}\"", query.trim());
        }
        if self.quality >= 3 {
            result.image_base64 = MOCK_IMAGE_BASE64.to_string();
        }
        Ok(Some(result))
    }
}

/// Transport that hands requests straight to in-process miner services.
#[derive(Debug, Clone)]
pub struct LoopbackTransport {
    caller: PeerIdentity,
    miners: Arc<HashMap<PeerIdentity, MinerService<MockSearchBackend>>>,
}

impl LoopbackTransport {
    /// Create a transport sending requests as `caller`.
    pub fn new(
        caller: PeerIdentity,
        miners: HashMap<PeerIdentity, MinerService<MockSearchBackend>>,
    ) -> Self {
        Self {
            caller,
            miners: Arc::new(miners),
        }
    }

    /// Number of reachable miners.
    pub fn miner_count(&self) -> usize {
        self.miners.len()
    }
}

#[async_trait::async_trait]
impl PeerTransport for LoopbackTransport {
    type Request = SearchRequest;
    type Response = SearchResponse;

    async fn query(
        &self,
        peer: &PeerInfo,
        request: &SearchRequest,
        _timeout: Duration,
    ) -> Result<SearchResponse, TransportError> {
        let Some(miner) = self.miners.get(&peer.identity) else {
            return Err(TransportError::Unreachable {
                peer: peer.identity.clone(),
                reason: "no miner serving this identity".to_string(),
            });
        };

        miner
            .handle(request, &self.caller)
            .await
            .map_err(|rejection| rejection.into_transport_error(peer.identity.clone()))
    }
}

/// A mock ledger plus loopback miners for every remote peer.
#[derive(Debug, Clone)]
pub struct MockNetwork {
    ledger: MockLedger,
    transport: LoopbackTransport,
}

impl MockNetwork {
    /// Build a network of `args.peers` peers in which `local` holds slot 0
    /// unless it is already one of the generated identities.
    pub fn new(args: &MockArgs, local: &PeerIdentity) -> Self {
        let mut peers = generate_peers(args.peers.max(1));
        if !peers.iter().any(|peer| &peer.identity == local) {
            if let Some(first) = peers.first_mut() {
                first.identity = local.clone();
            }
        }

        let ledger = MockLedger::new(peers.clone());
        ledger.set_auto_advance(args.blocks_per_read);
        ledger.set_committer(local.clone());

        let metagraph = Metagraph::new(peers.clone(), Vec::new());
        let miners = peers
            .iter()
            .enumerate()
            .filter(|(_, peer)| &peer.identity != local)
            .map(|(i, peer)| {
                let service = MinerService::new(MockSearchBackend::new((i % 4) as u8));
                service.update_metagraph(metagraph.clone());
                (peer.identity.clone(), service)
            })
            .collect();

        Self {
            ledger,
            transport: LoopbackTransport::new(local.clone(), miners),
        }
    }

    /// Handle to the mock ledger.
    pub fn ledger(&self) -> MockLedger {
        self.ledger.clone()
    }

    /// Transport reaching the mock miners.
    pub fn transport(&self) -> LoopbackTransport {
        self.transport.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_api::{RewardFn, ScoringError};
    use vigil_rewards::SearchResultScorer;

    fn args(peers: usize) -> MockArgs {
        MockArgs {
            enabled: true,
            peers,
            blocks_per_read: 1,
        }
    }

    fn score(response: &SearchResponse) -> Result<f64, ScoringError> {
        SearchResultScorer.score(Some(response))
    }

    #[tokio::test]
    async fn test_backend_quality_levels() {
        assert_eq!(MockSearchBackend::new(0).search("q").await.unwrap(), None);

        let partial = MockSearchBackend::new(1).search("cats").await.unwrap().unwrap();
        assert!(!partial.host_url.is_empty());
        assert!(partial.title.is_empty());
        assert!(partial.image_base64.is_empty());

        let complete = MockSearchBackend::complete().search("cats").await.unwrap().unwrap();
        assert!(!complete.title.is_empty());
        assert!(!complete.preview_text.is_empty());
        assert!(!complete.image_base64.is_empty());

        assert_eq!(MockSearchBackend::new(9).quality(), MAX_MOCK_QUALITY);
    }

    #[tokio::test]
    async fn test_loopback_scores_vary_by_peer() {
        let local = PeerIdentity::from("peer-0");
        let network = MockNetwork::new(&args(4), &local);
        let transport = network.transport();
        assert_eq!(transport.miner_count(), 3);

        let request = SearchRequest::new("test search query");
        let peers = network.ledger().peers();
        let timeout = Duration::from_secs(1);

        let mut scores = Vec::new();
        for peer in peers.iter().skip(1) {
            let response = transport.query(peer, &request, timeout).await.unwrap();
            scores.push(score(&response).unwrap());
        }
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 0.2).abs() < 1e-9);
        assert!((scores[1] - 0.5).abs() < 1e-9);
        assert!((scores[2] - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_local_peer_is_unreachable() {
        let local = PeerIdentity::from("peer-0");
        let network = MockNetwork::new(&args(2), &local);
        let peers = network.ledger().peers();

        let err = network
            .transport()
            .query(&peers[0], &SearchRequest::new("q"), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let local = PeerIdentity::from("peer-0");
        let network = MockNetwork::new(&args(2), &local);
        let peers = network.ledger().peers();

        let err = network
            .transport()
            .query(&peers[1], &SearchRequest::new("  "), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Rejected { .. }));
    }

    #[test]
    fn test_custom_identity_takes_first_slot() {
        let local = PeerIdentity::from("validator-a");
        let network = MockNetwork::new(&args(3), &local);
        let peers = network.ledger().peers();

        assert_eq!(peers[0].identity, local);
        assert_eq!(network.transport().miner_count(), 2);
    }
}
