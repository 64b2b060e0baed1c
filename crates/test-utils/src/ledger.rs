//! Mock ledger client.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;
use vigil_api::{CommitError, LedgerClient, LedgerError};
use vigil_primitives::{BlockNumber, PeerIdentity, PeerInfo, PeerSlot};

/// A weight commitment received by [`MockLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    /// Block height at which the commit arrived.
    pub block: BlockNumber,
    /// Committed identities, in order.
    pub identities: Vec<PeerIdentity>,
    /// Committed weights, parallel to `identities`.
    pub weights: Vec<u16>,
}

#[derive(Debug, Default)]
struct LedgerState {
    block: BlockNumber,
    auto_advance: BlockNumber,
    peers: Vec<PeerInfo>,
    last_update: Vec<BlockNumber>,
    deregistered: HashSet<PeerIdentity>,
    committer: Option<PeerIdentity>,
    commits: Vec<RecordedCommit>,
    peer_set_calls: usize,
    fail_block_reads: bool,
    fail_registration: bool,
    fail_peer_set: bool,
    fail_commits: bool,
}

impl LedgerState {
    fn slot_of(&self, identity: &PeerIdentity) -> Option<usize> {
        self.peers.iter().position(|peer| &peer.identity == identity)
    }
}

/// Scriptable in-memory ledger.
///
/// A peer is registered while it is in the peer set and has not been
/// [deregistered](Self::deregister). When a committer is set, a successful
/// commit moves that peer's last update block to the current block, as a
/// real chain does.
#[derive(Debug, Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MockLedger {
    /// Create a ledger with the given peer set at block 0.
    pub fn new(peers: Vec<PeerInfo>) -> Self {
        let ledger = Self::default();
        ledger.set_peers(peers);
        ledger
    }

    /// Set the block height.
    pub fn set_block(&self, block: BlockNumber) {
        self.state.lock().block = block;
    }

    /// Advance the block height by `blocks`.
    pub fn advance(&self, blocks: BlockNumber) {
        let mut state = self.state.lock();
        state.block = state.block.saturating_add(blocks);
    }

    /// Advance the block height by `blocks` on every `current_block` read.
    pub fn set_auto_advance(&self, blocks: BlockNumber) {
        self.state.lock().auto_advance = blocks;
    }

    /// Current block height, without auto advancing.
    pub fn block(&self) -> BlockNumber {
        self.state.lock().block
    }

    /// Replace the peer set. Last update blocks follow identities; new peers
    /// start at block 0.
    pub fn set_peers(&self, peers: Vec<PeerInfo>) {
        let mut state = self.state.lock();
        let last_update = peers
            .iter()
            .map(|peer| {
                state
                    .slot_of(&peer.identity)
                    .and_then(|slot| state.last_update.get(slot).copied())
                    .unwrap_or_default()
            })
            .collect();
        state.peers = peers;
        state.last_update = last_update;
    }

    /// The current peer set.
    pub fn peers(&self) -> Vec<PeerInfo> {
        self.state.lock().peers.clone()
    }

    /// Set the last update block of `slot`. Ignored for unknown slots.
    pub fn set_last_update(&self, slot: PeerSlot, block: BlockNumber) {
        if let Some(entry) = self.state.lock().last_update.get_mut(slot.index()) {
            *entry = block;
        }
    }

    /// Mark `identity` as no longer registered.
    pub fn deregister(&self, identity: impl Into<PeerIdentity>) {
        self.state.lock().deregistered.insert(identity.into());
    }

    /// Peer whose last update block advances on commit.
    pub fn set_committer(&self, identity: impl Into<PeerIdentity>) {
        self.state.lock().committer = Some(identity.into());
    }

    /// Make `current_block` fail.
    pub fn fail_block_reads(&self, fail: bool) {
        self.state.lock().fail_block_reads = fail;
    }

    /// Make `is_registered` fail.
    pub fn fail_registration(&self, fail: bool) {
        self.state.lock().fail_registration = fail;
    }

    /// Make `peer_set` and `last_update_block` fail.
    pub fn fail_peer_set(&self, fail: bool) {
        self.state.lock().fail_peer_set = fail;
    }

    /// Make `commit_weights` fail.
    pub fn fail_commits(&self, fail: bool) {
        self.state.lock().fail_commits = fail;
    }

    /// Commits received so far.
    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.state.lock().commits.clone()
    }

    /// Number of commits received so far.
    pub fn commit_count(&self) -> usize {
        self.state.lock().commits.len()
    }

    /// Number of successful `peer_set` calls.
    pub fn peer_set_calls(&self) -> usize {
        self.state.lock().peer_set_calls
    }
}

fn unavailable() -> LedgerError {
    LedgerError::Unavailable {
        reason: "mock ledger offline".to_string(),
    }
}

#[async_trait::async_trait]
impl LedgerClient for MockLedger {
    async fn current_block(&self) -> Result<BlockNumber, LedgerError> {
        let mut state = self.state.lock();
        if state.fail_block_reads {
            return Err(unavailable());
        }
        state.block = state.block.saturating_add(state.auto_advance);
        Ok(state.block)
    }

    async fn is_registered(&self, identity: &PeerIdentity) -> Result<bool, LedgerError> {
        let state = self.state.lock();
        if state.fail_registration {
            return Err(unavailable());
        }
        Ok(state.slot_of(identity).is_some() && !state.deregistered.contains(identity))
    }

    async fn peer_set(&self) -> Result<Vec<PeerInfo>, LedgerError> {
        let mut state = self.state.lock();
        if state.fail_peer_set {
            return Err(unavailable());
        }
        state.peer_set_calls += 1;
        Ok(state.peers.clone())
    }

    async fn last_update_block(&self, slot: PeerSlot) -> Result<BlockNumber, LedgerError> {
        let state = self.state.lock();
        if state.fail_peer_set {
            return Err(unavailable());
        }
        state
            .last_update
            .get(slot.index())
            .copied()
            .ok_or(LedgerError::UnknownSlot(slot))
    }

    async fn commit_weights(
        &self,
        identities: &[PeerIdentity],
        weights: &[u16],
    ) -> Result<(), CommitError> {
        let mut state = self.state.lock();
        if state.fail_commits {
            return Err(CommitError::Rejected {
                reason: "mock commit failure".to_string(),
            });
        }

        let block = state.block;
        trace!(block, peers = identities.len(), "mock ledger received weights");
        state.commits.push(RecordedCommit {
            block,
            identities: identities.to_vec(),
            weights: weights.to_vec(),
        });

        let committer_slot = state
            .committer
            .as_ref()
            .and_then(|committer| state.slot_of(committer));
        if let Some(entry) = committer_slot.and_then(|slot| state.last_update.get_mut(slot)) {
            *entry = block;
        }
        Ok(())
    }
}
