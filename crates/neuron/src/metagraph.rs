//! Local view of the registered peer set.

use std::collections::HashSet;

use futures::future::try_join_all;
use vigil_api::{LedgerClient, LedgerError};
use vigil_primitives::{BlockNumber, PeerIdentity, PeerInfo, PeerSlot, Stake};

/// Roster of registered peers, ordered by slot, with each peer's last
/// weight update block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metagraph {
    peers: Vec<PeerInfo>,
    last_update: Vec<BlockNumber>,
}

impl Metagraph {
    /// Create a metagraph. `last_update` is padded with zeros or truncated to
    /// the peer count.
    pub fn new(peers: Vec<PeerInfo>, mut last_update: Vec<BlockNumber>) -> Self {
        last_update.resize(peers.len(), 0);
        Self { peers, last_update }
    }

    /// Fetch the peer set and every slot's last update block from `ledger`.
    ///
    /// A peer set listing the same identity twice is rejected as
    /// [`LedgerError::InvalidResponse`].
    pub async fn sync<L: LedgerClient>(ledger: &L) -> Result<Self, LedgerError> {
        let peers = ledger.peer_set().await?;
        let mut seen = HashSet::with_capacity(peers.len());
        if let Some(duplicate) = peers.iter().find(|peer| !seen.insert(&peer.identity)) {
            return Err(LedgerError::InvalidResponse {
                reason: format!("peer set lists {} more than once", duplicate.identity),
            });
        }
        let last_update =
            try_join_all((0..peers.len()).map(|slot| ledger.last_update_block(PeerSlot::new(slot))))
                .await?;
        Ok(Self { peers, last_update })
    }

    /// Number of peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` if there are no peers.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Peers in slot order.
    pub fn peers(&self) -> &[PeerInfo] {
        &self.peers
    }

    /// The peer in `slot`.
    pub fn peer(&self, slot: PeerSlot) -> Option<&PeerInfo> {
        self.peers.get(slot.index())
    }

    /// Identities in slot order.
    pub fn identities(&self) -> Vec<PeerIdentity> {
        self.peers.iter().map(|peer| peer.identity.clone()).collect()
    }

    /// Last update block per slot.
    pub fn last_update_blocks(&self) -> &[BlockNumber] {
        &self.last_update
    }

    /// Slot currently held by `identity`.
    pub fn slot_of(&self, identity: &PeerIdentity) -> Option<PeerSlot> {
        self.peers
            .iter()
            .position(|peer| &peer.identity == identity)
            .map(PeerSlot::new)
    }

    /// Returns `true` if `identity` is in the peer set.
    pub fn contains(&self, identity: &PeerIdentity) -> bool {
        self.slot_of(identity).is_some()
    }

    /// Stake of `identity`, if registered.
    pub fn stake_of(&self, identity: &PeerIdentity) -> Option<Stake> {
        self.peers
            .iter()
            .find(|peer| &peer.identity == identity)
            .map(|peer| peer.stake)
    }
}
