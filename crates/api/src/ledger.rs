//! Ledger client interface.

use vigil_primitives::{BlockNumber, PeerIdentity, PeerInfo, PeerSlot};

use crate::error::{CommitError, LedgerError};

/// Read and commit access to the shared ledger.
///
/// Implementations wrap a chain RPC client. Every read is fallible: callers
/// treat failures as transient and retry on the next round.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait LedgerClient: Send + Sync {
    /// Current block height.
    async fn current_block(&self) -> Result<BlockNumber, LedgerError>;

    /// Whether `identity` is registered on the network.
    async fn is_registered(&self, identity: &PeerIdentity) -> Result<bool, LedgerError>;

    /// The ordered peer set. Position in the returned list is the peer's slot.
    async fn peer_set(&self) -> Result<Vec<PeerInfo>, LedgerError>;

    /// Block at which the peer in `slot` last updated its weights.
    async fn last_update_block(&self, slot: PeerSlot) -> Result<BlockNumber, LedgerError>;

    /// Submit quantized weights for the given identities.
    ///
    /// `identities` and `weights` are parallel and in peer set order.
    async fn commit_weights(
        &self,
        identities: &[PeerIdentity],
        weights: &[u16],
    ) -> Result<(), CommitError>;
}
