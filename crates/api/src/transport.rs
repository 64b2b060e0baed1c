//! Peer transport interface.

use std::time::Duration;

use vigil_primitives::PeerInfo;

use crate::error::TransportError;

/// Request/response exchange with a remote peer.
///
/// The transport is responsible for encoding, connection handling and
/// authentication. It should honour `timeout`, but callers enforce the bound
/// independently.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait PeerTransport: Send + Sync {
    /// Request type sent to peers.
    type Request: Send + Sync + 'static;

    /// Response type returned by peers.
    type Response: Send + 'static;

    /// Send `request` to `peer` and wait for its response.
    async fn query(
        &self,
        peer: &PeerInfo,
        request: &Self::Request,
        timeout: Duration,
    ) -> Result<Self::Response, TransportError>;
}
