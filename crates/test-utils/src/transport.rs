//! Mock peer transport.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vigil_api::{PeerTransport, TransportError};
use vigil_primitives::{PeerIdentity, PeerInfo};

/// Scripted reply of a mock peer.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply<R> {
    /// Answer immediately.
    Respond(R),
    /// Answer after a delay.
    Delay(Duration, R),
    /// Fail with an unreachable error carrying this reason.
    Fail(String),
    /// Never answer.
    Hang,
}

struct TransportState<R> {
    replies: HashMap<PeerIdentity, MockReply<R>>,
    default_reply: Option<MockReply<R>>,
    queried: Vec<PeerIdentity>,
}

/// Peer transport answering from per-peer scripts.
///
/// Peers without a script use the default reply, or fail as unreachable if
/// there is none.
pub struct MockTransport<Req, Resp> {
    state: Arc<Mutex<TransportState<Resp>>>,
    _request: PhantomData<fn(&Req)>,
}

impl<Req, Resp> MockTransport<Req, Resp> {
    /// Create a transport with no scripted peers.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TransportState {
                replies: HashMap::new(),
                default_reply: None,
                queried: Vec::new(),
            })),
            _request: PhantomData,
        }
    }

    /// Script the reply of `peer`.
    pub fn set_reply(&self, peer: impl Into<PeerIdentity>, reply: MockReply<Resp>) {
        self.state.lock().replies.insert(peer.into(), reply);
    }

    /// Reply used for peers without a script.
    pub fn set_default_reply(&self, reply: MockReply<Resp>) {
        self.state.lock().default_reply = Some(reply);
    }

    /// Peers queried so far, in call order.
    pub fn queried(&self) -> Vec<PeerIdentity> {
        self.state.lock().queried.clone()
    }

    /// Number of queries issued so far.
    pub fn query_count(&self) -> usize {
        self.state.lock().queried.len()
    }
}

impl<Req, Resp> Default for MockTransport<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Resp> Clone for MockTransport<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            _request: PhantomData,
        }
    }
}

impl<Req, Resp> std::fmt::Debug for MockTransport<Req, Resp> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockTransport")
            .field("scripted_peers", &state.replies.len())
            .field("queries", &state.queried.len())
            .finish()
    }
}

#[async_trait::async_trait]
impl<Req, Resp> PeerTransport for MockTransport<Req, Resp>
where
    Req: Send + Sync + 'static,
    Resp: Clone + Send + Sync + 'static,
{
    type Request = Req;
    type Response = Resp;

    async fn query(
        &self,
        peer: &PeerInfo,
        _request: &Req,
        _timeout: Duration,
    ) -> Result<Resp, TransportError> {
        let reply = {
            let mut state = self.state.lock();
            state.queried.push(peer.identity.clone());
            state
                .replies
                .get(&peer.identity)
                .or(state.default_reply.as_ref())
                .cloned()
        };

        match reply {
            Some(MockReply::Respond(response)) => Ok(response),
            Some(MockReply::Delay(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(MockReply::Fail(reason)) => Err(TransportError::Unreachable {
                peer: peer.identity.clone(),
                reason,
            }),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Err(TransportError::Unreachable {
                peer: peer.identity.clone(),
                reason: "no reply scripted".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_and_default_replies() {
        let transport = MockTransport::<(), &'static str>::new();
        transport.set_reply("a", MockReply::Respond("hello"));
        transport.set_reply("b", MockReply::Fail("down".into()));

        let timeout = Duration::from_secs(1);
        let a = PeerInfo::new("a", 1.0);
        let b = PeerInfo::new("b", 1.0);
        let c = PeerInfo::new("c", 1.0);

        assert_eq!(transport.query(&a, &(), timeout).await, Ok("hello"));
        assert!(transport.query(&b, &(), timeout).await.is_err());
        assert!(transport.query(&c, &(), timeout).await.is_err());

        transport.set_default_reply(MockReply::Respond("fallback"));
        assert_eq!(transport.query(&c, &(), timeout).await, Ok("fallback"));

        assert_eq!(transport.query_count(), 4);
        assert_eq!(transport.queried()[2], PeerIdentity::from("c"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_reply() {
        let transport = MockTransport::<(), u8>::new();
        transport.set_reply("slow", MockReply::Delay(Duration::from_secs(3), 9));

        let started = tokio::time::Instant::now();
        let peer = PeerInfo::new("slow", 1.0);
        let reply = transport.query(&peer, &(), Duration::from_secs(10)).await;
        assert_eq!(reply, Ok(9));
        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
