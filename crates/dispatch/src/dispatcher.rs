//! Concurrent fan-out of one request to a set of peers.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, trace};
use vigil_api::{DispatchConfig, PeerTransport, QueryOutcome};
use vigil_primitives::{PeerInfo, PeerSlot};

use crate::error::DispatchError;
use crate::stop::StopSignal;

/// Issues concurrent peer queries, each bounded by its own timeout.
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    per_request_timeout: Duration,
}

impl<T: PeerTransport> Dispatcher<T> {
    /// Create a dispatcher over `transport`.
    pub fn new(transport: T, per_request_timeout: Duration) -> Self {
        Self {
            transport,
            per_request_timeout,
        }
    }

    /// Create a dispatcher from configuration.
    pub fn from_config(transport: T, config: &impl DispatchConfig) -> Self {
        Self::new(transport, config.per_request_timeout())
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The per-request timeout.
    pub fn per_request_timeout(&self) -> Duration {
        self.per_request_timeout
    }

    /// Send `request` to every target and wait for all of them to settle.
    ///
    /// Returns exactly one outcome per target, in target order. A slow or
    /// failing peer only affects its own entry. If `stop` fires first the
    /// outstanding queries are dropped and [`DispatchError::Stopped`] is
    /// returned.
    pub async fn dispatch(
        &self,
        targets: &[(PeerSlot, PeerInfo)],
        request: &T::Request,
        stop: &StopSignal,
    ) -> Result<Vec<(PeerSlot, QueryOutcome<T::Response>)>, DispatchError> {
        if stop.is_stopped() {
            return Err(DispatchError::Stopped);
        }

        let queries = targets
            .iter()
            .map(|(slot, peer)| self.query_one(*slot, peer, request));

        tokio::select! {
            biased;
            _ = stop.stopped() => {
                debug!(targets = targets.len(), "stop requested, abandoning in-flight queries");
                Err(DispatchError::Stopped)
            }
            outcomes = join_all(queries) => Ok(outcomes),
        }
    }

    async fn query_one(
        &self,
        slot: PeerSlot,
        peer: &PeerInfo,
        request: &T::Request,
    ) -> (PeerSlot, QueryOutcome<T::Response>) {
        let query = self
            .transport
            .query(peer, request, self.per_request_timeout);

        let outcome = match tokio::time::timeout(self.per_request_timeout, query).await {
            Ok(result) => QueryOutcome::from(result),
            Err(_) => QueryOutcome::Timeout,
        };

        match &outcome {
            QueryOutcome::Success(_) => trace!(%slot, peer = %peer.identity, "query succeeded"),
            QueryOutcome::Timeout => debug!(
                %slot,
                peer = %peer.identity,
                timeout_ms = self.per_request_timeout.as_millis() as u64,
                "query timed out"
            ),
            QueryOutcome::TransportFailure(err) => {
                debug!(%slot, peer = %peer.identity, error = %err, "query failed")
            }
        }

        (slot, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::stop_channel;
    use vigil_test_utils::{MockReply, MockTransport};

    const TIMEOUT: Duration = Duration::from_millis(500);

    fn targets(keys: &[&str]) -> Vec<(PeerSlot, PeerInfo)> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| (PeerSlot::new(i), PeerInfo::new(*key, 1.0)))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_outcome_per_target() {
        let transport = MockTransport::<u32, u32>::new();
        transport.set_reply("fast", MockReply::Respond(1));
        transport.set_reply("slow", MockReply::Delay(Duration::from_secs(5), 2));
        transport.set_reply("broken", MockReply::Fail("connection reset".into()));
        transport.set_reply("silent", MockReply::Hang);

        let dispatcher = Dispatcher::new(transport.clone(), TIMEOUT);
        let (_handle, stop) = stop_channel();
        let outcomes = dispatcher
            .dispatch(&targets(&["fast", "slow", "broken", "silent"]), &0, &stop)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], (PeerSlot::new(0), QueryOutcome::Success(1)));
        assert_eq!(outcomes[1], (PeerSlot::new(1), QueryOutcome::Timeout));
        assert!(matches!(
            outcomes[2],
            (_, QueryOutcome::TransportFailure(_))
        ));
        assert_eq!(outcomes[3], (PeerSlot::new(3), QueryOutcome::Timeout));
        assert_eq!(transport.query_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_bounded_by_timeout() {
        let transport = MockTransport::<u32, u32>::new();
        transport.set_reply("a", MockReply::Hang);
        transport.set_reply("b", MockReply::Hang);

        let dispatcher = Dispatcher::new(transport, TIMEOUT);
        let (_handle, stop) = stop_channel();
        let started = tokio::time::Instant::now();
        let outcomes = dispatcher
            .dispatch(&targets(&["a", "b"]), &0, &stop)
            .await
            .unwrap();

        assert!(outcomes.iter().all(|(_, o)| o.is_timeout()));
        // queries run concurrently, not back to back
        assert!(started.elapsed() < TIMEOUT * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_abandons_in_flight_queries() {
        let transport = MockTransport::<u32, u32>::new();
        transport.set_reply("a", MockReply::Hang);

        let dispatcher = Dispatcher::new(transport, Duration::from_secs(60));
        let (handle, stop) = stop_channel();

        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.stop();
        });

        let result = dispatcher.dispatch(&targets(&["a"]), &0, &stop).await;
        assert_eq!(result.unwrap_err(), DispatchError::Stopped);
        stopper.await.unwrap();
    }

    #[tokio::test]
    async fn test_already_stopped() {
        let transport = MockTransport::<u32, u32>::new();
        transport.set_reply("a", MockReply::Respond(1));

        let dispatcher = Dispatcher::new(transport.clone(), TIMEOUT);
        let (handle, stop) = stop_channel();
        handle.stop();

        let result = dispatcher.dispatch(&targets(&["a"]), &0, &stop).await;
        assert_eq!(result.unwrap_err(), DispatchError::Stopped);
        assert_eq!(transport.query_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_targets() {
        let dispatcher = Dispatcher::new(MockTransport::<u32, u32>::new(), TIMEOUT);
        let (_handle, stop) = stop_channel();
        let outcomes = dispatcher.dispatch(&[], &0, &stop).await.unwrap();
        assert!(outcomes.is_empty());
    }
}
