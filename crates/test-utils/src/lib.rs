//! In-process mocks of the vigil collaborators.
//!
//! - [`MockLedger`] - scriptable block height, peer set, registration and
//!   weight commits, with failure toggles
//! - [`MockTransport`] - per-peer scripted replies (respond, delay, fail,
//!   hang) that records which peers were queried
//!
//! Both are cheap to clone; clones share state so a test can keep a handle
//! while the code under test owns another.

mod ledger;
mod transport;

pub use ledger::{MockLedger, RecordedCommit};
pub use transport::{MockReply, MockTransport};

use vigil_primitives::PeerInfo;

/// Generate `count` peers named `peer-0..peer-{count-1}` with stake `i + 1`.
pub fn generate_peers(count: usize) -> Vec<PeerInfo> {
    (0..count)
        .map(|i| PeerInfo::new(format!("peer-{i}"), (i + 1) as f64))
        .collect()
}
