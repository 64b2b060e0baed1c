//! Peer addressing types.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Stake;

/// Index of a peer in the current peer set (`0..N-1`).
///
/// Slots are only stable between resyncs. Anything that must survive a
/// resync should be keyed by [`PeerIdentity`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerSlot(usize);

impl PeerSlot {
    /// Create a slot from a raw index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into slot-aligned vectors.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for PeerSlot {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for PeerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of a peer (e.g. a public key string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerIdentity(String);

impl PeerIdentity {
    /// Create an identity from any string-like key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PeerIdentity {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for PeerIdentity {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for PeerIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry of the peer set as reported by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Stable identity of the peer.
    pub identity: PeerIdentity,
    /// Stake bonded to the peer.
    pub stake: Stake,
}

impl PeerInfo {
    /// Create a peer set entry.
    pub fn new(identity: impl Into<PeerIdentity>, stake: Stake) -> Self {
        Self {
            identity: identity.into(),
            stake,
        }
    }
}
