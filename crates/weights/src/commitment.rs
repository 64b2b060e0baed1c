//! Weight commitments submitted to the ledger.

use vigil_primitives::PeerIdentity;

/// Quantized weights paired with the identities they belong to.
///
/// Both sequences are in score vector order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightCommitment {
    /// Peer identities.
    pub identities: Vec<PeerIdentity>,
    /// Quantized weight per identity.
    pub weights: Vec<u16>,
}

impl WeightCommitment {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over `(identity, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&PeerIdentity, u16)> {
        self.identities.iter().zip(self.weights.iter().copied())
    }

    /// Sum of all quantized weights.
    pub fn total(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }
}
