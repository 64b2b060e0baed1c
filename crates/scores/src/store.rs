//! Slot-aligned EMA score store.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use vigil_api::ScoreConfig;
use vigil_primitives::{PeerIdentity, PeerSlot};

use crate::error::ScoreError;
use crate::sanitize::sanitize_rewards;

/// Result of remapping scores onto a new peer set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChurnSummary {
    /// Peers present before and after at the same slot.
    pub retained: usize,
    /// Peers present before and after at a different slot.
    pub moved: usize,
    /// Peers new to the set (start at zero).
    pub added: usize,
    /// Peers no longer in the set (scores dropped).
    pub removed: usize,
}

impl ChurnSummary {
    /// Returns `true` if the peer set changed in any way.
    pub fn has_churn(&self) -> bool {
        self.moved > 0 || self.added > 0 || self.removed > 0
    }
}

/// Result of a single EMA update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Whether the scores were modified.
    pub applied: bool,
    /// Number of sampled slots folded in.
    pub sampled: usize,
    /// Number of rewards replaced during sanitization.
    pub sanitized: usize,
}

/// Reputation score per peer slot.
///
/// The score vector always has one entry per peer in the current set and
/// only changes through [`update`](Self::update) and
/// [`resync`](Self::resync). All entries stay finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreStore {
    alpha: f64,
    identities: Vec<PeerIdentity>,
    scores: Vec<f64>,
}

impl ScoreStore {
    /// Create an empty store with the given smoothing factor.
    pub fn new(alpha: f64) -> Result<Self, ScoreError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ScoreError::InvalidAlpha(alpha));
        }
        Ok(Self {
            alpha,
            identities: Vec::new(),
            scores: Vec::new(),
        })
    }

    /// Create an empty store from configuration.
    pub fn from_config(config: &impl ScoreConfig) -> Result<Self, ScoreError> {
        Self::new(config.moving_average_alpha())
    }

    /// The smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of tracked slots.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if no peers are tracked.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores in slot order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Identities in slot order.
    pub fn identities(&self) -> &[PeerIdentity] {
        &self.identities
    }

    /// Score of the peer in `slot`.
    pub fn score(&self, slot: PeerSlot) -> Option<f64> {
        self.scores.get(slot.index()).copied()
    }

    /// Score of the peer with `identity`.
    pub fn score_of(&self, identity: &PeerIdentity) -> Option<f64> {
        self.identities
            .iter()
            .position(|id| id == identity)
            .and_then(|index| self.scores.get(index).copied())
    }

    /// Copy of the current score vector.
    pub fn snapshot(&self) -> Vec<f64> {
        self.scores.clone()
    }

    /// Remap scores onto a new ordered peer set.
    ///
    /// Scores follow identities, not slots: a peer that moves from slot 2 to
    /// slot 5 keeps its score at slot 5. New peers start at zero and scores
    /// of departed peers are dropped.
    pub fn resync(&mut self, identities: &[PeerIdentity]) -> ChurnSummary {
        let previous: HashMap<&PeerIdentity, (usize, f64)> = self
            .identities
            .iter()
            .zip(self.scores.iter().copied())
            .enumerate()
            .map(|(slot, (id, score))| (id, (slot, score)))
            .collect();

        let mut summary = ChurnSummary::default();
        let mut scores = Vec::with_capacity(identities.len());
        for (slot, identity) in identities.iter().enumerate() {
            match previous.get(identity) {
                Some(&(old_slot, score)) => {
                    if old_slot == slot {
                        summary.retained += 1;
                    } else {
                        summary.moved += 1;
                    }
                    scores.push(score);
                }
                None => {
                    summary.added += 1;
                    scores.push(0.0);
                }
            }
        }
        let current: HashSet<&PeerIdentity> = identities.iter().collect();
        summary.removed = previous.keys().filter(|id| !current.contains(*id)).count();

        if summary.has_churn() {
            debug!(
                retained = summary.retained,
                moved = summary.moved,
                added = summary.added,
                removed = summary.removed,
                "remapped scores onto new peer set"
            );
        }

        self.identities = identities.to_vec();
        self.scores = scores;
        summary
    }

    /// Fold one round of rewards into the scores.
    ///
    /// Rewards are sanitized, scattered into a zero vector at `slots` and
    /// blended as `alpha * scattered + (1 - alpha) * score` for every slot.
    /// Slots not sampled this round therefore decay by `1 - alpha`. If a slot
    /// appears more than once the last reward wins.
    ///
    /// Empty input leaves the scores untouched. Invalid input is rejected
    /// before anything is modified.
    pub fn update(
        &mut self,
        rewards: &[f64],
        slots: &[PeerSlot],
    ) -> Result<UpdateSummary, ScoreError> {
        if rewards.is_empty() || slots.is_empty() {
            warn!(
                rewards = rewards.len(),
                slots = slots.len(),
                "empty rewards or slots, skipping score update"
            );
            return Ok(UpdateSummary::default());
        }

        if rewards.len() != slots.len() {
            return Err(ScoreError::LengthMismatch {
                rewards: rewards.len(),
                slots: slots.len(),
            });
        }

        let peers = self.scores.len();
        if let Some(&slot) = slots.iter().find(|slot| slot.index() >= peers) {
            return Err(ScoreError::SlotOutOfRange { slot, peers });
        }

        let (rewards, sanitized) = sanitize_rewards(rewards);
        if sanitized > 0 {
            warn!(sanitized, "non-finite or negative rewards replaced with zero");
        }

        let mut scattered = vec![0.0; peers];
        for (slot, reward) in slots.iter().zip(rewards) {
            if let Some(entry) = scattered.get_mut(slot.index()) {
                *entry = reward;
            }
        }

        let alpha = self.alpha;
        for (score, reward) in self.scores.iter_mut().zip(scattered) {
            *score = alpha * reward + (1.0 - alpha) * *score;
        }

        Ok(UpdateSummary {
            applied: true,
            sampled: slots.len(),
            sanitized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(keys: &[&str]) -> Vec<PeerIdentity> {
        keys.iter().map(|k| PeerIdentity::from(*k)).collect()
    }

    fn store_with(alpha: f64, scores: &[f64]) -> ScoreStore {
        let keys: Vec<String> = (0..scores.len()).map(|i| format!("peer-{i}")).collect();
        let identities: Vec<PeerIdentity> =
            keys.iter().map(|k| PeerIdentity::from(k.as_str())).collect();
        let mut store = ScoreStore::new(alpha).unwrap();
        store.resync(&identities);
        store.scores.copy_from_slice(scores);
        store
    }

    fn slots(indices: &[usize]) -> Vec<PeerSlot> {
        indices.iter().copied().map(PeerSlot::new).collect()
    }

    #[test]
    fn test_invalid_alpha() {
        assert_eq!(ScoreStore::new(0.0), Err(ScoreError::InvalidAlpha(0.0)));
        assert!(ScoreStore::new(1.01).is_err());
        assert!(ScoreStore::new(f64::NAN).is_err());
        assert!(ScoreStore::new(1.0).is_ok());
    }

    #[test]
    fn test_ema_scenario() {
        let mut store = store_with(0.5, &[0.5, 0.5]);
        let summary = store.update(&[1.0], &slots(&[0])).unwrap();
        assert!(summary.applied);
        assert_eq!(store.scores(), &[0.75, 0.25]);
    }

    #[test]
    fn test_empty_rewards_is_noop() {
        let mut store = store_with(0.5, &[0.5, 0.5]);
        let summary = store.update(&[], &[]).unwrap();
        assert!(!summary.applied);
        assert_eq!(store.scores(), &[0.5, 0.5]);

        let summary = store.update(&[1.0], &[]).unwrap();
        assert!(!summary.applied);
        assert_eq!(store.scores(), &[0.5, 0.5]);
    }

    #[test]
    fn test_nan_reward_treated_as_zero() {
        let mut with_nan = store_with(0.3, &[0.2, 0.4, 0.6]);
        let mut with_zero = with_nan.clone();

        let summary = with_nan
            .update(&[f64::NAN, 0.9], &slots(&[0, 2]))
            .unwrap();
        with_zero.update(&[0.0, 0.9], &slots(&[0, 2])).unwrap();

        assert_eq!(summary.sanitized, 1);
        assert_eq!(with_nan.scores(), with_zero.scores());
        assert!(with_nan.scores().iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut store = store_with(0.5, &[0.5, 0.5]);
        let err = store.update(&[1.0, 0.5], &slots(&[0])).unwrap_err();
        assert_eq!(err, ScoreError::LengthMismatch { rewards: 2, slots: 1 });
        assert_eq!(store.scores(), &[0.5, 0.5]);
    }

    #[test]
    fn test_out_of_range_slot_rejected() {
        let mut store = store_with(0.5, &[0.5, 0.5]);
        let err = store.update(&[1.0, 1.0], &slots(&[0, 2])).unwrap_err();
        assert_eq!(
            err,
            ScoreError::SlotOutOfRange {
                slot: PeerSlot::new(2),
                peers: 2
            }
        );
        assert_eq!(store.scores(), &[0.5, 0.5]);
    }

    #[test]
    fn test_resync_preserves_scores_by_identity() {
        let mut store = ScoreStore::new(0.5).unwrap();
        store.resync(&ids(&["a", "b", "x", "c", "d", "e"]));
        store.update(&[1.0], &slots(&[2])).unwrap();
        let x_score = store.score(PeerSlot::new(2)).unwrap();
        assert!(x_score > 0.0);

        // x moves from slot 2 to slot 5
        let summary = store.resync(&ids(&["a", "b", "c", "d", "e", "x"]));
        assert_eq!(store.score(PeerSlot::new(5)), Some(x_score));
        assert_eq!(store.score(PeerSlot::new(2)), Some(0.0));
        assert_eq!(summary.retained, 2);
        assert_eq!(summary.moved, 4);
        assert_eq!(summary.added, 0);
        assert_eq!(summary.removed, 0);
    }

    #[test]
    fn test_resync_adds_and_removes() {
        let mut store = store_with(1.0, &[0.4, 0.6]);
        let summary = store.resync(&ids(&["peer-1", "newcomer"]));
        assert_eq!(store.scores(), &[0.6, 0.0]);
        assert_eq!(store.len(), 2);
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.removed, 1);
        assert_eq!(store.score_of(&PeerIdentity::from("newcomer")), Some(0.0));
    }

    #[test]
    fn test_resync_unchanged_set() {
        let mut store = store_with(0.5, &[0.1, 0.2]);
        let identities = store.identities().to_vec();
        let summary = store.resync(&identities);
        assert!(!summary.has_churn());
        assert_eq!(store.scores(), &[0.1, 0.2]);
    }

    #[test]
    fn test_resync_with_repeated_identity() {
        let mut store = ScoreStore::new(0.5).unwrap();
        store.resync(&ids(&["a"]));

        let summary = store.resync(&ids(&["a", "a"]));
        assert_eq!(summary.retained, 1);
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.removed, 0);
        assert_eq!(store.len(), 2);

        let summary = store.resync(&ids(&["b"]));
        assert_eq!(summary.added, 1);
        assert_eq!(summary.removed, 1);
    }

    proptest! {
        #[test]
        fn test_ema_matches_formula(
            scores in prop::collection::vec(0.0f64..1.0, 1..32),
            alpha in 0.01f64..=1.0,
            reward in 0.0f64..1.0,
            pick in any::<prop::sample::Index>(),
        ) {
            let mut store = store_with(alpha, &scores);
            let sampled = pick.index(scores.len());
            store.update(&[reward], &[PeerSlot::new(sampled)]).unwrap();

            for (i, (&old, &new)) in scores.iter().zip(store.scores()).enumerate() {
                let scattered = if i == sampled { reward } else { 0.0 };
                let expected = alpha * scattered + (1.0 - alpha) * old;
                prop_assert!((new - expected).abs() < 1e-12);
                if i != sampled {
                    prop_assert!((new - (1.0 - alpha) * old).abs() < 1e-12);
                }
                prop_assert!(new.is_finite() && new >= 0.0);
            }
        }
    }
}
