//! Reward vectors aligned with sampled slots.

use std::collections::HashMap;

use vigil_primitives::PeerSlot;

/// Rewards for one forward batch, aligned 1:1 with `slots`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardBatch {
    /// Sampled slots.
    pub slots: Vec<PeerSlot>,
    /// Reward per sampled slot.
    pub rewards: Vec<f64>,
    /// Queries that failed in transport.
    pub failures: usize,
    /// Queries that timed out.
    pub timeouts: usize,
    /// Responses whose scoring returned an error or panicked.
    pub scoring_errors: usize,
}

impl RewardBatch {
    /// Number of sampled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Push one slot's reward.
    pub fn push(&mut self, slot: PeerSlot, reward: f64) {
        self.slots.push(slot);
        self.rewards.push(reward);
    }
}

/// Merge concurrent batches into one.
///
/// A slot sampled by more than one batch receives the mean of its rewards.
/// Slots keep the order in which they were first seen.
pub fn merge_batches(batches: impl IntoIterator<Item = RewardBatch>) -> RewardBatch {
    let mut merged = RewardBatch::default();
    let mut index: HashMap<PeerSlot, usize> = HashMap::new();
    let mut counts: Vec<u32> = Vec::new();

    for batch in batches {
        merged.failures += batch.failures;
        merged.timeouts += batch.timeouts;
        merged.scoring_errors += batch.scoring_errors;

        for (slot, reward) in batch.slots.into_iter().zip(batch.rewards) {
            match index.get(&slot) {
                Some(&position) => {
                    if let (Some(sum), Some(count)) =
                        (merged.rewards.get_mut(position), counts.get_mut(position))
                    {
                        *sum += reward;
                        *count += 1;
                    }
                }
                None => {
                    index.insert(slot, merged.slots.len());
                    merged.push(slot, reward);
                    counts.push(1);
                }
            }
        }
    }

    for (reward, count) in merged.rewards.iter_mut().zip(counts) {
        *reward /= f64::from(count);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn batch(entries: &[(usize, f64)]) -> RewardBatch {
        let mut batch = RewardBatch::default();
        for &(slot, reward) in entries {
            batch.push(PeerSlot::new(slot), reward);
        }
        batch
    }

    #[test]
    fn test_merge_disjoint() {
        let merged = merge_batches([batch(&[(0, 1.0)]), batch(&[(3, 0.5)])]);
        assert_eq!(merged.slots, vec![PeerSlot::new(0), PeerSlot::new(3)]);
        assert_eq!(merged.rewards, vec![1.0, 0.5]);
    }

    #[test]
    fn test_merge_duplicate_slot_takes_mean() {
        let mut first = batch(&[(1, 1.0), (2, 0.2)]);
        first.failures = 1;
        let mut second = batch(&[(2, 0.6), (4, 0.0)]);
        second.scoring_errors = 2;

        let merged = merge_batches([first, second]);
        assert_eq!(
            merged.slots,
            vec![PeerSlot::new(1), PeerSlot::new(2), PeerSlot::new(4)]
        );
        assert!((merged.rewards[1] - 0.4).abs() < 1e-12);
        assert_eq!(merged.failures, 1);
        assert_eq!(merged.scoring_errors, 2);
    }

    #[test]
    fn test_merge_nothing() {
        assert!(merge_batches(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn test_merge_yields_per_slot_mean(
            batches in prop::collection::vec(
                prop::collection::vec((0usize..8, 0.0f64..1.0), 0..8),
                0..4,
            ),
        ) {
            let mut sums: HashMap<usize, (f64, u32)> = HashMap::new();
            for entries in &batches {
                for &(slot, reward) in entries {
                    let entry = sums.entry(slot).or_default();
                    entry.0 += reward;
                    entry.1 += 1;
                }
            }

            let merged = merge_batches(batches.iter().map(|entries| batch(entries)));
            prop_assert_eq!(merged.len(), sums.len());
            prop_assert_eq!(merged.rewards.len(), merged.slots.len());
            for (slot, reward) in merged.slots.iter().zip(&merged.rewards) {
                let (sum, count) = sums[&slot.index()];
                prop_assert!((reward - sum / f64::from(count)).abs() < 1e-9);
            }
        }
    }
}
