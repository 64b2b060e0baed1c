//! Resync and commit decisions.

use vigil_api::EpochConfig;
use vigil_primitives::PeerSlot;

use crate::state::EpochState;

/// Decides when the metagraph should be resynced and weights committed.
///
/// Both decisions are pure functions of an [`EpochState`] snapshot and the
/// local node's slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpochScheduler {
    weight_commit_disabled: bool,
}

impl EpochScheduler {
    /// Create a scheduler.
    pub fn new(weight_commit_disabled: bool) -> Self {
        Self {
            weight_commit_disabled,
        }
    }

    /// Create a scheduler from configuration.
    pub fn from_config(config: &impl EpochConfig) -> Self {
        Self::new(config.weight_commit_disabled())
    }

    /// Whether weight commits are disabled.
    pub fn weight_commit_disabled(&self) -> bool {
        self.weight_commit_disabled
    }

    /// Returns `true` if the metagraph should be refreshed.
    ///
    /// Due once `current_block - last_update_block[self_slot]` exceeds the
    /// epoch length. A node without a slot has never synced and is always due.
    pub fn should_resync(&self, state: &EpochState, self_slot: Option<PeerSlot>) -> bool {
        match self_slot {
            Some(slot) => state.epoch_elapsed(slot),
            None => true,
        }
    }

    /// Returns `true` if weights should be committed this round.
    ///
    /// Never on step 0 (nothing observed yet), never when disabled, and
    /// otherwise under the same block condition as
    /// [`should_resync`](Self::should_resync). A node without a slot cannot
    /// commit.
    pub fn should_commit(&self, state: &EpochState, self_slot: Option<PeerSlot>) -> bool {
        if state.step() == 0 || self.weight_commit_disabled {
            return false;
        }
        self_slot.is_some_and(|slot| state.epoch_elapsed(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SELF_SLOT: PeerSlot = PeerSlot::new(0);

    fn state_at(block: u64, last_update: u64, epoch_length: u64, steps: u64) -> EpochState {
        let mut state = EpochState::new(epoch_length);
        state.observe_block(block);
        state.set_last_update_blocks(vec![last_update]);
        for _ in 0..steps {
            state.complete_step();
        }
        state
    }

    #[test]
    fn test_resync_boundary() {
        let scheduler = EpochScheduler::default();

        let due = state_at(151, 50, 100, 0);
        assert!(scheduler.should_resync(&due, Some(SELF_SLOT)));

        let not_due = state_at(150, 50, 100, 0);
        assert!(!scheduler.should_resync(&not_due, Some(SELF_SLOT)));
    }

    #[test]
    fn test_resync_without_slot() {
        let scheduler = EpochScheduler::default();
        assert!(scheduler.should_resync(&EpochState::new(100), None));
    }

    #[test]
    fn test_commit_skips_step_zero() {
        let scheduler = EpochScheduler::default();
        let state = state_at(151, 50, 100, 0);
        assert!(!scheduler.should_commit(&state, Some(SELF_SLOT)));

        let state = state_at(151, 50, 100, 1);
        assert!(scheduler.should_commit(&state, Some(SELF_SLOT)));
    }

    #[test]
    fn test_commit_disabled() {
        let scheduler = EpochScheduler::new(true);
        let state = state_at(1_000, 0, 100, 5);
        assert!(scheduler.should_resync(&state, Some(SELF_SLOT)));
        assert!(!scheduler.should_commit(&state, Some(SELF_SLOT)));
    }

    #[test]
    fn test_commit_without_slot() {
        let scheduler = EpochScheduler::default();
        let state = state_at(1_000, 0, 100, 5);
        assert!(!scheduler.should_commit(&state, None));
    }

    proptest! {
        #[test]
        fn test_resync_decision_is_idempotent(
            block in 0u64..10_000,
            last in 0u64..10_000,
            epoch in 1u64..500,
        ) {
            let scheduler = EpochScheduler::default();
            let state = state_at(block, last, epoch, 0);
            let first = scheduler.should_resync(&state, Some(SELF_SLOT));
            let second = scheduler.should_resync(&state, Some(SELF_SLOT));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_lower_block_never_triggers(
            block in 1u64..10_000,
            drop_by in 1u64..10_000,
            epoch in 1u64..500,
        ) {
            let scheduler = EpochScheduler::default();
            let mut state = state_at(block, block, epoch, 1);
            state.observe_block(block.saturating_sub(drop_by));
            prop_assert!(!scheduler.should_resync(&state, Some(SELF_SLOT)));
            prop_assert!(!scheduler.should_commit(&state, Some(SELF_SLOT)));
        }
    }
}
