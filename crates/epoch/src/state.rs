//! Block-height snapshot used for scheduling decisions.

use vigil_primitives::{BlockNumber, PeerSlot};

/// The loop's view of the ledger for the current round.
///
/// `current_block` is refreshed once per round and never moves backwards.
/// `last_update_block` is slot-aligned and only replaced on resync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpochState {
    current_block: BlockNumber,
    last_update_block: Vec<BlockNumber>,
    epoch_length: u64,
    step: u64,
}

impl EpochState {
    /// Create an empty state for the given epoch length.
    pub fn new(epoch_length: u64) -> Self {
        Self {
            epoch_length,
            ..Default::default()
        }
    }

    /// Current block height.
    pub fn current_block(&self) -> BlockNumber {
        self.current_block
    }

    /// Epoch length in blocks.
    pub fn epoch_length(&self) -> u64 {
        self.epoch_length
    }

    /// Number of completed rounds.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Last update block per slot.
    pub fn last_update_blocks(&self) -> &[BlockNumber] {
        &self.last_update_block
    }

    /// Last update block of `slot`, if the slot exists.
    pub fn last_update_block(&self, slot: PeerSlot) -> Option<BlockNumber> {
        self.last_update_block.get(slot.index()).copied()
    }

    /// Advance to a newly observed block height.
    ///
    /// Lower heights are ignored so decisions stay monotonic. Returns `true`
    /// if the height moved forward.
    pub fn observe_block(&mut self, block: BlockNumber) -> bool {
        if block <= self.current_block {
            if block < self.current_block {
                tracing::debug!(
                    observed = block,
                    current = self.current_block,
                    "ignoring lower block height"
                );
            }
            return false;
        }
        self.current_block = block;
        true
    }

    /// Replace the per-slot last update blocks after a resync.
    ///
    /// Entries ahead of the current block are clamped to it so that the
    /// state never reports a negative distance.
    pub fn set_last_update_blocks(&mut self, blocks: Vec<BlockNumber>) {
        let current = self.current_block;
        self.last_update_block = blocks.into_iter().map(|b| b.min(current)).collect();
    }

    /// Count one completed round.
    pub fn complete_step(&mut self) -> u64 {
        self.step += 1;
        self.step
    }

    /// Blocks elapsed since `slot` last updated.
    pub fn blocks_since_update(&self, slot: PeerSlot) -> Option<u64> {
        self.last_update_block(slot)
            .map(|last| self.current_block.saturating_sub(last))
    }

    /// Returns `true` if more than one epoch has passed since `slot` last
    /// updated. Unknown slots never report an elapsed epoch.
    pub fn epoch_elapsed(&self, slot: PeerSlot) -> bool {
        self.blocks_since_update(slot)
            .is_some_and(|delta| delta > self.epoch_length)
    }
}
