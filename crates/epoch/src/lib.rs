//! Epoch tracking for the scoring loop.
//!
//! [`EpochState`] is an explicit snapshot of the block-height view the loop
//! works from: refreshed once per round, never cached behind the caller's
//! back. [`EpochScheduler`] makes the pure resync/commit decisions over it.

pub mod args;
mod constants;
mod scheduler;
mod state;

pub use args::EpochArgs;
pub use constants::{DEFAULT_DISABLE_WEIGHT_COMMIT, DEFAULT_EPOCH_LENGTH};
pub use scheduler::EpochScheduler;
pub use state::EpochState;
