//! Per-peer reputation scores smoothed with an exponential moving average.
//!
//! # Components
//!
//! - [`ScoreStore`] - Slot-aligned score vector with EMA update and
//!   identity-based remapping on resync
//! - [`sanitize_rewards`] - Replaces non-finite and negative rewards with zero
//! - [`ScoreArgs`] - Smoothing configuration

pub mod args;
mod constants;
mod error;
mod sanitize;
mod store;

pub use args::ScoreArgs;
pub use constants::DEFAULT_MOVING_AVERAGE_ALPHA;
pub use error::ScoreError;
pub use sanitize::{sanitize_reward, sanitize_rewards};
pub use store::{ChurnSummary, ScoreStore, UpdateSummary};
