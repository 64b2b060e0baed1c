//! Collaborator interfaces for the vigil peer-scoring agent.
//!
//! The scoring loop depends on these traits rather than concrete backends:
//!
//! - [`LedgerClient`] - block height, registration, peer set, weight commits
//! - [`PeerTransport`] - request/response exchange with a single peer
//! - [`RewardFn`] - domain-specific scoring of one peer response
//!
//! Component configuration is expressed through the `*Config` traits so that
//! CLI arguments, config files and test fixtures can all drive the same code.

mod config;
mod error;
mod ledger;
mod outcome;
mod reward;
mod transport;

pub use config::{DispatchConfig, EpochConfig, ScoreConfig, WeightConfig};
pub use error::{CommitError, LedgerError, ScoringError, TransportError};
pub use ledger::LedgerClient;
pub use outcome::QueryOutcome;
pub use reward::RewardFn;
pub use transport::PeerTransport;
