//! Weight publishing.
//!
//! Scores are copied, normalized to sum to one, quantized to the ledger's
//! fixed-point range and submitted through a
//! [`LedgerClient`](vigil_api::LedgerClient).
//!
//! # Components
//!
//! - [`normalize`] / [`quantize`] - the pure conversion steps
//! - [`WeightCommitment`] - identities paired with quantized weights
//! - [`WeightPublisher`] - prepares and submits a commitment
//! - [`WeightArgs`] - quantization configuration

pub mod args;
mod commitment;
mod error;
mod normalize;
mod publisher;

pub use args::WeightArgs;
pub use commitment::WeightCommitment;
pub use error::PublishError;
pub use normalize::{normalize, quantize};
pub use publisher::WeightPublisher;
