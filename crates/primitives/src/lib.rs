//! Core primitive types for the vigil peer-scoring agent.
//!
//! # Types
//!
//! ## Peers
//! - [`PeerSlot`] - Position of a peer in the current peer set
//! - [`PeerIdentity`] - Stable identity of a peer across resyncs
//! - [`PeerInfo`] - A peer set entry (identity and stake)
//!
//! ## Search protocol
//! - [`SearchRequest`] - Query sent to miners
//! - [`SearchResponse`] / [`SearchResult`] - Miner answer

mod peer;
mod protocol;

pub use peer::{PeerIdentity, PeerInfo, PeerSlot};
pub use protocol::{SearchRequest, SearchResponse, SearchResult};

/// Ledger block height.
pub type BlockNumber = u64;

/// Stake held by a peer, in ledger units.
pub type Stake = f64;

/// Largest quantized weight the ledger accepts.
pub const MAX_WEIGHT: u16 = u16::MAX;
