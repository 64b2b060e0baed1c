//! Node-level CLI arguments.

mod log;
mod mock;

pub use log::LogArgs;
pub use mock::{DEFAULT_MOCK_BLOCKS_PER_READ, DEFAULT_MOCK_PEERS, MockArgs};
