//! Peer sampling and concurrent query dispatch.
//!
//! Each round the validator picks a random subset of the peer set with
//! [`select_peers`] and fans a request out to it through a [`Dispatcher`].
//! Every query runs under its own timeout and the round settles only once
//! all of them have. A [`StopSignal`] abandons the whole gather.

pub mod args;
mod constants;
mod dispatcher;
mod error;
mod sample;
mod stop;

pub use args::DispatchArgs;
pub use constants::{
    DEFAULT_NUM_CONCURRENT_QUERIES, DEFAULT_PER_REQUEST_TIMEOUT_MS, DEFAULT_SAMPLE_SIZE,
};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use sample::select_peers;
pub use stop::{StopHandle, StopSignal, stop_channel};
