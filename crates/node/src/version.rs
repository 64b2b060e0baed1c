//! Version information.

/// The short version, e.g. `0.1.0`.
pub const SHORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The long version shown by `--version`.
pub const LONG_VERSION: &str = concat!(
    "Version: ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Minimum Rust Version: ",
    env!("CARGO_PKG_RUST_VERSION"),
);

/// Client name reported in logs.
pub const NAME_CLIENT: &str = "vigil";
