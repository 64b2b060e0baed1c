//! Logging setup.

use eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use crate::{args::LogArgs, version};

/// Initialize logging based on command line arguments.
///
/// The filter is built with the following precedence:
/// 1. If `--quiet` is set, only errors are shown
/// 2. Otherwise, `RUST_LOG` if set, or the level implied by `-v` flags
/// 3. Directives from `--log.filter` are added on top
pub fn init_logging(args: &LogArgs) -> Result<()> {
    let filter = build_filter(args);

    let init = if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .without_time()
            .try_init()
    };
    init.map_err(|err| eyre!("failed to install log subscriber: {err}"))?;

    if !args.quiet && !args.json {
        log_startup_banner();
    }

    Ok(())
}

fn build_filter(args: &LogArgs) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new(args.level());
    }

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.level()));

    if let Some(custom_filter) = &args.filter {
        for directive in custom_filter.split(',') {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}

fn log_startup_banner() {
    println!("\n {} v{}\n", version::NAME_CLIENT, version::SHORT_VERSION);
}
