//! Tracing bootstrap for the command-line client

use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,proxyctl=debug";

/// Initialize the global tracing subscriber, writing to stderr
///
/// Precedence:
/// 1) `RUST_LOG`
/// 2) `PROXYCTL_LOG`
/// 3) internal default filter (`debug` for this crate with `--verbose`)
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_env_filter(filter_from_env(verbose))
        .try_init();
}

fn filter_from_env(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(filter) = env::var("PROXYCTL_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
    {
        return filter;
    }

    EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
}
