//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts
//! - Rendering view-model snapshots as text

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

/// Used when `RUST_LOG` is unset. Per-search `info` events would interleave
/// with the interactive prompts, so only warnings show by default.
const DEFAULT_LOG_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt().with_env_filter(env_filter()).with_writer(std::io::stderr).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn default_filter_is_valid_directive() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
