// src/logging.rs
// =============================================================================
// Logging setup.
//
// Logs (skipped documents, retries, git calls) go to stderr through
// `tracing`. The report itself is printed to stdout, so `--json` output stays
// clean enough to pipe into another tool.
//
// RUST_LOG wins over the command-line verbosity when it is set.
// =============================================================================

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

/// Level used when RUST_LOG is not set
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_means_debug() {
        assert_eq!(level_for(true), Level::DEBUG);
        assert_eq!(level_for(false), Level::INFO);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(false, Level::WARN);
        init_logging(true, Level::DEBUG);
    }
}
