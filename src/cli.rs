// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// doclinks has a single job, so there are no subcommands: every flag tunes
// one run. The parsed arguments are turned into a CheckConfig right away so
// the rest of the program never sees clap types.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use doclinks::config::{
    CheckConfig, RetryPolicy, DEFAULT_BACKOFF_SECS, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "doclinks",
    version,
    about = "Check the links in a repository's documentation files",
    long_about = "doclinks checks every link in the documentation manifest: relative links \
                  against the filesystem, URLs and heading anchors over the network. \
                  On feature branches only documents changed relative to the target branch \
                  are checked; on main and release branches, all of them."
)]
pub struct Cli {
    /// Repository root (manifest paths are relative to it)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Check every document, even on a feature branch
    #[arg(long)]
    pub all: bool,

    /// JSON file listing the documents to check instead of the built-in list
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Branch to diff against [default: $GITHUB_BASE_REF, then main]
    #[arg(long)]
    pub target_ref: Option<String>,

    /// Repository to fetch the target branch from, as owner/repo or URL
    /// [default: $GITHUB_REPOSITORY, then the upstream remote]
    #[arg(long)]
    pub target_repo: Option<String>,

    /// Seconds to wait after a 429 response before retrying
    #[arg(long, default_value_t = DEFAULT_BACKOFF_SECS)]
    pub backoff_secs: u64,

    /// Requests per URL, first one included, while rate limited
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Cap on concurrent requests (default: one per unique URL)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Output the report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn to_config(&self) -> CheckConfig {
        CheckConfig {
            root: self.root.clone(),
            check_all: self.all,
            manifest: self.manifest.clone(),
            target_ref: self.target_ref.clone(),
            target_repo: self.target_repo.clone(),
            retry: RetryPolicy {
                backoff: Duration::from_secs(self.backoff_secs),
                max_attempts: self.max_attempts,
            },
            timeout: Duration::from_secs(self.timeout_secs),
            max_concurrency: self.max_concurrency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["doclinks"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(!config.check_all);
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_concurrency, None);
    }

    #[test]
    fn flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "doclinks",
            "--all",
            "--root",
            "repo",
            "--target-repo",
            "user/repo",
            "--backoff-secs",
            "1",
            "--max-attempts",
            "3",
            "--max-concurrency",
            "8",
        ])
        .unwrap();
        let config = cli.to_config();
        assert!(config.check_all);
        assert_eq!(config.root, PathBuf::from("repo"));
        assert_eq!(config.target_repo.as_deref(), Some("user/repo"));
        assert_eq!(config.retry.backoff, Duration::from_secs(1));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.max_concurrency, Some(8));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        assert!(Cli::try_parse_from(["doclinks", "--max-attempts", "0"]).is_err());
    }
}
