// src/config.rs
// =============================================================================
// Run configuration.
//
// Two inputs feed a run besides the repository itself:
// - CheckConfig: the knobs from the command line (retry budget, timeouts...)
// - CiEnv: the handful of variables a CI provider sets for pull requests
//
// Both are read ONCE at startup and passed by reference from then on, so no
// part of the checker reaches for std::env on its own.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Seconds to wait after a 429 before asking again
pub const DEFAULT_BACKOFF_SECS: u64 = 20;

/// One request plus five retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Branch the incremental scope is diffed against when CI doesn't say
pub const DEFAULT_TARGET_REF: &str = "main";

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Repository root; manifest paths are relative to it
    pub root: PathBuf,
    /// Check every manifest document even on a feature branch
    pub check_all: bool,
    /// JSON manifest replacing the built-in document list
    pub manifest: Option<PathBuf>,
    /// Branch to diff against (overrides GITHUB_BASE_REF)
    pub target_ref: Option<String>,
    /// Repository to fetch the target branch from (overrides GITHUB_REPOSITORY)
    pub target_repo: Option<String>,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    /// Cap on in-flight requests; None means one per unique URL
    pub max_concurrency: Option<usize>,
}

impl CheckConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            check_all: false,
            manifest: None,
            target_ref: None,
            target_repo: None,
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: None,
        }
    }
}

/// How a rate-limited request is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait between a 429 and the next attempt
    pub backoff: Duration,
    /// Total number of requests per URL, first one included
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Variables set by the CI provider for the current job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnv {
    /// `owner/repo` the job runs for (GITHUB_REPOSITORY)
    pub repository: Option<String>,
    /// Commit being tested (GITHUB_SHA)
    pub sha: Option<String>,
    /// Target branch of a pull request (GITHUB_BASE_REF)
    pub base_ref: Option<String>,
}

impl CiEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the value from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            repository: get("GITHUB_REPOSITORY"),
            sha: get("GITHUB_SHA"),
            base_ref: get("GITHUB_BASE_REF"),
        }
    }
}
