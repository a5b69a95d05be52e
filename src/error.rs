// src/error.rs
// =============================================================================
// Errors that abort a whole run.
//
// Per-link problems (a missing file, a 404, a timeout) are NOT errors here:
// they are collected into the report so one run shows every broken link.
// Only the things that make the run meaningless end up in DocLinksError.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocLinksError {
    /// A git command exited non-zero or could not be spawned
    #[error("git operation failed: `git {command}`: {message}")]
    GitFailed { command: String, message: String },

    /// A documentation file in scope could not be read
    #[error("failed to read document {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file was unreadable or not valid JSON
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// An anchor link needs a web URL but no upstream on github.com is known
    #[error(
        "'{link}' in {} needs a base URL to be checked; \
         push the branch to an upstream on github.com",
        document.display()
    )]
    AnchorWithoutBase { document: PathBuf, link: String },

    /// Incremental scope was requested but there is nothing to diff against
    #[error("no target repository to diff against; pass --target-repo or set GITHUB_REPOSITORY")]
    NoTargetRepository,

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, DocLinksError>;
