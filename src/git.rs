// src/git.rs
// =============================================================================
// The git collaborator.
//
// Everything doclinks needs from git goes through the `Git` trait: the
// current branch, its upstream, a remote's URL, fetching the target branch
// and diffing against it. `CommandGit` shells out to the `git` binary; tests
// swap in a fake so scope and base URL logic can be checked without a real
// repository or network.
// =============================================================================

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{DocLinksError, Result};

/// Synchronous git queries used while building the run context.
pub trait Git {
    /// Name of the checked out branch (`HEAD` when detached).
    fn current_branch(&self) -> Result<String>;

    /// Upstream of the current branch as `remote/branch`, if one is tracked.
    fn upstream(&self) -> Result<Option<String>>;

    /// Fetch URL of a named remote.
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Fetch `refspec` from `url`.
    fn fetch(&self, url: &str, refspec: &str) -> Result<()>;

    /// Paths (relative to the repository root) changed between two refs.
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>>;
}

/// `Git` backed by the `git` command line tool.
#[derive(Debug, Clone)]
pub struct CommandGit {
    repo_dir: PathBuf,
}

impl CommandGit {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    // Runs git and returns trimmed stdout, or GitFailed with stderr
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(%command, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| DocLinksError::GitFailed {
                command: command.clone(),
                message: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocLinksError::GitFailed {
                command,
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Git for CommandGit {
    fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn upstream(&self) -> Result<Option<String>> {
        // A branch without upstream makes this command fail, which is a
        // normal state (forks, detached CI checkouts), not an error.
        match self.run(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"]) {
            Ok(upstream) if !upstream.is_empty() => Ok(Some(upstream)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!(error = %e, "no upstream tracking branch");
                Ok(None)
            }
        }
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.run(&["remote", "get-url", remote])
    }

    fn fetch(&self, url: &str, refspec: &str) -> Result<()> {
        self.run(&["fetch", url, refspec]).map(|_| ())
    }

    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let range = format!("{from}..{to}");
        let diff = self.run(&["diff", "--name-only", &range])?;
        Ok(diff
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
