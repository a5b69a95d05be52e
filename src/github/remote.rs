// src/github/remote.rs
// =============================================================================
// Turns git metadata into GitHub web URLs.
//
// Anchor links ("other.md#usage") can't be checked on disk: whether the
// fragment exists depends on how GitHub renders headings. So they are turned
// into a web URL and checked like any other remote link. That needs a base
// URL of the form:
//
//   https://github.com/<owner>/<repo>/tree/<ref>/
//
// Strategy, in order:
// 1. The upstream of the current branch, if its remote lives on github.com
// 2. GITHUB_REPOSITORY + GITHUB_SHA (forks and PR checkouts have no upstream)
// 3. Nothing - the run carries on, and only fails if an anchor shows up
// =============================================================================

use tracing::{debug, info};

use crate::config::CiEnv;
use crate::error::Result;
use crate::git::Git;

const GITHUB_HOST: &str = "github.com";

// Resolves the base URL for anchor links
//
// Returns: Ok(None) when no GitHub URL can be built (a degraded state, not an
// error). Errors only when git itself fails.
pub fn resolve_base_url(git: &dyn Git, env: &CiEnv) -> Result<Option<String>> {
    if let Some(upstream) = git.upstream()? {
        // "origin/feature/x" -> remote "origin", branch "feature/x"
        let Some((remote, branch)) = upstream.split_once('/') else {
            info!(%upstream, "upstream has no remote part, anchor links can't be resolved");
            return Ok(None);
        };

        let remote_url = git.remote_url(remote)?;
        return match parse_github_url(&remote_url) {
            Some((owner, repo)) => {
                let base = tree_url(&owner, &repo, branch);
                debug!(%base, "base URL from upstream tracking branch");
                Ok(Some(base))
            }
            None => {
                // Not sure the URL would be built correctly for other hosts
                info!(%remote_url, "upstream remote is not on github.com, anchor links can't be resolved");
                Ok(None)
            }
        };
    }

    if let (Some(repository), Some(sha)) = (&env.repository, &env.sha) {
        if let Some((owner, repo)) = split_repository(repository) {
            let base = tree_url(owner, repo, sha);
            debug!(%base, "base URL from CI environment");
            return Ok(Some(base));
        }
    }

    info!("no upstream tracking branch, anchor links can't be resolved");
    Ok(None)
}

// Clone URL for a repository given as "owner/repo" or as a full URL
pub fn clone_url(repository: &str) -> String {
    let repository = repository.trim();
    if repository.contains("://") || repository.starts_with("git@") {
        repository.to_string()
    } else {
        format!("https://{}/{}.git", GITHUB_HOST, repository.trim_matches('/'))
    }
}

fn tree_url(owner: &str, repo: &str, reference: &str) -> String {
    format!("https://{GITHUB_HOST}/{owner}/{repo}/tree/{reference}/")
}

fn split_repository(repository: &str) -> Option<(&str, &str)> {
    let (owner, repo) = repository.trim_matches('/').split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

// Parses a GitHub remote URL to extract owner and repository name
//
// Supported formats:
//   - https://github.com/owner/repo(.git)
//   - github.com/owner/repo
//   - git@github.com:owner/repo.git
//   - ssh://git@github.com/owner/repo.git
//
// Returns: Some((owner, repo)), or None for anything not on github.com
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let url = url.trim();

    // Remove scheme and user prefixes
    let url = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("ssh://")
        .trim_start_matches("git@")
        .trim_start_matches("www.");

    // scp-like syntax uses ':' between host and path
    let path = url
        .strip_prefix("github.com/")
        .or_else(|| url.strip_prefix("github.com:"))?;

    let mut parts = path.trim_end_matches('/').split('/');
    let owner = parts.next().filter(|p| !p.is_empty())?;
    let repo = parts.next().filter(|p| !p.is_empty())?;

    // Only a literal ".git" suffix is dropped
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}
