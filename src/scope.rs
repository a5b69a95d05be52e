// src/scope.rs
// =============================================================================
// Decides which documents are checked in this run.
//
// Checking links means live network calls, which is slow and can hit rate
// limits. So on feature branches only the documents touched by the branch
// are checked; on `main` and release branches everything is.
//
// Incremental flow:
// 1. Fetch the target branch into a private local ref
// 2. `git diff --name-only <that ref>..HEAD`
// 3. Keep the manifest entries whose path shows up in the diff
//
// A document left out is NOT a pass - it simply wasn't looked at, and the
// log says so.
// =============================================================================

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{CheckConfig, CiEnv, DEFAULT_TARGET_REF};
use crate::error::{DocLinksError, Result};
use crate::git::Git;
use crate::github;
use crate::manifest::DocEntry;

/// Local ref the target branch is fetched into
pub const LOCAL_TARGET_REF: &str = "_doclinks_target_ref";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScopeMode {
    /// Every manifest document
    Full,
    /// Only documents changed relative to `target_ref`
    Changed { target_ref: String },
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub mode: ScopeMode,
    /// Documents to check, in manifest order
    pub documents: Vec<DocEntry>,
    /// Documents left out because they didn't change
    pub skipped: Vec<DocEntry>,
}

impl Scope {
    pub fn full(manifest: Vec<DocEntry>) -> Self {
        Self {
            mode: ScopeMode::Full,
            documents: manifest,
            skipped: Vec::new(),
        }
    }
}

/// Branches on which the whole manifest is always checked
pub fn is_full_scope_branch(branch: &str) -> bool {
    branch == "main" || branch.contains("release/")
}

pub fn select_scope(
    git: &dyn Git,
    env: &CiEnv,
    config: &CheckConfig,
    current_branch: &str,
    manifest: Vec<DocEntry>,
) -> Result<Scope> {
    if config.check_all {
        info!("checking all documents (--all)");
        return Ok(Scope::full(manifest));
    }
    if is_full_scope_branch(current_branch) {
        info!(branch = %current_branch, "checking all documents on this branch");
        return Ok(Scope::full(manifest));
    }

    let target_ref = config
        .target_ref
        .clone()
        .or_else(|| env.base_ref.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_REF.to_string());
    let target_url = target_repository_url(git, env, config)?;

    info!(%target_url, %target_ref, "fetching target branch");
    git.fetch(&target_url, &format!("+{target_ref}:{LOCAL_TARGET_REF}"))?;

    let changed: HashSet<PathBuf> = git
        .changed_files(LOCAL_TARGET_REF, "HEAD")?
        .iter()
        .map(|p| normalize(Path::new(p)))
        .collect();

    let (documents, skipped): (Vec<_>, Vec<_>) = manifest
        .into_iter()
        .partition(|entry| changed.contains(&normalize(&entry.path)));

    for entry in &skipped {
        warn!(
            document = %entry.path.display(),
            %target_ref,
            "skipping link checking, document is not changed relative to the target branch"
        );
    }

    Ok(Scope {
        mode: ScopeMode::Changed { target_ref },
        documents,
        skipped,
    })
}

// --target-repo, then GITHUB_REPOSITORY, then the upstream remote
fn target_repository_url(git: &dyn Git, env: &CiEnv, config: &CheckConfig) -> Result<String> {
    if let Some(repo) = config.target_repo.as_deref().or(env.repository.as_deref()) {
        return Ok(github::clone_url(repo));
    }

    if let Some(upstream) = git.upstream()? {
        if let Some((remote, _)) = upstream.split_once('/') {
            return git.remote_url(remote);
        }
    }

    Err(DocLinksError::NoTargetRepository)
}

// "./samples/pet/README.md" and "samples/pet/README.md" are the same document
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
