// src/context.rs
// =============================================================================
// Everything about the repository that is worked out once per run.
//
// The branch, the base URL for anchor links and the document scope are
// computed up front and then only read. Every later step gets the context
// passed in explicitly.
// =============================================================================

use std::path::PathBuf;

use tracing::info;

use crate::config::{CheckConfig, CiEnv};
use crate::error::Result;
use crate::git::Git;
use crate::github;
use crate::manifest::{default_manifest, load_manifest};
use crate::scope::{select_scope, Scope};

#[derive(Debug, Clone)]
pub struct RunContext {
    /// Repository root all document paths are relative to
    pub root: PathBuf,
    pub current_branch: String,
    /// `https://github.com/<owner>/<repo>/tree/<ref>/`, when one can be built
    pub base_url: Option<String>,
    pub scope: Scope,
}

impl RunContext {
    /// Queries git once and fixes the scope and base URL for the run
    ///
    /// Fails when git can't answer or the scope can't be computed.
    pub fn build(config: &CheckConfig, git: &dyn Git, env: &CiEnv) -> Result<Self> {
        let manifest = match &config.manifest {
            Some(path) => load_manifest(path)?,
            None => default_manifest(),
        };

        let current_branch = git.current_branch()?;
        let base_url = github::resolve_base_url(git, env)?;
        let scope = select_scope(git, env, config, &current_branch, manifest)?;

        info!(
            branch = %current_branch,
            base_url = base_url.as_deref().unwrap_or("<none>"),
            documents = scope.documents.len(),
            skipped = scope.skipped.len(),
            "run context ready"
        );

        Ok(Self {
            root: config.root.clone(),
            current_branch,
            base_url,
            scope,
        })
    }
}
