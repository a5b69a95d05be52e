// src/github/mod.rs
// =============================================================================
// This module knows how GitHub lays out web URLs for repository files.
//
// Currently implements:
// - Parsing GitHub remote URLs (https and ssh forms) to extract owner/repo
// - Building the "tree" base URL used to check anchor links
// - Turning "owner/repo" into a clone URL for fetching the target branch
// =============================================================================

mod remote;

pub use remote::{clone_url, parse_github_url, resolve_base_url};
