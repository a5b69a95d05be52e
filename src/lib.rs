// src/lib.rs
// =============================================================================
// doclinks checks the links in a repository's documentation files.
//
// Flow of a run:
// 1. RunContext::build  - ask git for the branch, base URL and scope
// 2. runner::run        - extract, classify and verify every link
// 3. Report             - every broken link, with document and line
//
// The binary in main.rs wires these to the command line and prints the report
// through output.rs; everything here is usable (and tested) without it.
// =============================================================================

pub mod checker;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod github;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod report;
pub mod runner;
pub mod scope;

pub use config::{CheckConfig, CiEnv, RetryPolicy};
pub use context::RunContext;
pub use error::{DocLinksError, Result};
pub use report::{Failure, FailureKind, Report};
