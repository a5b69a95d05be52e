// src/report.rs
// =============================================================================
// Collects every verdict of a run into one report.
//
// Local files are checked on the spot as the documents are scanned; remote
// URLs come in afterwards as CheckOutcomes. Nothing stops at the first
// problem: the report lists every broken link with the document, the line
// and the target as written, so it can be fixed without re-running.
//
// A run passes iff there are no failures at all.
// =============================================================================

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::checker::{CheckOutcome, LinkRef, LinkSet, LinkStatus, TransportKind};
use crate::context::RunContext;
use crate::scope::ScopeMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Relative link that doesn't exist on disk
    MissingLocalFile { path: PathBuf },
    /// Relative or anchor link in a document that only allows full URLs
    NotAUrl,
    /// Server answered with something other than 200
    BadStatus { url: String, code: u16 },
    /// No answer at all
    Transport {
        url: String,
        transport: TransportKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub document: PathBuf,
    pub target: String,
    pub line: usize,
    #[serde(flatten)]
    pub kind: FailureKind,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = format!("{}:{}", self.document.display(), self.line);
        match &self.kind {
            FailureKind::MissingLocalFile { path } => write!(
                f,
                "{location}: local file '{}' does not exist (link '{}')",
                path.display(),
                self.target
            ),
            FailureKind::NotAUrl => write!(
                f,
                "{location}: '{}' is not a URL, only full URLs are allowed in this document",
                self.target
            ),
            FailureKind::BadStatus { url, code } => {
                write!(f, "{location}: '{url}' gives code {code}")
            }
            FailureKind::Transport { url, message, .. } => {
                write!(f, "{location}: '{url}' failed: {message}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Branch the run was made on
    pub branch: String,
    /// Whether every document was in scope or only changed ones
    pub scope: ScopeMode,
    pub documents_checked: Vec<PathBuf>,
    pub documents_skipped: Vec<PathBuf>,
    pub local_links_checked: usize,
    /// One per unique remote URL, sorted by URL
    pub outcomes: Vec<CheckOutcome>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn remote_ok_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }
}

/// Accumulates verdicts while documents are scanned
#[derive(Debug, Default)]
pub struct Verdicts {
    documents_checked: Vec<PathBuf>,
    local_links_checked: usize,
    failures: Vec<Failure>,
}

impl Verdicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_checked(&mut self, document: &Path) {
        self.documents_checked.push(document.to_path_buf());
    }

    /// Checks a repository-relative path against the filesystem right away
    ///
    /// A path that is not relative (leading `/`, drive prefix) never exists:
    /// joining it onto the root would look outside the repository.
    pub fn check_local(&mut self, root: &Path, path: &Path, origin: LinkRef) {
        self.local_links_checked += 1;
        let exists = path.is_relative() && root.join(path).exists();
        debug!(path = %path.display(), exists, "local link");
        if !exists {
            self.failures.push(Failure {
                document: origin.document,
                target: origin.target,
                line: origin.line,
                kind: FailureKind::MissingLocalFile {
                    path: path.to_path_buf(),
                },
            });
        }
    }

    pub fn not_a_url(&mut self, origin: LinkRef) {
        self.failures.push(Failure {
            document: origin.document,
            target: origin.target,
            line: origin.line,
            kind: FailureKind::NotAUrl,
        });
    }

    // Merges the remote outcomes in and produces the report
    //
    // A failing URL yields one failure per place it was written. Branch,
    // scope mode and skipped documents are taken from the run context.
    pub fn finish(
        self,
        link_set: &LinkSet,
        outcomes: Vec<CheckOutcome>,
        ctx: &RunContext,
    ) -> Report {
        let mut failures = self.failures;

        for outcome in outcomes.iter().filter(|o| !o.is_ok()) {
            let kind = match &outcome.status {
                LinkStatus::Status { code } => FailureKind::BadStatus {
                    url: outcome.url.clone(),
                    code: *code,
                },
                LinkStatus::Transport { kind, message } => FailureKind::Transport {
                    url: outcome.url.clone(),
                    transport: *kind,
                    message: message.clone(),
                },
            };

            for origin in link_set.origins(&outcome.url) {
                failures.push(Failure {
                    document: origin.document.clone(),
                    target: origin.target.clone(),
                    line: origin.line,
                    kind: kind.clone(),
                });
            }
        }

        Report {
            branch: ctx.current_branch.clone(),
            scope: ctx.scope.mode.clone(),
            documents_checked: self.documents_checked,
            documents_skipped: ctx.scope.skipped.iter().map(|e| e.path.clone()).collect(),
            local_links_checked: self.local_links_checked,
            outcomes,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;
    use std::fs;

    fn ctx() -> RunContext {
        RunContext {
            root: PathBuf::from("."),
            current_branch: "main".to_string(),
            base_url: None,
            scope: Scope::full(Vec::new()),
        }
    }

    fn origin(document: &str, target: &str) -> LinkRef {
        LinkRef {
            document: PathBuf::from(document),
            target: target.to_string(),
            line: 3,
        }
    }

    #[test]
    fn existing_local_files_pass() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ARCHITECTURE.md"), "# arch").unwrap();

        let mut verdicts = Verdicts::new();
        verdicts.check_local(
            dir.path(),
            Path::new("ARCHITECTURE.md"),
            origin("README.md", "ARCHITECTURE.md"),
        );
        let report = verdicts.finish(&LinkSet::new(), Vec::new(), &ctx());

        assert!(report.passed());
        assert_eq!(report.local_links_checked, 1);
    }

    #[test]
    fn missing_local_file_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();

        let mut verdicts = Verdicts::new();
        verdicts.check_local(
            dir.path(),
            Path::new("./missing.md"),
            origin("README.md", "./missing.md"),
        );
        let report = verdicts.finish(&LinkSet::new(), Vec::new(), &ctx());

        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.document, PathBuf::from("README.md"));
        assert_eq!(failure.target, "./missing.md");
        assert_eq!(
            failure.to_string(),
            "README.md:3: local file './missing.md' does not exist (link './missing.md')"
        );
    }

    #[test]
    fn root_absolute_path_does_not_escape_the_repository() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::NamedTempFile::new().unwrap();

        let mut verdicts = Verdicts::new();
        verdicts.check_local(dir.path(), outside.path(), origin("README.md", "/tmp/x"));
        let report = verdicts.finish(&LinkSet::new(), Vec::new(), &ctx());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].kind,
            FailureKind::MissingLocalFile {
                path: outside.path().to_path_buf()
            }
        );
    }

    #[test]
    fn report_carries_branch_and_scope_mode() {
        let report = Verdicts::new().finish(&LinkSet::new(), Vec::new(), &ctx());
        assert_eq!(report.branch, "main");
        assert_eq!(report.scope, ScopeMode::Full);
        assert!(report.documents_skipped.is_empty());
    }

    #[test]
    fn failing_url_is_reported_for_every_document() {
        let mut set = LinkSet::new();
        set.insert(
            "https://example.test/gone".to_string(),
            origin("A.md", "https://example.test/gone"),
        );
        set.insert(
            "https://example.test/gone".to_string(),
            origin("B.md", "https://example.test/gone"),
        );
        set.insert(
            "https://example.test/ok".to_string(),
            origin("A.md", "https://example.test/ok"),
        );

        let outcomes = vec![
            CheckOutcome {
                url: "https://example.test/gone".to_string(),
                status: LinkStatus::Status { code: 404 },
                attempts: 1,
            },
            CheckOutcome {
                url: "https://example.test/ok".to_string(),
                status: LinkStatus::Status { code: 200 },
                attempts: 1,
            },
        ];

        let report = Verdicts::new().finish(&set, outcomes, &ctx());
        assert!(!report.passed());
        assert_eq!(report.remote_ok_count(), 1);

        let documents: Vec<_> = report.failures.iter().map(|f| f.document.clone()).collect();
        assert_eq!(documents, vec![PathBuf::from("A.md"), PathBuf::from("B.md")]);
        assert_eq!(
            report.failures[0].to_string(),
            "A.md:3: 'https://example.test/gone' gives code 404"
        );
    }

    #[test]
    fn transport_failures_are_not_successes() {
        let mut set = LinkSet::new();
        set.insert(
            "https://down.test".to_string(),
            origin("README.md", "https://down.test"),
        );
        let outcomes = vec![CheckOutcome {
            url: "https://down.test".to_string(),
            status: LinkStatus::Transport {
                kind: TransportKind::Dns,
                message: "Could not resolve hostname".to_string(),
            },
            attempts: 1,
        }];

        let report = Verdicts::new().finish(&set, outcomes, &ctx());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].kind,
            FailureKind::Transport {
                transport: TransportKind::Dns,
                ..
            }
        ));
    }

    #[test]
    fn not_a_url_failure() {
        let mut verdicts = Verdicts::new();
        verdicts.not_a_url(origin("pypi_README.md", "README.md"));
        let report = verdicts.finish(&LinkSet::new(), Vec::new(), &ctx());
        assert_eq!(report.failures[0].kind, FailureKind::NotAUrl);
    }
}
