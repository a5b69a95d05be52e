// src/output.rs
// =============================================================================
// Renders a finished Report for the terminal.
//
// Two formats:
// - table (default): URL/status/attempts table, broken links, summary
// - JSON (--json): the Report itself, and nothing else
//
// In JSON mode stdout must parse as one JSON document, so progress notes go
// to stderr instead (see `note`).
// =============================================================================

use std::io::{self, Write};

use crate::checker::LinkStatus;
use crate::report::Report;
use crate::scope::ScopeMode;

// Writes the report either as a table or JSON
//
// Parameters:
//   out: where to write (stdout in the binary, a buffer in tests)
//   report: the finished report
//   json: true for machine-readable output
pub fn write_report<W: Write>(out: &mut W, report: &Report, json: bool) -> io::Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        writeln!(out, "{}", json_output)
    } else {
        write_table(out, report)
    }
}

/// A progress line: stdout for the table, stderr when stdout carries JSON
pub fn note(json: bool, message: &str) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

// Human-readable table
fn write_table<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    if !report.outcomes.is_empty() {
        writeln!(out, "\n{:<70} {:<20} {:<8}", "URL", "STATUS", "ATTEMPTS")?;
        writeln!(out, "{}", "=".repeat(100))?;

        for outcome in &report.outcomes {
            // Truncate URL if too long for display
            let url_display = if outcome.url.chars().count() > 67 {
                let head: String = outcome.url.chars().take(67).collect();
                format!("{}...", head)
            } else {
                outcome.url.clone()
            };

            writeln!(
                out,
                "{:<70} {:<20} {:<8}",
                url_display,
                format_status(&outcome.status),
                outcome.attempts
            )?;
        }
    }

    if !report.failures.is_empty() {
        writeln!(out, "\n❌ Broken links:")?;
        for failure in &report.failures {
            writeln!(out, "   {}", failure)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   🌿 Branch: {}", report.branch)?;
    writeln!(out, "   🔎 Scope: {}", format_scope(&report.scope))?;
    writeln!(out, "   📄 Documents checked: {}", report.documents_checked.len())?;
    writeln!(out, "   ⏭️  Documents skipped: {}", report.documents_skipped.len())?;
    writeln!(out, "   📁 Local links: {}", report.local_links_checked)?;
    writeln!(
        out,
        "   🌐 Unique URLs: {} ({} OK)",
        report.outcomes.len(),
        report.remote_ok_count()
    )?;
    writeln!(out, "   ❌ Broken: {}", report.failures.len())
}

fn format_status(status: &LinkStatus) -> String {
    match status {
        LinkStatus::Status { code: 200 } => "✅ 200".to_string(),
        LinkStatus::Status { code: 429 } => "⏱️  429 RATE LIMITED".to_string(),
        LinkStatus::Status { code } => format!("❌ {}", code),
        LinkStatus::Transport { kind, .. } => format!("⚠️  {:?}", kind),
    }
}

fn format_scope(scope: &ScopeMode) -> String {
    match scope {
        ScopeMode::Full => "all documents".to_string(),
        ScopeMode::Changed { target_ref } => format!("documents changed relative to {target_ref}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckOutcome, LinkRef, LinkSet};
    use crate::context::RunContext;
    use crate::manifest::DocEntry;
    use crate::report::Verdicts;
    use crate::scope::Scope;
    use std::path::{Path, PathBuf};

    fn feature_context(skipped: Vec<DocEntry>) -> RunContext {
        RunContext {
            root: PathBuf::from("."),
            current_branch: "feature/docs".to_string(),
            base_url: None,
            scope: Scope {
                mode: ScopeMode::Changed {
                    target_ref: "main".to_string(),
                },
                documents: Vec::new(),
                skipped,
            },
        }
    }

    fn render(report: &Report, json: bool) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report, json).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_output_is_a_single_document() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = feature_context(Vec::new());

        let mut verdicts = Verdicts::new();
        verdicts.document_checked(Path::new("README.md"));
        verdicts.check_local(
            dir.path(),
            Path::new("missing.md"),
            LinkRef {
                document: PathBuf::from("README.md"),
                target: "missing.md".to_string(),
                line: 2,
            },
        );
        let mut set = LinkSet::new();
        set.insert(
            "https://example.test/ok".to_string(),
            LinkRef {
                document: PathBuf::from("README.md"),
                target: "https://example.test/ok".to_string(),
                line: 4,
            },
        );
        let outcomes = vec![CheckOutcome {
            url: "https://example.test/ok".to_string(),
            status: LinkStatus::Status { code: 200 },
            attempts: 1,
        }];
        let report = verdicts.finish(&set, outcomes, &ctx);

        let value: serde_json::Value = serde_json::from_str(&render(&report, true)).unwrap();
        assert_eq!(value["branch"], "feature/docs");
        assert_eq!(value["scope"]["mode"], "changed");
        assert_eq!(value["scope"]["target_ref"], "main");
        assert_eq!(value["documents_checked"][0], "README.md");
        assert_eq!(value["failures"][0]["kind"], "missing_local_file");
        assert_eq!(value["failures"][0]["line"], 2);
        assert_eq!(value["outcomes"][0]["url"], "https://example.test/ok");
    }

    #[test]
    fn empty_scope_still_renders_json() {
        let ctx = feature_context(vec![DocEntry::new("B.md", true)]);
        let report = Verdicts::new().finish(&LinkSet::new(), Vec::new(), &ctx);

        let value: serde_json::Value = serde_json::from_str(&render(&report, true)).unwrap();
        assert_eq!(value["documents_checked"], serde_json::json!([]));
        assert_eq!(value["documents_skipped"], serde_json::json!(["B.md"]));
        assert_eq!(value["failures"], serde_json::json!([]));
    }

    #[test]
    fn table_summary_names_branch_and_scope() {
        let ctx = feature_context(Vec::new());
        let report = Verdicts::new().finish(&LinkSet::new(), Vec::new(), &ctx);

        let table = render(&report, false);
        assert!(table.contains("Branch: feature/docs"));
        assert!(table.contains("Scope: documents changed relative to main"));
        assert!(table.contains("Broken: 0"));
    }
}
