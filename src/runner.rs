// src/runner.rs
// =============================================================================
// One verification pass over the documents in scope.
//
// How it works:
// 1. Read each document once and extract its links
// 2. Classify every link: local files are checked on disk immediately,
//    remote URLs and resolved anchors go into the LinkSet
// 3. Check all unique URLs concurrently
// 4. Merge everything into a Report
//
// Only errors that make the run meaningless (unreadable document, anchor
// with no base URL) stop it; broken links just end up in the report.
// =============================================================================

use std::fs;

use tracing::{debug, info};

use crate::checker::{
    check_links, classify, extract_markdown_links, resolve_anchor, ClassifiedLink, ClassifyError,
    LinkRef, LinkSet, Probe,
};
use crate::config::CheckConfig;
use crate::context::RunContext;
use crate::error::{DocLinksError, Result};
use crate::manifest::DocEntry;
use crate::report::{Report, Verdicts};

pub async fn run<P>(ctx: &RunContext, config: &CheckConfig, probe: &P) -> Result<Report>
where
    P: Probe + ?Sized,
{
    let mut verdicts = Verdicts::new();
    let mut link_set = LinkSet::new();

    for entry in &ctx.scope.documents {
        let path = ctx.root.join(&entry.path);
        let text = fs::read_to_string(&path).map_err(|source| DocLinksError::ReadDocument {
            path: entry.path.clone(),
            source,
        })?;
        scan_document(ctx, entry, &text, &mut verdicts, &mut link_set)?;
    }

    info!(unique_urls = link_set.len(), "checking remote links");
    let outcomes = check_links(
        probe,
        link_set.urls(),
        config.retry,
        config.max_concurrency,
    )
    .await;

    Ok(verdicts.finish(&link_set, outcomes, ctx))
}

// Extracts and classifies the links of one document
pub fn scan_document(
    ctx: &RunContext,
    entry: &DocEntry,
    text: &str,
    verdicts: &mut Verdicts,
    link_set: &mut LinkSet,
) -> Result<()> {
    verdicts.document_checked(&entry.path);

    let links = extract_markdown_links(text);
    info!(document = %entry.path.display(), links = links.len(), "scanning document");

    for raw in links {
        let origin = LinkRef {
            document: entry.path.clone(),
            target: raw.target.clone(),
            line: raw.line,
        };

        match classify(&raw.target, &entry.path, entry.allow_local) {
            Err(ClassifyError::NotAUrl) => verdicts.not_a_url(origin),
            Ok(ClassifiedLink::LocalFile(path)) => verdicts.check_local(&ctx.root, &path, origin),
            Ok(ClassifiedLink::Remote(url)) => {
                if !link_set.insert(url.clone(), origin) {
                    debug!(%url, "already queued");
                }
            }
            Ok(ClassifiedLink::Anchor { document, fragment }) => {
                let url = resolve_anchor(
                    ctx.base_url.as_deref(),
                    &document,
                    &fragment,
                    &entry.path,
                    &raw.target,
                )?;
                link_set.insert(url, origin);
            }
        }
    }

    Ok(())
}
