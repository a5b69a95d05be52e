// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Knows that `[x](y)` inside a code block is NOT a link
//
// Every link target is kept exactly as written, together with where it was
// found, so a broken link can be reported with a line number. Nothing is
// filtered here - deciding what a target means is classify's job.
// =============================================================================

use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use serde::Serialize;

/// A link target as written in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawLink {
    /// The part in parentheses in [text](target)
    pub target: String,
    /// Byte range of the whole link in the document
    #[serde(skip)]
    pub span: Range<usize>,
    /// 1-based line the link starts on
    pub line: usize,
}

// Extracts every link and image target from Markdown text
//
// Parameters:
//   markdown: the markdown text to parse
//
// Returns: Vec<RawLink> in document order
//
// Example input:
//   "See [usage](#usage) and ![logo](img/logo.png)"
//
// Example output targets:
//   ["#usage", "img/logo.png"]
pub fn extract_markdown_links(markdown: &str) -> Vec<RawLink> {
    let mut links = Vec::new();

    // The offset iterator gives each event the byte range it came from
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).into_offset_iter();

    for (event, span) in parser {
        // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
        let (link_type, dest_url) = match event {
            Event::Start(Tag::Link(link_type, dest_url, _title))
            | Event::Start(Tag::Image(link_type, dest_url, _title)) => (link_type, dest_url),
            _ => continue,
        };

        // <https://...> and <me@example.com> aren't [text](target) links
        if !is_markup_link(link_type) {
            continue;
        }

        let target = dest_url.trim();
        if target.is_empty() {
            continue;
        }

        links.push(RawLink {
            target: target.to_string(),
            line: line_of(markdown, &span),
            span,
        });
    }

    links
}

fn is_markup_link(link_type: LinkType) -> bool {
    matches!(
        link_type,
        LinkType::Inline | LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut
    )
}

fn line_of(text: &str, span: &Range<usize>) -> usize {
    text[..span.start].matches('\n').count() + 1
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not a regex like \[.*?\]\((.*?)\) ?
//    - It matches inside code blocks, where [x](y) is sample code
//    - It breaks on titles: [x](y "title")
//    - pulldown-cmark already handles both
//
// 2. Reference links:
//    - [text][ref] with "[ref]: https://..." elsewhere gives the same
//      Tag::Link event, with the definition's URL as dest_url
//
// 3. What does into_offset_iter() give us?
//    - (Event, Range<usize>) pairs
//    - The range points back into the original text, which is how we get
//      line numbers without tracking them ourselves
// -----------------------------------------------------------------------------
