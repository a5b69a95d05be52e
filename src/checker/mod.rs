// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Finds [text](target) links in Markdown text
// - classify: Decides whether a target is a file, an anchor or a URL
// - link_set: Deduplicates remote URLs across documents
// - http: Makes HTTP requests to check if URLs are alive
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::check_links()` instead of
// `checker::http::check_links()`.
// =============================================================================

mod classify;
mod http;
mod link_set;
mod markdown;

pub use classify::{classify, is_url, resolve_anchor, ClassifiedLink, ClassifyError};
pub use http::{
    check_links, check_single_link, CheckOutcome, LinkStatus, Probe, ReqwestProbe,
    TransportError, TransportKind, RATE_LIMITED_STATUS, SUCCESS_STATUS,
};
pub use link_set::{LinkRef, LinkSet};
pub use markdown::{extract_markdown_links, RawLink};
