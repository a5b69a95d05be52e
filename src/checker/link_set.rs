// src/checker/link_set.rs
// =============================================================================
// Remote URLs collected across all documents, deduplicated.
//
// Two documents pointing at the same URL produce ONE request. The set still
// remembers every place a URL was written, so a failure can be reported
// against each document that contains it.
// =============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Where a link was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRef {
    /// Repository-relative document path
    pub document: PathBuf,
    /// Target text as written
    pub target: String,
    pub line: usize,
}

#[derive(Debug, Default, Clone)]
pub struct LinkSet {
    urls: BTreeMap<String, Vec<LinkRef>>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference; returns true the first time a URL is seen
    pub fn insert(&mut self, url: String, origin: LinkRef) -> bool {
        let refs = self.urls.entry(url).or_default();
        refs.push(origin);
        refs.len() == 1
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Unique URLs, sorted
    pub fn urls(&self) -> Vec<String> {
        self.urls.keys().cloned().collect()
    }

    /// Every place `url` was written
    pub fn origins(&self, url: &str) -> &[LinkRef] {
        self.urls.get(url).map(Vec::as_slice).unwrap_or(&[])
    }
}
