// src/checker/classify.rs
// =============================================================================
// Works out what a link target points at.
//
// Rules, applied to each target T found in a document:
// 1. Document only allows full URLs (allow_local = false):
//    T must be an http(s) URL, anything else is a failure
// 2. T starts with '#': anchor in this document, rewritten to
//    "<file name>#fragment" (GitHub keys anchors by file name)
// 3. T is an http(s) URL: remote, checked over the network
// 4. T contains '#': anchor in another file, turned into a web URL
//    because heading anchors only exist in GitHub's rendering
// 5. Anything else: a file, checked on disk next to the document
//
// A target starting with '/' is relative to the repository root, the way
// GitHub renders it, never to the host filesystem.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{DocLinksError, Result};

/// What a link target refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLink {
    /// Repository-relative path checked for existence on disk
    LocalFile(PathBuf),
    /// Heading anchor in a repository document
    Anchor {
        /// Repository-relative document path, '/' separated
        document: String,
        fragment: String,
    },
    /// Fully-qualified URL checked over the network
    Remote(String),
}

/// A target that breaks the document's link rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Relative or anchor link where only full URLs are allowed
    NotAUrl,
}

// Classifies one link target
//
// Parameters:
//   target: the raw target text
//   document: repository-relative path of the document it was found in
//   allow_local: whether relative links are allowed in that document
pub fn classify(
    target: &str,
    document: &Path,
    allow_local: bool,
) -> std::result::Result<ClassifiedLink, ClassifyError> {
    if !allow_local {
        return if is_url(target) {
            Ok(ClassifiedLink::Remote(target.to_string()))
        } else {
            Err(ClassifyError::NotAUrl)
        };
    }

    // "#usage" in docs/guide.md -> "guide.md#usage"
    let target = if target.starts_with('#') {
        let file_name = document
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{file_name}{target}")
    } else {
        target.to_string()
    };

    if is_url(&target) {
        return Ok(ClassifiedLink::Remote(target));
    }

    let rooted = target
        .strip_prefix('/')
        .map(|rest| rest.trim_start_matches('/').to_string());
    let (dir, target) = match rooted {
        Some(rooted) => (String::new(), rooted),
        None => (document_dir(document), target),
    };

    if let Some((path, fragment)) = target.split_once('#') {
        return Ok(ClassifiedLink::Anchor {
            document: format!("{dir}{path}"),
            fragment: fragment.to_string(),
        });
    }

    Ok(ClassifiedLink::LocalFile(PathBuf::from(format!("{dir}{target}"))))
}

// Turns an anchor into the URL GitHub renders it at
//
// Errors: AnchorWithoutBase when no base URL is known. That one is fatal -
// an anchor that can't be checked must not be passed silently.
pub fn resolve_anchor(
    base_url: Option<&str>,
    document: &str,
    fragment: &str,
    source: &Path,
    raw_target: &str,
) -> Result<String> {
    let base = base_url.ok_or_else(|| DocLinksError::AnchorWithoutBase {
        document: source.to_path_buf(),
        link: raw_target.to_string(),
    })?;
    Ok(format!("{base}{document}#{fragment}"))
}

/// Whether a target is already an http(s) URL
pub fn is_url(target: &str) -> bool {
    Url::parse(target)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

// Directory of the document as a '/'-terminated prefix ("" at the root)
fn document_dir(document: &Path) -> String {
    let parent = document.parent().unwrap_or_else(|| Path::new(""));
    let parts: Vec<String> = parent
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}
