// src/manifest.rs
// =============================================================================
// The list of documentation files that get their links checked.
//
// The list is explicit on purpose: documents are not discovered by walking
// the tree. Each entry says whether relative links are allowed in it. A
// package-index readme is republished outside the repository, so relative
// paths would not resolve there and only full URLs are accepted.
//
// A JSON file can replace the built-in list:
//
//   [
//     { "path": "README.md" },
//     { "path": "pypi_README.md", "allow_local": false }
//   ]
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocLinksError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Whether relative and anchor links may be used in this document
    #[serde(default = "default_allow_local")]
    pub allow_local: bool,
}

fn default_allow_local() -> bool {
    true
}

impl DocEntry {
    pub fn new(path: impl Into<PathBuf>, allow_local: bool) -> Self {
        Self {
            path: path.into(),
            allow_local,
        }
    }
}

/// The documents checked when no manifest file is given
pub fn default_manifest() -> Vec<DocEntry> {
    vec![
        DocEntry::new("README.md", true),
        DocEntry::new("ARCHITECTURE.md", true),
        DocEntry::new("RELEASE_NOTES.md", true),
        DocEntry::new("samples/hello_world/README.md", true),
        DocEntry::new("samples/pet/README.md", true),
        DocEntry::new("pypi_README.md", false),
    ]
}

/// Reads a JSON manifest
pub fn load_manifest(path: &Path) -> Result<Vec<DocEntry>> {
    let text = fs::read_to_string(path).map_err(|e| DocLinksError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let entries: Vec<DocEntry> =
        serde_json::from_str(&text).map_err(|e| DocLinksError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if entries.is_empty() {
        return Err(DocLinksError::Manifest {
            path: path.to_path_buf(),
            message: "manifest lists no documents".to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_has_one_remote_only_document() {
        let manifest = default_manifest();
        let remote_only: Vec<_> = manifest.iter().filter(|e| !e.allow_local).collect();
        assert_eq!(remote_only.len(), 1);
        assert_eq!(remote_only[0].path, PathBuf::from("pypi_README.md"));
    }

    #[test]
    fn load_manifest_defaults_allow_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(
            &path,
            r#"[{"path": "README.md"}, {"path": "pypi.md", "allow_local": false}]"#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(
            manifest,
            vec![
                DocEntry::new("README.md", true),
                DocEntry::new("pypi.md", false),
            ]
        );
    }

    #[test]
    fn load_manifest_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_manifest(&path),
            Err(DocLinksError::Manifest { .. })
        ));
    }

    #[test]
    fn load_manifest_rejects_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        fs::write(&path, "[]").unwrap();
        assert!(load_manifest(&path).is_err());
    }
}
