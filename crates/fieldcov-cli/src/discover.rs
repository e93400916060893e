//! # Input Discovery
//!
//! Locates the field schema and the documents to analyze.

use std::path::{Path, PathBuf};

use crate::resolve_path;

/// File name searched for when the requested schema path does not exist.
pub const DEFAULT_SCHEMA_NAME: &str = "fields.yaml";

/// Locate the field schema.
///
/// Tries `requested` (relative to `cwd`), then `fields.yaml` in `cwd`,
/// then `fields.yaml` in the parent of `cwd`. Returns `None` if none exist.
pub fn locate_schema(requested: &Path, cwd: &Path) -> Option<PathBuf> {
    let direct = resolve_path(requested, cwd);
    if direct.is_file() {
        return Some(direct);
    }

    let mut candidates = vec![cwd.join(DEFAULT_SCHEMA_NAME)];
    if let Some(parent) = cwd.parent() {
        candidates.push(parent.join(DEFAULT_SCHEMA_NAME));
    }

    let found = candidates.into_iter().find(|p| p.is_file());
    if let Some(ref path) = found {
        tracing::debug!(
            requested = %requested.display(),
            found = %path.display(),
            "schema not at requested path; using fallback"
        );
    }
    found
}

/// Documents to analyze.
///
/// Explicit paths win and are returned as given (resolved against `cwd`),
/// whether or not they exist; missing ones are reported during analysis.
/// Otherwise every `*.json` file directly inside `dir` is returned, sorted.
/// A missing directory yields no documents.
pub fn discover_documents(explicit: &[PathBuf], dir: &Path, cwd: &Path) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.iter().map(|p| resolve_path(p, cwd)).collect();
    }

    let dir = resolve_path(dir, cwd);
    let entries = match std::fs::read_dir(&dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "document directory not readable");
            return Vec::new();
        }
    };

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                None
            }
        })
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    documents.sort();
    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_schema_prefers_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("custom.yaml"), "field_categories: []").unwrap();
        std::fs::write(dir.path().join("fields.yaml"), "field_categories: []").unwrap();

        let found = locate_schema(Path::new("custom.yaml"), dir.path()).unwrap();
        assert_eq!(found, dir.path().join("custom.yaml"));
    }

    #[test]
    fn locate_schema_falls_back_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fields.yaml"), "field_categories: []").unwrap();

        let found = locate_schema(Path::new("missing/fields.yaml"), dir.path()).unwrap();
        assert_eq!(found, dir.path().join("fields.yaml"));
    }

    #[test]
    fn locate_schema_falls_back_to_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fields.yaml"), "field_categories: []").unwrap();
        let child = dir.path().join("results");
        std::fs::create_dir_all(&child).unwrap();

        let found = locate_schema(Path::new("fields.yaml"), &child).unwrap();
        assert_eq!(found, dir.path().join("fields.yaml"));
    }

    #[test]
    fn locate_schema_none_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let child = dir.path().join("a");
        std::fs::create_dir_all(&child).unwrap();
        assert!(locate_schema(Path::new("fields.yaml"), &child).is_none());
    }

    #[test]
    fn locate_schema_ignores_directory_named_like_schema() {
        let dir = tempfile::tempdir().unwrap();
        let child = dir.path().join("a");
        std::fs::create_dir_all(child.join("fields.yaml")).unwrap();
        assert!(locate_schema(Path::new("fields.yaml"), &child).is_none());
    }

    #[test]
    fn discover_uses_explicit_paths_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = vec![PathBuf::from("b.json"), PathBuf::from("/abs/a.json")];
        let docs = discover_documents(&explicit, Path::new("results"), dir.path());
        assert_eq!(docs, vec![dir.path().join("b.json"), PathBuf::from("/abs/a.json")]);
    }

    #[test]
    fn discover_lists_sorted_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");
        std::fs::create_dir_all(results.join("nested.json")).unwrap();
        std::fs::write(results.join("b.json"), "{}").unwrap();
        std::fs::write(results.join("a.json"), "{}").unwrap();
        std::fs::write(results.join("notes.md"), "#").unwrap();

        let docs = discover_documents(&[], Path::new("results"), dir.path());
        assert_eq!(docs, vec![results.join("a.json"), results.join("b.json")]);
    }

    #[test]
    fn discover_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let docs = discover_documents(&[], Path::new("results"), dir.path());
        assert!(docs.is_empty());
    }
}
