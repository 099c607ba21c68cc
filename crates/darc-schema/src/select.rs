//! # Schema File Selection
//!
//! Recursive discovery of the schema documents to check.
//!
//! A path is selected when it is a regular file, its name ends with the
//! case-sensitive suffix `.json`, and its full path string does not contain
//! `_shared`. The exclusion is a literal substring test on the whole path,
//! not a path-segment match: `foo/_shared/bar.json` and `foo/bar_shared.json`
//! are both excluded, while `shared_config/bar.json` is kept.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::SchemaCheckError;

/// File name suffix of schema documents.
pub const SCHEMA_SUFFIX: &str = ".json";

/// Paths containing this token hold shared `$ref` fragments and are skipped.
pub const SHARED_TOKEN: &str = "_shared";

/// Name and path filter applied to every regular file found by the walk.
///
/// Does not touch the filesystem.
pub fn is_schema_candidate(path: &Path) -> bool {
    let rendered = path.to_string_lossy();
    rendered.ends_with(SCHEMA_SUFFIX) && !rendered.contains(SHARED_TOKEN)
}

/// Find every schema document under `root`.
///
/// Symlinks are not followed during descent. A symlink that resolves to a
/// regular file is selected; one that resolves to a directory, or is
/// dangling, is not.
///
/// # Errors
///
/// Returns [`SchemaCheckError::Walk`] if `root` does not exist, cannot be
/// read, or any directory beneath it fails to list. No partial result is
/// returned.
pub fn find_schema_files(root: impl AsRef<Path>) -> Result<BTreeSet<PathBuf>, SchemaCheckError> {
    let root = root.as_ref();
    let mut selected = BTreeSet::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| SchemaCheckError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if !is_regular_file(&entry) {
            continue;
        }

        let path = entry.into_path();
        if is_schema_candidate(&path) {
            tracing::debug!(path = %path.display(), "selected schema document");
            selected.insert(path);
        }
    }

    tracing::debug!(
        root = %root.display(),
        count = selected.len(),
        "schema discovery complete"
    );
    Ok(selected)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
    } else {
        entry.file_type().is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"{}").unwrap();
        path
    }

    fn relative(root: &Path, files: &BTreeSet<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn candidate_requires_json_suffix() {
        assert!(is_schema_candidate(Path::new("a/b/record.json")));
        assert!(!is_schema_candidate(Path::new("a/b/record.yaml")));
        assert!(!is_schema_candidate(Path::new("a/b/record.json.bak")));
    }

    #[test]
    fn candidate_suffix_is_case_sensitive() {
        assert!(!is_schema_candidate(Path::new("a/RECORD.JSON")));
        assert!(!is_schema_candidate(Path::new("a/record.Json")));
    }

    #[test]
    fn candidate_shared_is_literal_substring() {
        assert!(!is_schema_candidate(Path::new("foo/_shared/bar.json")));
        assert!(!is_schema_candidate(Path::new("foo/bar_shared.json")));
        assert!(!is_schema_candidate(Path::new("foo/not_shared_here/bar.json")));
        assert!(is_schema_candidate(Path::new("shared_config/bar.json")));
        assert!(is_schema_candidate(Path::new("foo/shared/bar.json")));
    }

    #[test]
    fn finds_nested_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta.json");
        touch(dir.path(), "alpha/record.json");
        touch(dir.path(), "alpha/deep/er/item.json");

        let files = find_schema_files(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            vec!["alpha/deep/er/item.json", "alpha/record.json", "zeta.json"]
        );
    }

    #[test]
    fn skips_shared_subtrees_but_keeps_shared_prefix() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "_shared/identifier.json");
        touch(dir.path(), "collection/_shared/agent.json");
        touch(dir.path(), "collection/common_shared.json");
        touch(dir.path(), "shared_things/kept.json");
        touch(dir.path(), "collection/record.json");

        let files = find_schema_files(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            vec!["collection/record.json", "shared_things/kept.json"]
        );
    }

    #[test]
    fn skips_other_extensions_and_directories_named_json() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "upper.JSON");
        touch(dir.path(), "record.json");
        std::fs::create_dir_all(dir.path().join("looks_like.json")).unwrap();

        let files = find_schema_files(dir.path()).unwrap();
        assert_eq!(relative(dir.path(), &files), vec!["record.json"]);
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let files = find_schema_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = find_schema_files(&missing).unwrap_err();
        match err {
            SchemaCheckError::Walk { root, .. } => assert_eq!(root, missing),
            other => panic!("expected Walk error, got: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_to_files_are_kept_and_to_directories_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let target = touch(dir.path(), "real/record.json");
        let outside = tempfile::tempdir().unwrap();
        touch(outside.path(), "hidden.json");

        std::os::unix::fs::symlink(&target, dir.path().join("alias.json")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked_dir.json")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("dangling.json"))
            .unwrap();

        let files = find_schema_files(dir.path()).unwrap();
        assert_eq!(
            relative(dir.path(), &files),
            vec!["alias.json", "real/record.json"]
        );
    }
}
