use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::Result;

/// Default file-name pattern for contract sources.
pub const DEFAULT_PATTERN: &str = "*.omega";

/// Find every regular file under `root` whose file name matches `pattern`.
///
/// Paths are returned sorted lexicographically so that reports do not
/// depend on filesystem enumeration order. A missing `root` has no files.
pub fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern)?;
    let mut files = Vec::new();

    if !root.exists() {
        tracing::debug!(root = %root.display(), "search root does not exist");
        return Ok(files);
    }

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .file_name()
            .map(|n| pattern.matches(&n.to_string_lossy()))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_nested_matches_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("b/nested/z.omega"), "").unwrap();
        fs::write(dir.path().join("a/y.omega"), "").unwrap();
        fs::write(dir.path().join("x.omega"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = discover_files(dir.path(), DEFAULT_PATTERN).unwrap();
        let rel: Vec<PathBuf> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/y.omega"),
                PathBuf::from("b/nested/z.omega"),
                PathBuf::from("x.omega"),
            ]
        );
    }

    #[test]
    fn directories_matching_the_pattern_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fake.omega")).unwrap();
        assert!(discover_files(dir.path(), DEFAULT_PATTERN).unwrap().is_empty());
    }

    #[test]
    fn missing_root_has_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/project");
        assert!(discover_files(&missing, DEFAULT_PATTERN).unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_files(dir.path(), "[").is_err());
    }
}
