use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::Result;

const README_POINTS: f64 = 40.0;
const API_DOC_POINTS: f64 = 30.0;
const SECURITY_DOC_POINTS: f64 = 30.0;

/// Which documentation files exist anywhere under a project root.
///
/// Only `.md` and `.txt` files are considered; names are matched
/// case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPresence {
    pub readme: bool,
    pub api_docs: bool,
    pub security_docs: bool,
}

impl DocumentationPresence {
    pub fn detect(root: &Path) -> Result<Self> {
        let mut presence = Self::default();

        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_doc = path
                .extension()
                .map(|e| e == "md" || e == "txt")
                .unwrap_or(false);
            if !is_doc {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            presence.readme |= name.starts_with("readme");
            presence.api_docs |= name.contains("api");
            presence.security_docs |= name.contains("security");
        }

        Ok(presence)
    }

    /// Fixed point awards: README 40, API docs 30, security docs 30.
    pub fn score(&self) -> f64 {
        let mut score = 0.0;
        if self.readme {
            score += README_POINTS;
        }
        if self.api_docs {
            score += API_DOC_POINTS;
        }
        if self.security_docs {
            score += SECURITY_DOC_POINTS;
        }
        score
    }
}

/// Documentation score for the project rooted at `root`.
pub fn analyze(root: &Path) -> Result<f64> {
    Ok(DocumentationPresence::detect(root)?.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn awards_points_per_document_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# x").unwrap();
        assert_eq!(analyze(dir.path()).unwrap(), 40.0);

        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/API_reference.txt"), "").unwrap();
        assert_eq!(analyze(dir.path()).unwrap(), 70.0);

        fs::write(dir.path().join("docs/SECURITY.md"), "").unwrap();
        assert_eq!(analyze(dir.path()).unwrap(), 100.0);
    }

    #[test]
    fn other_extensions_do_not_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.rst"), "").unwrap();
        fs::write(dir.path().join("api.omega"), "").unwrap();
        assert_eq!(analyze(dir.path()).unwrap(), 0.0);
    }
}
