//! File and directory scanning: runs the rule engine over contract sources.

pub mod discover;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::Span;

use crate::error::{AuditError, Result};
use crate::rules::{Finding, RuleEngine};

pub use discover::{discover_files, DEFAULT_PATTERN};

/// Findings per scanned file, keyed (and therefore ordered) by path.
/// Only files with at least one finding are present.
pub type ScanResults = BTreeMap<PathBuf, Vec<Finding>>;

/// Applies the rule set to single files or whole directory trees.
pub struct Scanner {
    engine: RuleEngine,
    span: Span,
}

impl Scanner {
    /// Create a scanner logging under a default `scanner` span.
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("scanner"))
    }

    /// Create a scanner that logs within the caller-provided span.
    pub fn with_span(span: Span) -> Self {
        Self {
            engine: RuleEngine::new(),
            span,
        }
    }

    /// Scan the text of one file.
    pub fn scan_source(&self, content: &str) -> Vec<Finding> {
        let _enter = self.span.enter();
        let mut findings = Vec::new();
        for (rule, rule_findings) in self.engine.run_per_rule(content) {
            if !rule_findings.is_empty() {
                tracing::debug!(rule = %rule.id, count = rule_findings.len(), "rule matched");
            }
            findings.extend(rule_findings);
        }
        findings
    }

    /// Scan a single file. A read failure is logged and yields no findings.
    pub fn scan_file(&self, path: &Path) -> Vec<Finding> {
        match self.try_scan_file(path) {
            Ok(findings) => findings,
            Err(e) => {
                let _enter = self.span.enter();
                tracing::error!(path = %path.display(), error = %e, "error scanning file");
                Vec::new()
            }
        }
    }

    /// Scan a single file, surfacing read failures to the caller.
    pub fn try_scan_file(&self, path: &Path) -> Result<Vec<Finding>> {
        {
            let _enter = self.span.enter();
            tracing::info!(path = %path.display(), "scanning file");
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| AuditError::file_read(path, e))?;
        Ok(self.scan_source(&content))
    }

    /// Scan an explicit list of files, keeping only those with findings.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> ScanResults {
        let mut results = ScanResults::new();
        for path in paths {
            let findings = self.scan_file(path);
            if !findings.is_empty() {
                results.insert(path.clone(), findings);
            }
        }
        results
    }

    /// Scan every file under `root` whose name matches `pattern`.
    pub fn scan_directory(&self, root: &Path, pattern: &str) -> Result<ScanResults> {
        let files = discover_files(root, pattern)?;
        {
            let _enter = self.span.enter();
            tracing::info!(root = %root.display(), files = files.len(), "scanning directory");
        }
        Ok(self.scan_paths(&files))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
