//! Project-level audit: combines scanner findings with the heuristic
//! analyzers into metrics, a risk assessment and a persisted report.

pub mod report;
pub mod risk;

use std::path::Path;

use chrono::Utc;
use tracing::Span;

use crate::analysis::{documentation, FileMetrics};
use crate::error::{AuditError, Result};
use crate::rules::Finding;
use crate::scanner::{discover_files, Scanner, DEFAULT_PATTERN};
use crate::scoring;

pub use report::{
    generate_audit_id, AuditLevel, AuditMetrics, AuditOutcome, AuditReport, AuditStatus,
    RiskAssessment,
};
pub use risk::{assess_risk, audit_recommendations, Deployment};

/// Orchestrates a comprehensive audit of one project tree.
pub struct Auditor {
    scanner: Scanner,
    pattern: String,
    span: Span,
}

impl Auditor {
    /// Create an auditor logging under a default `audit` span.
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("audit"))
    }

    /// Create an auditor that logs within the caller-provided span. The
    /// embedded scanner shares it.
    pub fn with_span(span: Span) -> Self {
        Self {
            scanner: Scanner::with_span(span.clone()),
            pattern: DEFAULT_PATTERN.to_string(),
            span,
        }
    }

    /// Override the contract file-name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Security findings for one file, as surfaced through the audit path:
    /// CRITICAL findings are flagged for manual review. Read failures are
    /// logged and yield no findings.
    pub fn perform_security_audit(&self, file: &Path) -> Vec<Finding> {
        {
            let _enter = self.span.enter();
            tracing::info!(path = %file.display(), "performing security audit");
        }
        self.scanner
            .scan_file(file)
            .iter()
            .map(Finding::for_audit)
            .collect()
    }

    /// Audit every matching file under `project_root`.
    ///
    /// Never returns an error: zero matching files is a COMPLETED report
    /// without metrics, and any failure during the walk becomes a FAILED
    /// report carrying the error text.
    pub fn perform_comprehensive_audit(
        &self,
        project_root: &Path,
        level: AuditLevel,
    ) -> AuditReport {
        let _enter = self.span.enter();
        let start = Utc::now();
        let mut report = AuditReport::pending(
            generate_audit_id(start, project_root),
            project_name(project_root),
            level,
            start,
        );
        report.advance(AuditStatus::InProgress);

        tracing::info!(
            audit_id = %report.audit_id,
            root = %project_root.display(),
            level = %level,
            "starting comprehensive audit"
        );

        match self.run(project_root) {
            Ok(Some(outcome)) => {
                tracing::info!(
                    audit_id = %report.audit_id,
                    findings = outcome.findings.len(),
                    "audit completed"
                );
                report.complete(outcome, Utc::now())
            }
            Ok(None) => {
                tracing::warn!(pattern = %self.pattern, "no contract files found for audit");
                report.complete_empty(&self.pattern, Utc::now())
            }
            Err(e) => {
                tracing::error!(audit_id = %report.audit_id, error = %e, "audit failed");
                report.fail(&e.to_string(), Utc::now())
            }
        }
    }

    /// The fallible part of an audit. `Ok(None)` means nothing matched.
    fn run(&self, project_root: &Path) -> Result<Option<AuditOutcome>> {
        let files = discover_files(project_root, &self.pattern)?;
        if files.is_empty() {
            return Ok(None);
        }

        let mut findings = Vec::new();
        let mut per_file = Vec::with_capacity(files.len());

        for file in &files {
            tracing::info!(path = %file.display(), "auditing file");
            let content =
                std::fs::read_to_string(file).map_err(|e| AuditError::file_read(file, e))?;
            per_file.push(FileMetrics::analyze(&content));
            findings.extend(
                self.scanner
                    .scan_source(&content)
                    .iter()
                    .map(Finding::for_audit),
            );
        }

        let metrics = aggregate_metrics(
            &per_file,
            scoring::security_score(&findings),
            documentation::analyze(project_root)?,
        )?;

        Ok(Some(AuditOutcome {
            recommendations: audit_recommendations(&findings, &metrics),
            risk_assessment: assess_risk(&findings, &metrics),
            findings,
            metrics,
        }))
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Arithmetic mean of each per-file score; total lines are summed.
pub fn aggregate_metrics(
    per_file: &[FileMetrics],
    security_score: f64,
    documentation_score: f64,
) -> Result<AuditMetrics> {
    if per_file.is_empty() {
        return Err(AuditError::Internal(
            "cannot aggregate metrics over zero files".into(),
        ));
    }

    Ok(AuditMetrics {
        total_lines: per_file.iter().map(|m| m.lines).sum(),
        complexity_score: mean(per_file, |m| m.complexity_score),
        security_score,
        gas_efficiency_score: mean(per_file, |m| m.gas_efficiency_score),
        code_quality_score: mean(per_file, |m| m.code_quality_score),
        documentation_score,
    })
}

fn mean(per_file: &[FileMetrics], score: impl Fn(&FileMetrics) -> f64) -> f64 {
    per_file.iter().map(score).sum::<f64>() / per_file.len() as f64
}

fn project_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".into())
}
