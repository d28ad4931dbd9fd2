use std::path::Path;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::rules::{Finding, SeverityCounts};
use crate::scoring::RiskLevel;

use super::risk::Deployment;

/// How deep an audit was requested to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    Basic,
    Standard,
    Comprehensive,
    Critical,
}

impl AuditLevel {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "comprehensive" => Some(Self::Comprehensive),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl Default for AuditLevel {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "BASIC"),
            Self::Standard => write!(f, "STANDARD"),
            Self::Comprehensive => write!(f, "COMPREHENSIVE"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Audit lifecycle. COMPLETED and FAILED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl AuditStatus {
    pub fn can_transition_to(self, next: AuditStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Failed)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Failed)
        )
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Project-level aggregate metrics, each score in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditMetrics {
    pub total_lines: usize,
    pub complexity_score: f64,
    pub security_score: f64,
    pub gas_efficiency_score: f64,
    pub code_quality_score: f64,
    pub documentation_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Weighted severity sum; -1 when the audit failed.
    pub risk_score: i64,
    pub severity_breakdown: SeverityCounts,
    pub recommendation: String,
    pub deployment_recommendation: Option<Deployment>,
}

impl RiskAssessment {
    fn no_input() -> Self {
        Self {
            risk_level: RiskLevel::Low,
            risk_score: 0,
            severity_breakdown: SeverityCounts::default(),
            recommendation: "No files to audit".to_string(),
            deployment_recommendation: None,
        }
    }

    fn failed() -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            risk_score: -1,
            severity_breakdown: SeverityCounts::default(),
            recommendation: "Audit could not be completed".to_string(),
            deployment_recommendation: None,
        }
    }
}

/// Everything a successful audit over at least one file produces.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub findings: Vec<Finding>,
    pub metrics: AuditMetrics,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
}

/// The persisted record of one audit run.
///
/// Created when the audit starts, populated exactly once when it completes
/// or fails, and not changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_id: String,
    pub project_name: String,
    pub audit_level: AuditLevel,
    pub status: AuditStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
    /// File-discovery order, then rule-registration order, then pattern order.
    pub findings: Vec<Finding>,
    /// Absent when no files were analyzed.
    pub metrics: Option<AuditMetrics>,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
    pub auditor_notes: Option<String>,
    pub next_audit_date: Option<DateTime<Utc>>,
}

impl AuditReport {
    /// A fresh report in PENDING state.
    pub fn pending(
        audit_id: String,
        project_name: String,
        audit_level: AuditLevel,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            audit_id,
            project_name,
            audit_level,
            status: AuditStatus::Pending,
            start_time,
            end_time: None,
            duration_minutes: None,
            findings: Vec::new(),
            metrics: None,
            recommendations: Vec::new(),
            risk_assessment: RiskAssessment::no_input(),
            auditor_notes: None,
            next_audit_date: None,
        }
    }

    /// Move to `next` if the lifecycle allows it. Returns whether the
    /// status changed.
    pub fn advance(&mut self, next: AuditStatus) -> bool {
        if !self.status.can_transition_to(next) {
            tracing::warn!(
                audit_id = %self.audit_id,
                from = %self.status,
                to = %next,
                "ignoring invalid audit status transition"
            );
            return false;
        }
        self.status = next;
        true
    }

    fn finish(&mut self, status: AuditStatus, end_time: DateTime<Utc>) -> bool {
        if !self.advance(status) {
            return false;
        }
        self.end_time = Some(end_time);
        self.duration_minutes = Some(minutes_between(self.start_time, end_time));
        true
    }

    /// Populate a successful audit.
    pub fn complete(mut self, outcome: AuditOutcome, end_time: DateTime<Utc>) -> Self {
        if self.finish(AuditStatus::Completed, end_time) {
            self.findings = outcome.findings;
            self.metrics = Some(outcome.metrics);
            self.recommendations = outcome.recommendations;
            self.risk_assessment = outcome.risk_assessment;
            self.next_audit_date = end_time.checked_add_months(Months::new(12));
        }
        self
    }

    /// Populate a successful audit that found nothing to analyze.
    pub fn complete_empty(mut self, pattern: &str, end_time: DateTime<Utc>) -> Self {
        if self.finish(AuditStatus::Completed, end_time) {
            self.recommendations = vec!["No contract files found for audit".to_string()];
            self.risk_assessment = RiskAssessment::no_input();
            self.auditor_notes = Some(format!(
                "No contract files matching '{pattern}' were found in the project directory"
            ));
        }
        self
    }

    /// Populate a failed audit.
    pub fn fail(mut self, error: &str, end_time: DateTime<Utc>) -> Self {
        if self.finish(AuditStatus::Failed, end_time) {
            self.findings.clear();
            self.metrics = None;
            self.recommendations = vec!["Audit failed due to technical error".to_string()];
            self.risk_assessment = RiskAssessment::failed();
            self.auditor_notes = Some(format!("Audit failed with error: {error}"));
        }
        self
    }
}

fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds().max(0) as f64 / 60_000.0
}

/// `AUDIT_<YYYYmmdd_HHMMSS>_<6 hex>`; the suffix hashes the start instant
/// and project path.
pub fn generate_audit_id(start_time: DateTime<Utc>, project: &Path) -> String {
    let digest = Sha256::new()
        .chain_update(start_time.timestamp_nanos_opt().unwrap_or_default().to_le_bytes())
        .chain_update(project.to_string_lossy().as_bytes())
        .finalize();
    let suffix = hex::encode(&digest[..3]);
    format!("AUDIT_{}_{}", start_time.format("%Y%m%d_%H%M%S"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    }

    fn in_progress() -> AuditReport {
        let mut report =
            AuditReport::pending("AUDIT_x".into(), "demo".into(), AuditLevel::Standard, start());
        assert!(report.advance(AuditStatus::InProgress));
        report
    }

    #[test]
    fn status_lifecycle_is_monotonic() {
        assert!(AuditStatus::Pending.can_transition_to(AuditStatus::InProgress));
        assert!(AuditStatus::InProgress.can_transition_to(AuditStatus::Completed));
        assert!(!AuditStatus::Completed.can_transition_to(AuditStatus::Failed));
        assert!(!AuditStatus::Failed.can_transition_to(AuditStatus::InProgress));
        assert!(!AuditStatus::InProgress.can_transition_to(AuditStatus::Pending));
    }

    #[test]
    fn terminal_report_cannot_be_refinished() {
        let end = start() + chrono::Duration::minutes(3);
        let report = in_progress().fail("boom", end);
        assert_eq!(report.status, AuditStatus::Failed);

        let again = report.clone().complete_empty("*.omega", end);
        assert_eq!(again, report);
    }

    #[test]
    fn failed_report_carries_error_and_unknown_risk() {
        let end = start() + chrono::Duration::seconds(30);
        let report = in_progress().fail("disk on fire", end);
        assert_eq!(report.risk_assessment.risk_level, RiskLevel::Unknown);
        assert_eq!(report.risk_assessment.risk_score, -1);
        assert_eq!(
            report.auditor_notes.as_deref(),
            Some("Audit failed with error: disk on fire")
        );
        assert_eq!(report.duration_minutes, Some(0.5));
        assert!(report.next_audit_date.is_none());
    }

    #[test]
    fn empty_completion_has_no_metrics() {
        let report = in_progress().complete_empty("*.omega", start());
        assert_eq!(report.status, AuditStatus::Completed);
        assert!(report.metrics.is_none());
        assert!(report.findings.is_empty());
        assert_eq!(report.risk_assessment.risk_level, RiskLevel::Low);
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn audit_id_has_expected_shape() {
        let id = generate_audit_id(start(), Path::new("/tmp/project"));
        assert!(id.starts_with("AUDIT_20240229_120000_"), "{id}");
        assert_eq!(id.len(), "AUDIT_20240229_120000_".len() + 6);
    }

    #[test]
    fn statuses_serialize_as_names() {
        assert_eq!(
            serde_json::to_string(&AuditStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&AuditLevel::Comprehensive).unwrap(),
            "\"COMPREHENSIVE\""
        );
    }
}
