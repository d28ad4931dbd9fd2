//! Severity weight tables and risk bucketing.
//!
//! The scan report, the audit security score and the audit risk score each
//! use their own weight table. They are kept as three separate functions.

use serde::{Deserialize, Serialize};

use crate::rules::{Finding, Severity, SeverityCounts};

/// Risk-score thresholds shared by both bucketing functions.
pub mod thresholds {
    pub const CRITICAL: u32 = 50;
    pub const HIGH: u32 = 25;
    pub const MEDIUM: u32 = 10;
    pub const LOW: u32 = 1;
}

/// Qualitative risk level derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    Info,
    /// The audit did not complete, so no level could be computed.
    Unknown,
}

impl RiskLevel {
    /// Whether the level blocks deployment.
    pub fn is_severe(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
            Self::Info => write!(f, "INFO"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Scan-report weights.
pub fn scan_risk_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::High => 7,
        Severity::Medium => 4,
        Severity::Low => 1,
        Severity::Info => 0,
    }
}

/// Audit security-score penalty weights.
pub fn security_penalty_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 25,
        Severity::High => 15,
        Severity::Medium => 5,
        Severity::Low => 2,
        Severity::Info => 0,
    }
}

/// Audit risk-score weights.
pub fn audit_risk_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::High => 7,
        Severity::Medium => 3,
        Severity::Low => 1,
        Severity::Info => 0,
    }
}

fn weighted_sum(counts: &SeverityCounts, weight: fn(Severity) -> u32) -> u32 {
    Severity::DESCENDING
        .iter()
        .map(|&s| {
            let count = u32::try_from(counts.get(s)).unwrap_or(u32::MAX);
            weight(s).saturating_mul(count)
        })
        .fold(0, u32::saturating_add)
}

pub fn scan_risk_score(counts: &SeverityCounts) -> u32 {
    weighted_sum(counts, scan_risk_weight)
}

pub fn audit_risk_score(counts: &SeverityCounts) -> u32 {
    weighted_sum(counts, audit_risk_weight)
}

/// Bucket a scan risk score. Scores below 1 are INFO.
pub fn scan_risk_level(score: u32) -> RiskLevel {
    if score >= thresholds::CRITICAL {
        RiskLevel::Critical
    } else if score >= thresholds::HIGH {
        RiskLevel::High
    } else if score >= thresholds::MEDIUM {
        RiskLevel::Medium
    } else if score >= thresholds::LOW {
        RiskLevel::Low
    } else {
        RiskLevel::Info
    }
}

/// Bucket an audit risk score. The audit path never reports INFO: anything
/// below the MEDIUM threshold is LOW.
pub fn audit_risk_level(score: u32) -> RiskLevel {
    match scan_risk_level(score) {
        RiskLevel::Info => RiskLevel::Low,
        level => level,
    }
}

/// Penalty-based 0-100 security score.
pub fn security_score(findings: &[Finding]) -> f64 {
    let penalty = findings
        .iter()
        .map(|f| security_penalty_weight(f.severity))
        .fold(0, u32::saturating_add);
    security_score_from_penalty(penalty)
}

pub fn security_score_from_penalty(penalty: u32) -> f64 {
    100.0 - f64::from(penalty.min(100))
}
