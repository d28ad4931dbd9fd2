//! Risk assessment, deployment advice and audit-level recommendations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::rules::{Finding, SeverityCounts};
use crate::scoring::{self, RiskLevel};

use super::report::{AuditMetrics, RiskAssessment};

/// Deployment advice, decided by ordered precedence. Persisted as its
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deployment {
    NotRecommended,
    Risky,
    ProceedWithCaution,
    Acceptable,
}

impl Deployment {
    const ALL: [Self; 4] = [
        Self::NotRecommended,
        Self::Risky,
        Self::ProceedWithCaution,
        Self::Acceptable,
    ];

    /// Risk level first, then security score, then complexity.
    pub fn decide(risk_level: RiskLevel, metrics: &AuditMetrics) -> Self {
        if risk_level.is_severe() {
            Self::NotRecommended
        } else if metrics.security_score < 70.0 {
            Self::Risky
        } else if metrics.complexity_score > 80.0 {
            Self::ProceedWithCaution
        } else {
            Self::Acceptable
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NotRecommended => "DEPLOYMENT NOT RECOMMENDED",
            Self::Risky => "DEPLOYMENT RISKY - Security score below recommended threshold",
            Self::ProceedWithCaution => {
                "DEPLOYMENT WITH CAUTION - High complexity may introduce risks"
            }
            Self::Acceptable => "DEPLOYMENT ACCEPTABLE - Monitor and maintain security practices",
        }
    }
}

impl Serialize for Deployment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

impl<'de> Deserialize<'de> for Deployment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::ALL
            .into_iter()
            .find(|d| d.message() == text)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown deployment advice '{text}'")))
    }
}

impl std::fmt::Display for Deployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

pub fn risk_level_recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "DO NOT DEPLOY - Address all critical and high severity issues",
        RiskLevel::High => "Major security review required - Fix critical issues before deployment",
        RiskLevel::Medium => {
            "Security improvements recommended - Review and fix medium severity issues"
        }
        RiskLevel::Low | RiskLevel::Info => {
            "Minor security enhancements suggested - Monitor and improve over time"
        }
        RiskLevel::Unknown => "Unknown risk level",
    }
}

/// Recount severities and score them with the audit risk weights.
pub fn assess_risk(findings: &[Finding], metrics: &AuditMetrics) -> RiskAssessment {
    let severity_breakdown = SeverityCounts::from_findings(findings);
    let risk_score = scoring::audit_risk_score(&severity_breakdown);
    let risk_level = scoring::audit_risk_level(risk_score);

    RiskAssessment {
        risk_level,
        risk_score: i64::from(risk_score),
        severity_breakdown,
        recommendation: risk_level_recommendation(risk_level).to_string(),
        deployment_recommendation: Some(Deployment::decide(risk_level, metrics)),
    }
}

/// Threshold-based audit recommendations; always at least one.
pub fn audit_recommendations(findings: &[Finding], metrics: &AuditMetrics) -> Vec<String> {
    let counts = SeverityCounts::from_findings(findings);
    let mut recommendations = Vec::new();

    if counts.critical > 0 {
        recommendations.push("Address all CRITICAL vulnerabilities before deployment");
    }
    if counts.high > 0 {
        recommendations.push("Fix HIGH severity vulnerabilities in next release");
    }
    if counts.critical + counts.high > 5 {
        recommendations.push("Schedule a full manual security audit before production");
    }
    if metrics.security_score < 80.0 {
        recommendations.push("Improve security practices and patterns");
    }
    if metrics.complexity_score > 70.0 {
        recommendations.push("Reduce code complexity to improve maintainability");
    }
    if metrics.gas_efficiency_score < 60.0 {
        recommendations.push("Optimize gas usage for better cost efficiency");
    }
    if metrics.code_quality_score < 70.0 {
        recommendations.push("Improve code quality and documentation");
    }
    if recommendations.is_empty() {
        recommendations.push("Good security posture - maintain current practices");
    }

    recommendations.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleMetadata, Severity};

    fn metrics(security: f64, complexity: f64) -> AuditMetrics {
        AuditMetrics {
            total_lines: 10,
            complexity_score: complexity,
            security_score: security,
            gas_efficiency_score: 100.0,
            code_quality_score: 100.0,
            documentation_score: 100.0,
        }
    }

    fn finding(severity: Severity) -> Finding {
        let meta = RuleMetadata {
            id: "OMEGA-000".into(),
            title: "t".into(),
            description: "d".into(),
            severity,
            recommendation: "r".into(),
            references: vec![],
        };
        Finding::from_rule(&meta, 1, "x")
    }

    #[test]
    fn deployment_precedence() {
        let m = metrics(50.0, 90.0);
        assert_eq!(Deployment::decide(RiskLevel::High, &m), Deployment::NotRecommended);
        assert_eq!(Deployment::decide(RiskLevel::Medium, &m), Deployment::Risky);
        assert_eq!(
            Deployment::decide(RiskLevel::Low, &metrics(90.0, 90.0)),
            Deployment::ProceedWithCaution
        );
        assert_eq!(
            Deployment::decide(RiskLevel::Low, &metrics(90.0, 10.0)),
            Deployment::Acceptable
        );
    }

    #[test]
    fn deployment_persists_as_message_text() {
        let json = serde_json::to_string(&Deployment::Acceptable).unwrap();
        assert_eq!(
            json,
            "\"DEPLOYMENT ACCEPTABLE - Monitor and maintain security practices\""
        );
        for advice in Deployment::ALL {
            let text = serde_json::to_string(&advice).unwrap();
            assert_eq!(serde_json::from_str::<Deployment>(&text).unwrap(), advice);
        }
        assert!(serde_json::from_str::<Deployment>("\"ACCEPTABLE\"").is_err());
    }

    #[test]
    fn assessment_uses_audit_weights() {
        // 3 MEDIUM at weight 3 = 9 -> LOW; the scan weights would give 12.
        let findings = vec![finding(Severity::Medium); 3];
        let assessment = assess_risk(&findings, &metrics(85.0, 0.0));
        assert_eq!(assessment.risk_score, 9);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.severity_breakdown.medium, 3);
        assert_eq!(assessment.deployment_recommendation, Some(Deployment::Acceptable));
    }

    #[test]
    fn severe_findings_block_deployment() {
        let findings = vec![finding(Severity::Critical); 5];
        let assessment = assess_risk(&findings, &metrics(0.0, 0.0));
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert_eq!(
            assessment.deployment_recommendation,
            Some(Deployment::NotRecommended)
        );
    }

    #[test]
    fn healthy_project_gets_positive_message() {
        let recs = audit_recommendations(&[], &metrics(100.0, 0.0));
        assert_eq!(recs, vec!["Good security posture - maintain current practices"]);
    }

    #[test]
    fn every_threshold_can_fire() {
        let mut findings = vec![finding(Severity::Critical); 3];
        findings.extend(vec![finding(Severity::High); 3]);
        let m = AuditMetrics {
            total_lines: 1,
            complexity_score: 75.0,
            security_score: 0.0,
            gas_efficiency_score: 10.0,
            code_quality_score: 10.0,
            documentation_score: 0.0,
        };
        assert_eq!(audit_recommendations(&findings, &m).len(), 7);
    }
}
