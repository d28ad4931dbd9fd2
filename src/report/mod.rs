//! Scan-level report: aggregates a directory scan into severity and rule
//! breakdowns, a risk score and level, and recommendations.

pub mod statistics;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{Finding, SeverityCounts};
use crate::scanner::ScanResults;
use crate::scoring::{self, RiskLevel};

pub use statistics::ScanStatistics;

/// Summary block of a scan report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of entries in the scan results (files with findings).
    pub total_files_scanned: usize,
    pub total_vulnerabilities: usize,
    pub severity_breakdown: SeverityCounts,
    pub rule_breakdown: BTreeMap<String, usize>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

/// Complete scan report, as persisted by [`crate::output::json::save_scan_report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub summary: ScanSummary,
    pub recommendations: Vec<String>,
    pub detailed_findings: BTreeMap<String, Vec<Finding>>,
}

/// Aggregate directory-scan results into a report.
pub fn generate_scan_report(results: &ScanResults) -> ScanReport {
    let all = results.values().flatten();
    let severity_breakdown = SeverityCounts::from_findings(all.clone());

    let mut rule_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for finding in all {
        *rule_breakdown.entry(finding.rule_id.clone()).or_insert(0) += 1;
    }

    let risk_score = scoring::scan_risk_score(&severity_breakdown);

    ScanReport {
        summary: ScanSummary {
            total_files_scanned: results.len(),
            total_vulnerabilities: severity_breakdown.total(),
            severity_breakdown,
            rule_breakdown,
            risk_score,
            risk_level: scoring::scan_risk_level(risk_score),
        },
        recommendations: scan_recommendations(&severity_breakdown),
        detailed_findings: results
            .iter()
            .map(|(path, findings)| (path.display().to_string(), findings.clone()))
            .collect(),
    }
}

/// Threshold-based recommendations, in priority order.
pub fn scan_recommendations(counts: &SeverityCounts) -> Vec<String> {
    let mut recommendations = Vec::new();

    if counts.critical > 0 {
        recommendations
            .push("Address CRITICAL vulnerabilities immediately before deployment".to_string());
    }
    if counts.high > 0 {
        recommendations
            .push("Fix HIGH severity vulnerabilities before mainnet deployment".to_string());
    }
    if counts.medium > 0 {
        recommendations
            .push("Review MEDIUM severity issues and fix based on risk assessment".to_string());
    }
    if counts.critical + counts.high > 5 {
        recommendations
            .push("Conduct comprehensive security audit before production".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push(
            "No significant security issues found - maintain secure coding practices".to_string(),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleEngine;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn results(files: &[(&str, &str)]) -> ScanResults {
        let engine = RuleEngine::new();
        files
            .iter()
            .map(|(path, src)| (PathBuf::from(path), engine.run(src)))
            .filter(|(_, f)| !f.is_empty())
            .collect()
    }

    #[test]
    fn empty_results_are_info_with_positive_message() {
        let report = generate_scan_report(&ScanResults::new());
        assert_eq!(report.summary.total_vulnerabilities, 0);
        assert_eq!(report.summary.risk_score, 0);
        assert_eq!(report.summary.risk_level, RiskLevel::Info);
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].starts_with("No significant"));
    }

    #[test]
    fn breakdowns_and_score_use_scan_weights() {
        // One HIGH (OMEGA-001) and one MEDIUM (OMEGA-004): 7 + 4.
        let report = generate_scan_report(&results(&[("a.omega", "token.call(amount);")]));
        assert_eq!(report.summary.total_files_scanned, 1);
        assert_eq!(report.summary.total_vulnerabilities, 2);
        assert_eq!(report.summary.severity_breakdown.high, 1);
        assert_eq!(report.summary.severity_breakdown.medium, 1);
        assert_eq!(report.summary.rule_breakdown["OMEGA-001"], 1);
        assert_eq!(report.summary.rule_breakdown["OMEGA-004"], 1);
        assert_eq!(report.summary.risk_score, 11);
        assert_eq!(report.summary.risk_level, RiskLevel::Medium);
        assert_eq!(
            report.recommendations,
            vec![
                "Fix HIGH severity vulnerabilities before mainnet deployment".to_string(),
                "Review MEDIUM severity issues and fix based on risk assessment".to_string(),
            ]
        );
    }

    #[test]
    fn many_severe_findings_require_full_audit() {
        let counts = SeverityCounts {
            critical: 3,
            high: 3,
            ..Default::default()
        };
        let recs = scan_recommendations(&counts);
        assert_eq!(recs.len(), 3);
        assert_eq!(
            recs[2],
            "Conduct comprehensive security audit before production"
        );
    }

    #[test]
    fn detailed_findings_serialize_all_fields() {
        let report = generate_scan_report(&results(&[("a.omega", "x.send(1);")]));
        let value = serde_json::to_value(&report).unwrap();
        let finding = &value["detailed_findings"]["a.omega"][0];
        assert_eq!(finding["rule_id"], "OMEGA-001");
        assert_eq!(finding["severity"], "HIGH");
        assert_eq!(finding["line_number"], 1);
        assert_eq!(finding["code_snippet"], "x.send(1);");
        assert!(finding["references"].as_array().unwrap().len() == 2);
        assert_eq!(value["summary"]["risk_level"], "LOW");
    }
}
