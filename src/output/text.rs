use crate::audit::AuditReport;
use crate::rules::{Finding, Severity};

const RULE: &str = "------------------------------";

/// Render the human-readable audit report: header, findings grouped by
/// severity (CRITICAL first), then metrics, risk assessment and
/// recommendations.
pub fn render_audit(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str("OMEGA SECURITY AUDIT REPORT\n");
    out.push_str(&format!("{}\n\n", "=".repeat(60)));
    out.push_str(&format!("Audit ID: {}\n", report.audit_id));
    out.push_str(&format!("Project: {}\n", report.project_name));
    out.push_str(&format!("Audit Level: {}\n", report.audit_level));
    out.push_str(&format!("Status: {}\n", report.status));
    out.push_str(&format!("Started: {}\n", report.start_time.to_rfc3339()));
    if let Some(minutes) = report.duration_minutes {
        out.push_str(&format!("Duration: {:.1} minutes\n", minutes));
    }
    out.push('\n');

    if !report.findings.is_empty() {
        out.push_str(&format!("SECURITY FINDINGS\n{RULE}\n"));
        for severity in Severity::DESCENDING {
            let group: Vec<&Finding> = report
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "\n{} SEVERITY ({} findings):\n",
                severity,
                group.len()
            ));
            for finding in group {
                out.push_str(&format!(
                    "  - {} (Line {})\n",
                    finding.title, finding.line_number
                ));
                out.push_str(&format!("    {}\n", finding.description));
                out.push_str(&format!("    Recommendation: {}\n\n", finding.recommendation));
            }
        }
        out.push('\n');
    }

    if let Some(metrics) = &report.metrics {
        out.push_str(&format!("AUDIT METRICS\n{RULE}\n"));
        out.push_str(&format!("Total Lines of Code: {}\n", metrics.total_lines));
        out.push_str(&format!("Complexity Score: {:.1}/100\n", metrics.complexity_score));
        out.push_str(&format!("Security Score: {:.1}/100\n", metrics.security_score));
        out.push_str(&format!(
            "Gas Efficiency Score: {:.1}/100\n",
            metrics.gas_efficiency_score
        ));
        out.push_str(&format!(
            "Code Quality Score: {:.1}/100\n",
            metrics.code_quality_score
        ));
        out.push_str(&format!(
            "Documentation Score: {:.1}/100\n\n",
            metrics.documentation_score
        ));
    }

    let risk = &report.risk_assessment;
    out.push_str(&format!("RISK ASSESSMENT\n{RULE}\n"));
    out.push_str(&format!("Risk Level: {}\n", risk.risk_level));
    out.push_str(&format!("Risk Score: {}\n", risk.risk_score));
    out.push_str(&format!("Recommendation: {}\n", risk.recommendation));
    if let Some(deployment) = risk.deployment_recommendation {
        out.push_str(&format!("Deployment: {}\n", deployment));
    }
    out.push('\n');

    if !report.recommendations.is_empty() {
        out.push_str(&format!("AUDIT RECOMMENDATIONS\n{RULE}\n"));
        for rec in &report.recommendations {
            out.push_str(&format!("- {}\n", rec));
        }
    }

    if let Some(notes) = &report.auditor_notes {
        out.push_str(&format!("\nAuditor Notes: {}\n", notes));
    }
    if let Some(next) = report.next_audit_date {
        out.push_str(&format!("\nNext Audit Recommended: {}\n", next.to_rfc3339()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLevel, Auditor};

    #[test]
    fn groups_findings_by_descending_severity_before_metrics() {
        let project = tempfile::tempdir().unwrap();
        std::fs::write(
            project.path().join("v.omega"),
            "t = now;\nfunction withdraw(uint amount) public { ... }\n",
        )
        .unwrap();
        let report = Auditor::new().perform_comprehensive_audit(project.path(), AuditLevel::Standard);
        let text = render_audit(&report);

        let critical = text.find("CRITICAL SEVERITY (1 findings):").unwrap();
        let medium = text.find("MEDIUM SEVERITY (1 findings):").unwrap();
        let metrics = text.find("AUDIT METRICS").unwrap();
        let risk = text.find("RISK ASSESSMENT").unwrap();
        let recs = text.find("AUDIT RECOMMENDATIONS").unwrap();
        assert!(critical < medium && medium < metrics && metrics < risk && risk < recs);
        assert!(text.contains("  - Missing Access Control (Line 2)"));
        assert!(text.contains("Next Audit Recommended:"));
    }

    #[test]
    fn deployment_line_matches_persisted_json() {
        let project = tempfile::tempdir().unwrap();
        std::fs::write(project.path().join("ok.omega"), "x = 1;\n").unwrap();
        let report = Auditor::new().perform_comprehensive_audit(project.path(), AuditLevel::Standard);
        let deployment = report.risk_assessment.deployment_recommendation.unwrap();

        let text = render_audit(&report);
        assert!(text.starts_with("OMEGA SECURITY AUDIT REPORT\n"));
        assert!(text.contains(&format!("Deployment: {}\n", deployment.message())));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["risk_assessment"]["deployment_recommendation"],
            deployment.message()
        );
    }

    #[test]
    fn empty_report_has_no_findings_or_metrics_sections() {
        let project = tempfile::tempdir().unwrap();
        let report = Auditor::new().perform_comprehensive_audit(project.path(), AuditLevel::Basic);
        let text = render_audit(&report);
        assert!(!text.contains("SECURITY FINDINGS"));
        assert!(!text.contains("AUDIT METRICS"));
        assert!(text.contains("Risk Level: LOW"));
        assert!(text.contains("- No contract files found for audit"));
    }
}
