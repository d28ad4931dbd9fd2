use std::path::Path;

use crate::audit::AuditReport;
use crate::report::{ScanReport, ScanStatistics};
use crate::rules::Severity;

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[CRITICAL]",
        Severity::High => "[HIGH]    ",
        Severity::Medium => "[MEDIUM]  ",
        Severity::Low => "[LOW]     ",
        Severity::Info => "[INFO]    ",
    }
}

/// Render a scan report for the terminal: findings per file, then the
/// summary and recommendations.
pub fn render_scan(report: &ScanReport) -> String {
    let mut output = String::new();
    let summary = &report.summary;

    if summary.total_vulnerabilities == 0 {
        output.push_str("\n  No security findings detected.\n\n");
    } else {
        output.push_str(&format!(
            "\n  {} finding(s) detected:\n\n",
            summary.total_vulnerabilities
        ));
        for (file, findings) in &report.detailed_findings {
            for finding in findings {
                output.push_str(&format!(
                    "  {} {} {}\n",
                    severity_tag(finding.severity),
                    finding.rule_id,
                    finding.title
                ));
                output.push_str(&format!("           at {}:{}\n", file, finding.line_number));
                output.push_str(&format!("           code: {}\n", finding.code_snippet));
                output.push_str(&format!("           fix: {}\n\n", finding.recommendation));
            }
        }
    }

    output.push_str("  Security Scan Summary:\n");
    output.push_str(&format!(
        "  Files with findings: {}\n",
        summary.total_files_scanned
    ));
    output.push_str(&format!(
        "  Vulnerabilities found: {}\n",
        summary.total_vulnerabilities
    ));
    output.push_str(&format!("  Risk level: {}\n", summary.risk_level));
    output.push_str(&format!("  Risk score: {}\n", summary.risk_score));

    if summary.total_vulnerabilities > 0 {
        output.push_str("\n  Severity breakdown:\n");
        for severity in Severity::DESCENDING {
            let count = summary.severity_breakdown.get(severity);
            if count > 0 {
                output.push_str(&format!("    {}: {}\n", severity, count));
            }
        }
    }

    output.push_str("\n  Recommendations:\n");
    for rec in &report.recommendations {
        output.push_str(&format!("    {}\n", rec));
    }
    output.push('\n');

    output
}

/// Render coverage statistics for a directory scan.
pub fn render_statistics(stats: &ScanStatistics) -> String {
    let mut output = String::new();
    output.push_str(&format!("  {}\n", "=".repeat(50)));
    output.push_str("  SCAN STATISTICS\n");
    output.push_str(&format!("  {}\n", "=".repeat(50)));
    output.push_str(&format!(
        "  Files with vulnerabilities: {}/{}\n",
        stats.files_with_vulnerabilities, stats.total_files
    ));
    output.push_str(&format!(
        "  Total vulnerabilities: {}\n",
        stats.total_vulnerabilities
    ));
    output.push_str("  Most common vulnerabilities:\n");
    for (rule_id, count) in &stats.most_common_vulnerabilities {
        output.push_str(&format!("    {}: {}\n", rule_id, count));
    }
    output
}

/// One-screen summary of a finished audit.
pub fn render_audit_summary(report: &AuditReport, saved_to: &Path) -> String {
    let mut output = String::new();
    output.push_str("\n  Audit Summary:\n");
    output.push_str(&format!("  Audit ID: {}\n", report.audit_id));
    output.push_str(&format!("  Project: {}\n", report.project_name));
    output.push_str(&format!("  Level: {}\n", report.audit_level));
    output.push_str(&format!("  Status: {}\n", report.status));
    if let Some(minutes) = report.duration_minutes {
        output.push_str(&format!("  Duration: {:.1} minutes\n", minutes));
    }
    if let Some(metrics) = &report.metrics {
        output.push_str(&format!(
            "  Security Score: {:.1}/100\n",
            metrics.security_score
        ));
    }
    output.push_str(&format!(
        "  Risk Level: {}\n",
        report.risk_assessment.risk_level
    ));
    if !report.findings.is_empty() {
        output.push_str(&format!("  Total Findings: {}\n", report.findings.len()));
        for severity in Severity::DESCENDING {
            let count = report.risk_assessment.severity_breakdown.get(severity);
            if count > 0 {
                output.push_str(&format!("    {}: {}\n", severity, count));
            }
        }
    }
    output.push_str(&format!("  Report saved to: {}\n\n", saved_to.display()));
    output
}
