use std::path::Path;

use crate::audit::AuditReport;
use crate::error::Result;
use crate::report::ScanReport;

/// Render a scan report as pretty JSON.
pub fn render_scan(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render an audit report as pretty JSON.
pub fn render_audit(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write a scan report to `path` as JSON.
pub fn save_scan_report(report: &ScanReport, path: &Path) -> Result<()> {
    std::fs::write(path, render_scan(report)?)?;
    tracing::info!(path = %path.display(), "security report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::generate_scan_report;
    use crate::scanner::ScanResults;

    #[test]
    fn scan_report_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("security-report.json");
        let report = generate_scan_report(&ScanResults::new());
        save_scan_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["risk_level"], "INFO");
        assert_eq!(value["summary"]["severity_breakdown"]["CRITICAL"], 0);
    }
}
