pub mod console;
pub mod json;
pub mod text;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audit::AuditReport;
use crate::error::Result;
use crate::report::ScanReport;

/// Output format selection for scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render a scan report into the specified format.
pub fn render_scan(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render_scan(report)),
        OutputFormat::Json => json::render_scan(report),
    }
}

/// Persist an audit report as `audit_report_<id>.json` plus a parallel
/// `audit_report_<id>.txt`, creating `output_dir` if needed. Returns the
/// JSON path.
pub fn save_audit_report(report: &AuditReport, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let json_path = output_dir.join(format!("audit_report_{}.json", report.audit_id));
    std::fs::write(&json_path, json::render_audit(report)?)?;

    let txt_path = output_dir.join(format!("audit_report_{}.txt", report.audit_id));
    std::fs::write(&txt_path, text::render_audit(report))?;

    tracing::info!(path = %json_path.display(), "audit report saved");
    Ok(json_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLevel, Auditor};

    #[test]
    fn saves_both_formats() {
        let project = tempfile::tempdir().unwrap();
        std::fs::write(project.path().join("a.omega"), "token.call(amount);\n").unwrap();
        let report = Auditor::new().perform_comprehensive_audit(project.path(), AuditLevel::Standard);

        let out = tempfile::tempdir().unwrap();
        let dir = out.path().join("reports");
        let json_path = save_audit_report(&report, &dir).unwrap();

        assert!(json_path.ends_with(format!("audit_report_{}.json", report.audit_id)));
        let txt_path = json_path.with_extension("txt");
        assert!(txt_path.exists());

        let restored: AuditReport =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(restored.audit_id, report.audit_id);
        assert_eq!(restored.findings, report.findings);
    }

    #[test]
    fn lenient_format_parsing() {
        assert_eq!(OutputFormat::from_str_lenient("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str_lenient("text"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("sarif"), None);
    }
}
