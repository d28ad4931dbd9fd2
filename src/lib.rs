//! omega-audit: security scanner and audit engine for OMEGA contracts.
//!
//! Lexical, file-by-file vulnerability rules; scan reports with risk
//! scoring; and comprehensive project audits that add complexity, gas,
//! quality and documentation metrics and persist the result as JSON and
//! text.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use omegaaudit::{audit, AuditOptions};
//!
//! let report = audit(Path::new("./my-contracts"), &AuditOptions::default()).unwrap();
//! println!("Status: {}, Findings: {}", report.status, report.findings.len());
//! ```

pub mod analysis;
pub mod audit;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod scoring;

use std::path::{Path, PathBuf};

use config::{Config, CONFIG_FILE_NAME};
use error::Result;
use scanner::discover_files;

pub use audit::{AuditLevel, AuditReport, AuditStatus, Auditor};
pub use output::save_audit_report;
pub use report::{generate_scan_report, ScanReport, ScanStatistics};
pub use rules::{Finding, RuleEngine, Severity};
pub use scanner::{ScanResults, Scanner};

/// Options for a scan invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.omega-audit.toml` in the scan dir).
    pub config_path: Option<PathBuf>,
    /// CLI override for the file-name pattern.
    pub pattern_override: Option<String>,
}

/// Options for an audit invocation.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Path to config file (defaults to `.omega-audit.toml` in the project root).
    pub config_path: Option<PathBuf>,
    /// CLI override for the audit level.
    pub level_override: Option<AuditLevel>,
    /// CLI override for the file-name pattern.
    pub pattern_override: Option<String>,
    /// CLI override for the report directory (`audit_and_save` only).
    pub output_dir_override: Option<PathBuf>,
}

/// A scan report together with statistics over every discovered file.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub report: ScanReport,
    pub statistics: ScanStatistics,
}

/// A finished audit and the path of its persisted JSON report.
#[derive(Debug, Clone)]
pub struct SavedAudit {
    pub report: AuditReport,
    pub json_path: PathBuf,
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(p) => p.to_path_buf(),
        None if root.is_dir() => root.join(CONFIG_FILE_NAME),
        None => root
            .parent()
            .map(|p| p.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
    };
    Config::load(&config_path)
}

/// Scan a single file. Read failures are logged and yield no findings.
pub fn scan_file(path: &Path) -> Vec<Finding> {
    Scanner::new().scan_file(path)
}

/// Scan every file under `root` whose name matches `pattern`.
pub fn scan_directory(root: &Path, pattern: &str) -> Result<ScanResults> {
    Scanner::new().scan_directory(root, pattern)
}

/// Security findings for one file as surfaced through the audit path.
pub fn perform_security_audit(file: &Path) -> Vec<Finding> {
    Auditor::new().perform_security_audit(file)
}

/// Run a comprehensive audit of `project_root` with the default pattern.
pub fn perform_comprehensive_audit(project_root: &Path, level: AuditLevel) -> AuditReport {
    Auditor::new().perform_comprehensive_audit(project_root, level)
}

/// Scan a file or directory and aggregate the results into a report.
pub fn scan(path: &Path, options: &ScanOptions) -> Result<ScanOutput> {
    let config = load_config(path, options.config_path.as_deref())?;
    let pattern = options
        .pattern_override
        .clone()
        .unwrap_or(config.scan.pattern);

    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        discover_files(path, &pattern)?
    };
    let results = Scanner::new().scan_paths(&files);

    Ok(ScanOutput {
        report: generate_scan_report(&results),
        statistics: ScanStatistics::from_results(files.len(), &results),
    })
}

fn audit_with_config(project_root: &Path, options: &AuditOptions, config: Config) -> AuditReport {
    let level = options.level_override.unwrap_or(config.audit.level);
    let pattern = options
        .pattern_override
        .clone()
        .unwrap_or(config.scan.pattern);

    let auditor = Auditor::new().with_pattern(pattern);
    auditor.perform_comprehensive_audit(project_root, level)
}

/// Run a comprehensive audit using config defaults and CLI overrides.
pub fn audit(project_root: &Path, options: &AuditOptions) -> Result<AuditReport> {
    let config = load_config(project_root, options.config_path.as_deref())?;
    Ok(audit_with_config(project_root, options, config))
}

/// Run an audit and persist it to the configured (or overridden) report
/// directory.
pub fn audit_and_save(project_root: &Path, options: &AuditOptions) -> Result<SavedAudit> {
    let config = load_config(project_root, options.config_path.as_deref())?;
    let output_dir = options
        .output_dir_override
        .clone()
        .unwrap_or_else(|| config.audit.output_dir.clone());

    let report = audit_with_config(project_root, options, config);
    let json_path = save_audit_report(&report, &output_dir)?;
    Ok(SavedAudit { report, json_path })
}
