use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audit::AuditLevel;
use crate::error::{AuditError, Result};
use crate::scanner::DEFAULT_PATTERN;

/// Config file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".omega-audit.toml";

/// Top-level configuration from `.omega-audit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File-name glob selecting contract sources.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub level: AuditLevel,
    /// Directory that receives persisted audit reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("audit_reports")
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            level: AuditLevel::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        glob::Pattern::new(&self.scan.pattern).map_err(|e| {
            AuditError::Config(format!("invalid scan.pattern '{}': {e}", self.scan.pattern))
        })?;
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# omega-audit configuration

[scan]
# File-name glob selecting contract sources.
pattern = "*.omega"

[audit]
# Audit level (BASIC, STANDARD, COMPREHENSIVE, CRITICAL).
level = "STANDARD"

# Where audit reports are written.
output_dir = "audit_reports"
"#
    }
}
