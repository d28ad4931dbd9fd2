use serde::{Deserialize, Serialize};

/// Confidence attached to every finding produced by the automated rules.
pub const AUTOMATED_CONFIDENCE: f64 = 0.8;

/// A single rule match against one line of source.
///
/// Findings are created by a rule at detection time and never mutated
/// afterwards; the audit path derives a new value via [`Finding::for_audit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier (e.g., "OMEGA-001").
    pub rule_id: String,
    /// Human-readable rule title.
    pub title: String,
    /// What was detected.
    pub description: String,
    /// Severity level (fixed per rule).
    pub severity: Severity,
    /// 1-based line number within the scanned file.
    pub line_number: usize,
    /// The matched line, surrounding whitespace trimmed.
    pub code_snippet: String,
    /// Suggested remediation.
    pub recommendation: String,
    /// Reference URLs.
    pub references: Vec<String>,
    /// How certain we are this is a real issue, in [0, 1].
    pub confidence: f64,
    /// Produced by an automated rule rather than a human reviewer.
    pub automated: bool,
    /// Set only for CRITICAL findings surfaced through the audit path.
    pub requires_manual_review: bool,
}

impl Finding {
    /// Build a finding for `rule` at `line_number`.
    pub fn from_rule(rule: &RuleMetadata, line_number: usize, line: &str) -> Self {
        Self {
            rule_id: rule.id.clone(),
            title: rule.title.clone(),
            description: rule.description.clone(),
            severity: rule.severity,
            line_number,
            code_snippet: line.trim().to_string(),
            recommendation: rule.recommendation.clone(),
            references: rule.references.clone(),
            confidence: AUTOMATED_CONFIDENCE,
            automated: true,
            requires_manual_review: false,
        }
    }

    /// Derive the audit-path copy of this finding: CRITICAL findings are
    /// flagged for manual review.
    pub fn for_audit(&self) -> Self {
        Self {
            requires_manual_review: self.severity == Severity::Critical,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const DESCENDING: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Per-severity finding counts, serialized with the severity names as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(rename = "CRITICAL")]
    pub critical: usize,
    #[serde(rename = "HIGH")]
    pub high: usize,
    #[serde(rename = "MEDIUM")]
    pub medium: usize,
    #[serde(rename = "LOW")]
    pub low: usize,
    #[serde(rename = "INFO")]
    pub info: usize,
}

impl SeverityCounts {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// Metadata about a rule, used for the `list-rules` catalogue and as the
/// template every finding of the rule is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub recommendation: String,
    pub references: Vec<String>,
}
