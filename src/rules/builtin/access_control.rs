use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, Rule, RuleMetadata, Severity};

/// OMEGA-003: Missing Access Control
///
/// File-scoped, two passes. The first pass looks for any access-control
/// marker anywhere in the file; if one exists the rule is silent for the
/// whole file. Otherwise the second pass flags every state-changing
/// function signature (declared `public`/`external`, or declaring a return
/// type).
///
/// One guarded function therefore silences the rule for every function in
/// the same file.
pub struct MissingAccessControlRule;

static STATE_CHANGING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)function\s+\w+\s*\([^)]*\)\s*(public|external)").unwrap(),
        Regex::new(r"(?i)function\s+\w+\s*\([^)]*\)\s*returns").unwrap(),
    ]
});

/// Markers matched case-insensitively against the whole file.
const ACCESS_CONTROL_MARKERS: [&str; 6] = [
    "onlyOwner",
    "require",
    "modifier",
    "access_control",
    "auth",
    "permission",
];

/// Pass 1: does the file mention any access-control marker?
pub(crate) fn has_access_control(content: &str) -> bool {
    let lowered = content.to_lowercase();
    ACCESS_CONTROL_MARKERS
        .iter()
        .any(|m| lowered.contains(&m.to_lowercase()))
}

impl Rule for MissingAccessControlRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "OMEGA-003".into(),
            title: "Missing Access Control".into(),
            description: "State-changing function without access control".into(),
            severity: Severity::Critical,
            recommendation: "Implement access control modifiers (onlyOwner, roles, etc.)".into(),
            references: super::refs(&[
                "https://consensys.github.io/smart-contract-best-practices/access-control/",
                "https://docs.openzeppelin.com/contracts/3.x/access-control",
            ]),
        }
    }

    fn check(&self, content: &str) -> Vec<Finding> {
        if has_access_control(content) {
            return Vec::new();
        }
        super::match_lines(
            content,
            &STATE_CHANGING_PATTERNS,
            &self.metadata(),
            |_| false,
        )
    }
}
