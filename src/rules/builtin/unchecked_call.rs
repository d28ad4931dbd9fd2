use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, Rule, RuleMetadata, Severity};

/// OMEGA-004: Unchecked External Call
///
/// Flags `call`/`delegatecall`/`staticcall` on lines that carry no guard
/// (`require`, `assert`, or a conditional). Independent of OMEGA-001; the two
/// commonly fire on the same line.
pub struct UncheckedExternalCallRule;

static EXTERNAL_CALL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\.call\s*\(").unwrap(),
        Regex::new(r"\.delegatecall\s*\(").unwrap(),
        Regex::new(r"\.staticcall\s*\(").unwrap(),
    ]
});

const GUARD_KEYWORDS: [&str; 3] = ["require", "assert", "if"];

impl Rule for UncheckedExternalCallRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "OMEGA-004".into(),
            title: "Unchecked External Call".into(),
            description: "External call without return value checking".into(),
            severity: Severity::Medium,
            recommendation: "Always check return values of external calls".into(),
            references: super::refs(&[
                "https://consensys.github.io/smart-contract-best-practices/development-recommendations/",
                "https://solidity.readthedocs.io/en/v0.8.0/control-structures.html",
            ]),
        }
    }

    fn check(&self, content: &str) -> Vec<Finding> {
        super::match_lines(content, &EXTERNAL_CALL_PATTERNS, &self.metadata(), |line| {
            GUARD_KEYWORDS.iter().any(|g| line.contains(g))
        })
    }
}
