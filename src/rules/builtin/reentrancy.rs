use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, Rule, RuleMetadata, Severity};

/// OMEGA-001: Potential Reentrancy
///
/// Flags external-call sites: dot-calls, value transfers and sends, and the
/// literal `external_call` / `reentrant` markers. Case-insensitive.
pub struct ReentrancyRule;

static CALL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\.call\s*\(").unwrap(),
        Regex::new(r"(?i)\.transfer\s*\(").unwrap(),
        Regex::new(r"(?i)\.send\s*\(").unwrap(),
        Regex::new(r"(?i)external_call").unwrap(),
        Regex::new(r"(?i)reentrant").unwrap(),
    ]
});

impl Rule for ReentrancyRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "OMEGA-001".into(),
            title: "Potential Reentrancy Vulnerability".into(),
            description: "External calls detected without reentrancy protection".into(),
            severity: Severity::High,
            recommendation: "Use reentrancy guards or checks-effects-interactions pattern".into(),
            references: super::refs(&[
                "https://consensys.github.io/smart-contract-best-practices/attacks/reentrancy/",
                "https://solidity.readthedocs.io/en/v0.8.0/security-considerations.html",
            ]),
        }
    }

    fn check(&self, content: &str) -> Vec<Finding> {
        super::match_lines(content, &CALL_PATTERNS, &self.metadata(), |_| false)
    }
}
