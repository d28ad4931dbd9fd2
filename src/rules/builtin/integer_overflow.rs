use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, Rule, RuleMetadata, Severity};

/// OMEGA-002: Potential Integer Overflow
///
/// Flags arithmetic (compound assignment or binary `+ - * /`) on lines that
/// carry no safety marker.
pub struct IntegerOverflowRule;

static ARITHMETIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\+\s*=").unwrap(),
        Regex::new(r"-\s*=").unwrap(),
        Regex::new(r"\*\s*=").unwrap(),
        Regex::new(r"/\s*=").unwrap(),
        Regex::new(r"\+\s*[^=]").unwrap(),
        Regex::new(r"-\s*[^=]").unwrap(),
        Regex::new(r"\*\s*[^=]").unwrap(),
        Regex::new(r"/\s*[^=]").unwrap(),
    ]
});

/// Case-sensitive substrings that mark a line as overflow-protected.
const SAFETY_MARKERS: [&str; 3] = ["safe", "checked", "unchecked"];

impl Rule for IntegerOverflowRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "OMEGA-002".into(),
            title: "Potential Integer Overflow".into(),
            description: "Arithmetic operation without overflow protection".into(),
            severity: Severity::High,
            recommendation: "Use safe math libraries or explicit overflow checks".into(),
            references: super::refs(&[
                "https://consensys.github.io/smart-contract-best-practices/known_attacks/",
                "https://docs.openzeppelin.com/contracts/3.x/api/math",
            ]),
        }
    }

    fn check(&self, content: &str) -> Vec<Finding> {
        super::match_lines(content, &ARITHMETIC_PATTERNS, &self.metadata(), |line| {
            SAFETY_MARKERS.iter().any(|m| line.contains(m))
        })
    }
}
