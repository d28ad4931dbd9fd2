use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, Rule, RuleMetadata, Severity};

/// OMEGA-005: Timestamp Dependence
///
/// Flags `block.timestamp`, the bare `now` accessor and any `timestamp`
/// token, case-insensitively. `block.timestamp` matches two patterns and so
/// yields two findings.
pub struct TimestampDependenceRule;

static TIMESTAMP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)block\.timestamp").unwrap(),
        Regex::new(r"(?i)now").unwrap(),
        Regex::new(r"(?i)timestamp").unwrap(),
    ]
});

impl Rule for TimestampDependenceRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "OMEGA-005".into(),
            title: "Timestamp Dependence".into(),
            description: "Usage of timestamp for critical logic".into(),
            severity: Severity::Medium,
            recommendation:
                "Avoid using timestamp for critical logic; use block.number instead".into(),
            references: super::refs(&[
                "https://consensys.github.io/smart-contract-best-practices/development-recommendations/",
                "https://ethereum.stackexchange.com/questions/5924/how-do-ethereum-mining-nodes-miners-validate-the-timestamp-of-a-block",
            ]),
        }
    }

    fn check(&self, content: &str) -> Vec<Finding> {
        super::match_lines(content, &TIMESTAMP_PATTERNS, &self.metadata(), |_| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_timestamp_matches_twice() {
        let findings = TimestampDependenceRule.check("if (block.timestamp > deadline) {}");
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.line_number == 1));
    }

    #[test]
    fn bare_now_is_flagged() {
        let findings = TimestampDependenceRule.check("\nuint t = NOW;");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_number, 2);
    }

    #[test]
    fn unrelated_lines_are_clean() {
        assert!(TimestampDependenceRule.check("uint height = block.number;").is_empty());
    }
}
