mod access_control;
mod integer_overflow;
mod reentrancy;
mod timestamp;
mod unchecked_call;

use regex::Regex;

use super::{Finding, Rule, RuleMetadata};

pub use access_control::MissingAccessControlRule;
pub use integer_overflow::IntegerOverflowRule;
pub use reentrancy::ReentrancyRule;
pub use timestamp::TimestampDependenceRule;
pub use unchecked_call::UncheckedExternalCallRule;

/// Returns all built-in rules, in registration order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ReentrancyRule),
        Box::new(IntegerOverflowRule),
        Box::new(MissingAccessControlRule),
        Box::new(UncheckedExternalCallRule),
        Box::new(TimestampDependenceRule),
    ]
}

/// Test each line against each pattern in order, emitting one finding per
/// match. Lines for which `suppressed` holds are skipped entirely.
///
/// Findings are not deduplicated: a line matching two patterns yields two.
pub(crate) fn match_lines(
    content: &str,
    patterns: &[Regex],
    meta: &RuleMetadata,
    suppressed: impl Fn(&str) -> bool,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        if suppressed(line) {
            continue;
        }
        for pattern in patterns {
            if pattern.is_match(line) {
                findings.push(Finding::from_rule(meta, idx + 1, line));
            }
        }
    }

    findings
}

fn refs(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}
