use super::{contains_any, line_count};

const ERROR_HANDLING: [&str; 3] = ["require", "assert", "revert"];
const SECURITY_PATTERNS: [&str; 3] = ["onlyOwner", "modifier", "access"];

/// Code-quality indicators, one count per matching line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityIndicators {
    pub comment_lines: usize,
    /// Function lines containing an underscore.
    pub naming_convention_hits: usize,
    pub error_handling: usize,
    pub functions: usize,
    pub security_patterns: usize,
}

impl QualityIndicators {
    pub fn count(content: &str) -> Self {
        let mut q = Self::default();
        for line in content.split('\n').map(str::trim) {
            if line.starts_with("//") || line.starts_with("/*") {
                q.comment_lines += 1;
            }
            if line.contains("function") && line.contains('_') {
                q.naming_convention_hits += 1;
            }
            if contains_any(line, &ERROR_HANDLING) {
                q.error_handling += 1;
            }
            if line.contains("function") && line.contains('(') {
                q.functions += 1;
            }
            if contains_any(line, &SECURITY_PATTERNS) {
                q.security_patterns += 1;
            }
        }
        q
    }
}

/// Quality score in [0, 100]:
/// `doc_ratio*30 + error_ratio*40 + security_per_function*30`, capped.
pub fn analyze(content: &str) -> f64 {
    let q = QualityIndicators::count(content);
    let total = line_count(content) as f64;
    let doc_ratio = q.comment_lines as f64 / total;
    let error_ratio = q.error_handling as f64 / total;
    let security_ratio = q.security_patterns as f64 / q.functions.max(1) as f64;

    (doc_ratio * 30.0 + error_ratio * 40.0 + security_ratio * 30.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_indicators() {
        let src = "// Vault\nmodifier onlyOwner { _; }\nfunction do_it() onlyOwner {\n  require(ok);\n}";
        let q = QualityIndicators::count(src);
        assert_eq!(q.comment_lines, 1);
        assert_eq!(q.naming_convention_hits, 1);
        assert_eq!(q.error_handling, 1);
        assert_eq!(q.functions, 1);
        assert_eq!(q.security_patterns, 2);
    }

    #[test]
    fn score_combines_weighted_ratios() {
        // 4 lines: 1 comment (7.5), 2 require (20), 0 security -> 27.5
        let src = "// doc\nrequire(a);\nrequire(b);\nx";
        assert!((analyze(src) - 27.5).abs() < 1e-9);
    }

    #[test]
    fn security_ratio_can_saturate_score() {
        let src = "modifier a\nmodifier b\nmodifier c\nmodifier d\nmodifier e";
        assert_eq!(analyze(src), 100.0);
    }
}
