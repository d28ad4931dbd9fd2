use super::contains_any;

const STORAGE_OPS: [&str; 4] = ["storage", "mapping", ".push", ".pop"];
const EXTERNAL_CALLS: [&str; 3] = [".call", ".transfer", ".send"];
const COMPLEX_MATH: [&str; 4] = ["**", "exp", "log", "sqrt"];
const STRING_OPS: [&str; 3] = ["string", "concat", "substring"];

/// Penalty per counted issue line.
const ISSUE_PENALTY: f64 = 5.0;

/// Gas-expensive patterns, one count per matching line and category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasIssues {
    pub storage_operations: usize,
    pub loops: usize,
    pub external_calls: usize,
    pub complex_math: usize,
    pub string_operations: usize,
}

impl GasIssues {
    pub fn count(content: &str) -> Self {
        let mut issues = Self::default();
        for line in content.split('\n').map(str::trim) {
            if contains_any(line, &STORAGE_OPS) {
                issues.storage_operations += 1;
            }
            if line.contains("for") || line.contains("while") {
                issues.loops += 1;
            }
            if contains_any(line, &EXTERNAL_CALLS) {
                issues.external_calls += 1;
            }
            if contains_any(line, &COMPLEX_MATH) {
                issues.complex_math += 1;
            }
            if contains_any(line, &STRING_OPS) {
                issues.string_operations += 1;
            }
        }
        issues
    }

    pub fn total(&self) -> usize {
        self.storage_operations
            + self.loops
            + self.external_calls
            + self.complex_math
            + self.string_operations
    }
}

/// Efficiency score in [0, 100]; higher is better.
pub fn analyze(content: &str) -> f64 {
    let total = GasIssues::count(content).total() as f64;
    (100.0 - total * ISSUE_PENALTY).max(0.0)
}
