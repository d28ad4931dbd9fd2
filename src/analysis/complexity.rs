use super::{contains_any, line_count};

const CONTROL_FLOW: [&str; 5] = ["if", "else", "while", "for", "switch"];
const STATE_TYPES: [&str; 5] = ["mapping", "uint", "int", "bool", "address"];
const EXTERNAL_CALLS: [&str; 3] = ["call", "delegatecall", "transfer"];

/// Raw complexity indicators, one count per matching line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexityFactors {
    pub control_flow: usize,
    pub functions: usize,
    pub state_variables: usize,
    pub external_calls: usize,
}

impl ComplexityFactors {
    pub fn count(content: &str) -> Self {
        let mut factors = Self::default();
        for line in content.split('\n').map(str::trim) {
            if contains_any(line, &CONTROL_FLOW) {
                factors.control_flow += 1;
            }
            if line.contains("function") && line.contains('(') {
                factors.functions += 1;
            }
            // Typed declaration with an initializer.
            if contains_any(line, &STATE_TYPES) && line.contains('=') {
                factors.state_variables += 1;
            }
            if contains_any(line, &EXTERNAL_CALLS) {
                factors.external_calls += 1;
            }
        }
        factors
    }

    /// Weighted sum: control flow 2, functions 3, state 1, external calls 5.
    pub fn weighted(&self) -> usize {
        self.control_flow * 2 + self.functions * 3 + self.state_variables + self.external_calls * 5
    }
}

/// Complexity score in [0, 100]: weighted indicators per line, scaled by 10.
pub fn analyze(content: &str) -> f64 {
    let factors = ComplexityFactors::count(content);
    let lines = line_count(content).max(1) as f64;
    (factors.weighted() as f64 / lines * 10.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_indicator() {
        let src = "uint x = 1;\nfunction f() {\nif (x) { a.call(b); }\n}";
        let f = ComplexityFactors::count(src);
        assert_eq!(f.state_variables, 1);
        assert_eq!(f.functions, 1);
        assert_eq!(f.control_flow, 1);
        assert_eq!(f.external_calls, 1);
    }

    #[test]
    fn score_normalizes_by_line_count() {
        // One function line (weight 3) over three lines, times 10.
        let score = analyze("function g(\n\n");
        assert!((score - 10.0).abs() < 1e-9, "{score}");
    }

    #[test]
    fn score_is_capped() {
        let src = "function f() { if (c) { d.transfer(e); } }\nfunction g() { while (x) { y.call(z); } }";
        assert_eq!(analyze(src), 100.0);
    }

    #[test]
    fn empty_file_scores_zero() {
        assert_eq!(analyze(""), 0.0);
    }
}
