//! Line-oriented heuristic analyzers: complexity, gas efficiency, code
//! quality and project documentation. Keyword counting only, no parsing.

pub mod complexity;
pub mod documentation;
pub mod gas;
pub mod quality;

use serde::{Deserialize, Serialize};

pub use complexity::ComplexityFactors;
pub use documentation::DocumentationPresence;
pub use gas::GasIssues;
pub use quality::QualityIndicators;

/// Number of lines as the analyzers see them: `\n`-separated, so an empty
/// file has one (empty) line and a trailing newline adds one.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

fn contains_any(line: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| line.contains(n))
}

/// Heuristic scores for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub lines: usize,
    pub complexity_score: f64,
    pub gas_efficiency_score: f64,
    pub code_quality_score: f64,
}

impl FileMetrics {
    pub fn analyze(content: &str) -> Self {
        Self {
            lines: line_count(content),
            complexity_score: complexity::analyze(content),
            gas_efficiency_score: gas::analyze(content),
            code_quality_score: quality::analyze(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_follows_newline_split() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a"), 1);
        assert_eq!(line_count("a\n"), 2);
        assert_eq!(line_count("a\nb\nc"), 3);
    }

    #[test]
    fn file_metrics_are_bounded() {
        let m = FileMetrics::analyze("function f() public {\n  x.call(y);\n}\n");
        assert_eq!(m.lines, 4);
        for score in [m.complexity_score, m.gas_efficiency_score, m.code_quality_score] {
            assert!((0.0..=100.0).contains(&score), "{score}");
        }
    }
}
