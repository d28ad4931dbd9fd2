use serde::{Deserialize, Serialize};

use crate::rules::SeverityCounts;
use crate::scanner::ScanResults;

/// Coverage statistics for a directory scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub files_with_vulnerabilities: usize,
    pub total_vulnerabilities: usize,
    pub severity_breakdown: SeverityCounts,
    /// Rule ids ranked by finding count, most frequent first; ties keep rule id order.
    pub most_common_vulnerabilities: Vec<(String, usize)>,
}

impl ScanStatistics {
    /// `total_files` is the number of files that were scanned, including clean ones.
    pub fn from_results(total_files: usize, results: &ScanResults) -> Self {
        let findings = results.values().flatten();
        let severity_breakdown = SeverityCounts::from_findings(findings.clone());

        let mut by_rule: std::collections::BTreeMap<&str, usize> = Default::default();
        for f in findings {
            *by_rule.entry(f.rule_id.as_str()).or_default() += 1;
        }
        let mut most_common: Vec<(String, usize)> = by_rule
            .into_iter()
            .map(|(id, n)| (id.to_string(), n))
            .collect();
        most_common.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total_files,
            files_with_vulnerabilities: results.len(),
            total_vulnerabilities: severity_breakdown.total(),
            severity_breakdown,
            most_common_vulnerabilities: most_common,
        }
    }
}
