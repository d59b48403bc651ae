use serde::Serialize;

use crate::models::finding::{CaseStatus, Severity};
use crate::models::project::Project;

/// Completed-finding counts per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

/// Summary statistics for a project. This is a pure derived view recomputed
/// from the full case list on every read; it is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
    pub severity_counts: SeverityCounts,
    /// Critical + High + Medium + Low. Info denotes non-vulnerability recon
    /// output and is excluded.
    pub vulnerabilities_found: usize,
    pub completion_pct: f64,
}

impl ProjectStats {
    pub fn compute(project: &Project) -> Self {
        let total = project.test_cases.len();
        let mut counts = SeverityCounts::default();
        let mut completed = 0;

        for case in &project.test_cases {
            if case.status != CaseStatus::Completed {
                continue;
            }
            completed += 1;
            match case.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }

        let vulnerabilities_found = counts.critical + counts.high + counts.medium + counts.low;
        let completion_pct = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self { total, completed, severity_counts: counts, vulnerabilities_found, completion_pct }
    }
}
