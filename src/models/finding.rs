use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::is_recon_task;
use crate::cvss::{base_score, severity_from_score, MetricSelection};

/// Severity label for a finding, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

    pub fn from_str_or_info(s: &str) -> Self {
        match s {
            "Critical" => Severity::Critical,
            "High" => Severity::High,
            "Medium" => Severity::Medium,
            "Low" => Severity::Low,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    NotStarted,
    InProgress,
    Completed,
    NotBug,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::NotStarted => "NOT_STARTED",
            CaseStatus::InProgress => "IN_PROGRESS",
            CaseStatus::Completed => "COMPLETED",
            CaseStatus::NotBug => "NOT_BUG",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "IN_PROGRESS" => CaseStatus::InProgress,
            "COMPLETED" => CaseStatus::Completed,
            "NOT_BUG" => CaseStatus::NotBug,
            _ => CaseStatus::NotStarted,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tracked test case inside a project. The `wstg_id` maps the case
/// onto the reference catalogue; unresolved ids are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub wstg_id: String,
    #[serde(default)]
    pub description: String,
    pub status: CaseStatus,
    pub severity: Severity,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub vuln_description: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub poc: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub cvss_vector: Option<String>,
}

/// Transient working buffer for the save-report flow. Exports never read
/// this; they only see fields committed onto the `TestCase`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default)]
    pub vuln_description: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub poc: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
}

/// Partial update: unspecified fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseUpdate {
    pub title: Option<String>,
    pub wstg_id: Option<String>,
    pub description: Option<String>,
    pub status: Option<CaseStatus>,
    pub severity: Option<Severity>,
    pub notes: Option<String>,
    pub target: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TestCase {
    pub fn new(project_id: &str, title: &str, wstg_id: &str, description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            title: title.to_string(),
            wstg_id: wstg_id.to_string(),
            description: description.to_string(),
            status: CaseStatus::NotStarted,
            severity: Severity::Info,
            notes: String::new(),
            created_at: Utc::now(),
            tags: Vec::new(),
            target: None,
            vuln_description: None,
            impact: None,
            poc: None,
            recommendation: None,
            references: None,
            cvss_score: None,
            cvss_vector: None,
        }
    }

    /// Commit a report onto the case and mark it COMPLETED. The scoring path
    /// is gated on the reconnaissance classification: recon cases never carry
    /// a score, vector, impact, recommendation or references, even when the
    /// draft contained text for them.
    pub fn apply_report(&mut self, metrics: &MetricSelection, draft: ReportDraft) {
        self.status = CaseStatus::Completed;
        self.vuln_description = draft.vuln_description;
        self.poc = draft.poc;

        if is_recon_task(&self.wstg_id) {
            self.cvss_score = Some(0.0);
            self.severity = Severity::Info;
            self.cvss_vector = None;
            self.impact = None;
            self.recommendation = None;
            self.references = None;
        } else {
            let score = base_score(metrics);
            self.cvss_score = Some(score);
            self.severity = severity_from_score(score);
            self.cvss_vector = Some(metrics.vector());
            self.impact = draft.impact;
            self.recommendation = draft.recommendation;
            self.references = draft.references;
        }
    }

    /// Identical copy with a new identity and a fresh creation timestamp.
    /// Every other field matches the original at duplication time.
    pub fn duplicate(&self) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn apply_update(&mut self, update: TestCaseUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(wstg_id) = update.wstg_id {
            self.wstg_id = wstg_id;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(severity) = update.severity {
            self.severity = severity;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(target) = update.target {
            self.target = Some(target);
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    /// The committed metric selection, when the stored vector parses.
    /// Completed findings reopen with their prior selections restored.
    pub fn metric_selection(&self) -> Option<MetricSelection> {
        self.cvss_vector
            .as_deref()
            .and_then(|v| MetricSelection::parse(v).ok())
    }
}
