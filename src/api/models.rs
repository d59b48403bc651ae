use serde::Deserialize;

use crate::cvss::MetricSelection;
use crate::models::finding::ReportDraft;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub title: String,
    pub wstg_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the save-report call. Omitted metrics fall back to the
/// all-None baseline, which scores 0.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCaseRequest {
    #[serde(default)]
    pub metrics: Option<MetricSelection>,
    #[serde(default)]
    pub report: ReportDraft,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub wstg_id: String,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub raw_request: String,
    /// When set, the suggested cases are inserted into this project.
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}
