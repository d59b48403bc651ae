use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::{CompleteCaseRequest, CreateCaseRequest};
use crate::api::AppState;
use crate::cvss::MetricSelection;
use crate::errors::WstgkitError;
use crate::models::finding::{TestCase, TestCaseUpdate};

pub async fn create_case(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<TestCase>), WstgkitError> {
    if req.title.trim().is_empty() {
        return Err(WstgkitError::Validation("case title is required".into()));
    }
    if req.wstg_id.trim().is_empty() {
        return Err(WstgkitError::Validation("WSTG id is required".into()));
    }
    if state.db.get_project(&project_id)?.is_none() {
        return Err(WstgkitError::NotFound(format!("Project not found: {}", project_id)));
    }

    let mut case = TestCase::new(
        &project_id,
        req.title.trim(),
        req.wstg_id.trim(),
        req.description.as_deref().unwrap_or(""),
    );
    case.target = req.target;
    case.tags = req.tags;
    case.notes = req.notes.unwrap_or_default();

    state.db.insert_case(&case)?;
    Ok((StatusCode::CREATED, Json(case)))
}

pub async fn update_case(
    State(state): State<AppState>,
    Path((project_id, case_id)): Path<(String, String)>,
    Json(update): Json<TestCaseUpdate>,
) -> Result<Json<TestCase>, WstgkitError> {
    state
        .db
        .update_case(&project_id, &case_id, update)?
        .map(Json)
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", case_id)))
}

pub async fn delete_case(
    State(state): State<AppState>,
    Path((project_id, case_id)): Path<(String, String)>,
) -> Result<Json<Value>, WstgkitError> {
    if state.db.delete_case(&project_id, &case_id)? {
        Ok(Json(json!({"deleted": true})))
    } else {
        Err(WstgkitError::NotFound(format!("Case not found: {}", case_id)))
    }
}

pub async fn duplicate_case(
    State(state): State<AppState>,
    Path((project_id, case_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<TestCase>), WstgkitError> {
    state
        .db
        .duplicate_case(&project_id, &case_id)?
        .map(|c| (StatusCode::CREATED, Json(c)))
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", case_id)))
}

pub async fn complete_case(
    State(state): State<AppState>,
    Path((project_id, case_id)): Path<(String, String)>,
    Json(req): Json<CompleteCaseRequest>,
) -> Result<Json<TestCase>, WstgkitError> {
    let metrics = req.metrics.unwrap_or_else(MetricSelection::default);
    state
        .db
        .complete_case(&project_id, &case_id, &metrics, req.report)?
        .map(Json)
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", case_id)))
}
