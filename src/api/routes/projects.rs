use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::models::{CreateProjectRequest, UpdateProjectRequest};
use crate::api::AppState;
use crate::errors::WstgkitError;
use crate::models::project::Project;
use crate::reporting::stats::ProjectStats;

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, WstgkitError> {
    Ok(Json(state.db.get_projects()?))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), WstgkitError> {
    if req.name.trim().is_empty() {
        return Err(WstgkitError::Validation("project name is required".into()));
    }
    let project = state
        .db
        .create_project(req.name.trim(), req.description.as_deref().unwrap_or(""))?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, WstgkitError> {
    state
        .db
        .get_project(&id)?
        .map(Json)
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, WstgkitError> {
    let Some(existing) = state.db.get_project(&id)? else {
        return Err(WstgkitError::NotFound(format!("Project not found: {}", id)));
    };

    let name = req.name.as_deref().unwrap_or(&existing.name);
    let description = req.description.as_deref().unwrap_or(&existing.description);
    if name.trim().is_empty() {
        return Err(WstgkitError::Validation("project name is required".into()));
    }
    state.db.update_project(&id, name, description)?;

    state
        .db
        .get_project(&id)?
        .map(Json)
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, WstgkitError> {
    if state.db.delete_project(&id)? {
        Ok(Json(json!({"deleted": true})))
    } else {
        Err(WstgkitError::NotFound(format!("Project not found: {}", id)))
    }
}

pub async fn duplicate_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Project>), WstgkitError> {
    state
        .db
        .duplicate_project(&id)?
        .map(|p| (StatusCode::CREATED, Json(p)))
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectStats>, WstgkitError> {
    let project = state
        .db
        .get_project(&id)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))?;
    Ok(Json(ProjectStats::compute(&project)))
}

/// Full backup of every project, in the same JSON shape import accepts.
pub async fn export_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, WstgkitError> {
    Ok(Json(state.db.get_projects()?))
}

pub async fn import_projects(
    State(state): State<AppState>,
    Json(entries): Json<Vec<Value>>,
) -> Result<Json<Value>, WstgkitError> {
    let imported = state.db.import_projects(&entries)?;
    Ok(Json(json!({"imported": imported})))
}
