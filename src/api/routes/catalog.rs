use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::AppState;
use crate::errors::WstgkitError;
use crate::models::catalog::{Category, ReferenceTest};
use crate::models::progress::{ProgressEntry, ProgressMap};

pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}

pub async fn get_reference_test(
    State(state): State<AppState>,
    Path(wstg_id): Path<String>,
) -> Result<Json<ReferenceTest>, WstgkitError> {
    state
        .catalog
        .get(&wstg_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| WstgkitError::NotFound(format!("Unknown WSTG id: {}", wstg_id)))
}

pub async fn get_progress(State(state): State<AppState>) -> Result<Json<ProgressMap>, WstgkitError> {
    Ok(Json(state.db.get_progress()?))
}

pub async fn set_progress(
    State(state): State<AppState>,
    Path(wstg_id): Path<String>,
    Json(entry): Json<ProgressEntry>,
) -> Result<Json<ProgressEntry>, WstgkitError> {
    state.db.set_progress(&wstg_id, &entry)?;
    Ok(Json(entry))
}
