use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};

use crate::api::AppState;
use crate::errors::WstgkitError;
use crate::reporting::{self, ExportDocument};

fn document_response(doc: ExportDocument) -> Result<impl IntoResponse, WstgkitError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(doc.mime_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", doc.filename))
            .map_err(|e| WstgkitError::Internal(format!("invalid filename: {}", e)))?,
    );
    Ok((headers, doc.bytes))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WstgkitError> {
    let project = state
        .db
        .get_project(&id)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))?;
    document_response(reporting::csv::export_csv(&project))
}

pub async fn export_html(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, WstgkitError> {
    let project = state
        .db
        .get_project(&id)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))?;
    document_response(reporting::html::export_html(&project))
}

pub async fn export_markdown(
    State(state): State<AppState>,
    Path((project_id, case_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, WstgkitError> {
    let case = state
        .db
        .get_case(&project_id, &case_id)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", case_id)))?;
    document_response(reporting::markdown::export_markdown(&case, &state.catalog))
}
