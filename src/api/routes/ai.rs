use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::models::{AdviceRequest, AnalyzeRequest};
use crate::api::AppState;
use crate::errors::WstgkitError;
use crate::llm::{advisor, analyzer, LLMProvider};

fn require_llm(state: &AppState) -> Result<Arc<dyn LLMProvider>, WstgkitError> {
    state
        .llm
        .clone()
        .ok_or_else(|| WstgkitError::Config("No LLM provider configured".into()))
}

pub async fn get_advice(
    State(state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<Value>, WstgkitError> {
    let provider = require_llm(&state)?;
    let test = state
        .catalog
        .get(&req.wstg_id)
        .ok_or_else(|| WstgkitError::NotFound(format!("Unknown WSTG id: {}", req.wstg_id)))?;

    let advice = advisor::generate_advice(
        provider.as_ref(),
        test,
        req.query.as_deref(),
        state.llm_timeout_secs,
    )
    .await?;

    Ok(Json(json!({
        "wstgId": req.wstg_id,
        "advice": advice,
        "model": provider.model_name(),
    })))
}

pub async fn analyze_request(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Value>, WstgkitError> {
    let provider = require_llm(&state)?;
    let cases =
        analyzer::analyze_request(provider.as_ref(), &req.raw_request, state.llm_timeout_secs)
            .await?;

    let Some(project_id) = req.project_id else {
        return Ok(Json(json!({ "cases": cases })));
    };

    if state.db.get_project(&project_id)?.is_none() {
        return Err(WstgkitError::NotFound(format!("Project not found: {}", project_id)));
    }

    let mut inserted = Vec::with_capacity(cases.len());
    for case in cases {
        let record = case.into_test_case(&project_id, req.target.as_deref());
        state.db.insert_case(&record)?;
        inserted.push(record);
    }
    Ok(Json(json!({ "cases": inserted, "projectId": project_id })))
}
