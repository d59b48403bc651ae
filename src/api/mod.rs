pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;

use crate::catalog::Catalog;
use crate::db::Database;
use crate::llm::LLMProvider;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub catalog: Arc<Catalog>,
    pub llm: Option<Arc<dyn LLMProvider>>,
    pub llm_timeout_secs: u64,
}

pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/api/projects/export", get(routes::projects::export_projects))
        .route("/api/projects/import", post(routes::projects::import_projects))
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/api/projects/{id}/duplicate", post(routes::projects::duplicate_project))
        .route("/api/projects/{id}/stats", get(routes::projects::get_stats))
        .route("/api/projects/{id}/report/csv", get(routes::reports::export_csv))
        .route("/api/projects/{id}/report/html", get(routes::reports::export_html))
        .route("/api/projects/{id}/cases", post(routes::cases::create_case))
        .route(
            "/api/projects/{id}/cases/{case_id}",
            put(routes::cases::update_case).delete(routes::cases::delete_case),
        )
        .route("/api/projects/{id}/cases/{case_id}/complete", post(routes::cases::complete_case))
        .route("/api/projects/{id}/cases/{case_id}/duplicate", post(routes::cases::duplicate_case))
        .route(
            "/api/projects/{id}/cases/{case_id}/report",
            get(routes::reports::export_markdown),
        )
        .route("/api/catalog", get(routes::catalog::list_catalog))
        .route("/api/catalog/{wstg_id}", get(routes::catalog::get_reference_test))
        .route(
            "/api/progress",
            get(routes::catalog::get_progress),
        )
        .route("/api/progress/{wstg_id}", put(routes::catalog::set_progress))
        .route("/api/ai/advice", post(routes::ai::get_advice))
        .route("/api/ai/analyze", post(routes::ai::analyze_request))
        .with_state(state)
}
