use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use wstgkit::api::{build_router, AppState};
use wstgkit::catalog::Catalog;
use wstgkit::db::Database;
use wstgkit::models::catalog::{Category, PayloadItem, ReferenceTest};
use wstgkit::models::finding::Severity;

fn test_catalog() -> Catalog {
    Catalog::from_categories(vec![Category {
        id: "INPV".into(),
        name: "Input Validation Testing".into(),
        tests: vec![ReferenceTest {
            id: "WSTG-INPV-05".into(),
            category: "Input Validation Testing".into(),
            title: "Testing for SQL Injection".into(),
            description: "Probe inputs for SQL injection.".into(),
            objectives: vec!["Identify injectable parameters".into()],
            instructions: "Submit a single quote and observe errors.".into(),
            payloads: vec![PayloadItem {
                code: "' OR '1'='1".into(),
                description: "classic tautology".into(),
            }],
            strategy: "Black-box".into(),
            severity: Severity::High,
        }],
    }])
}

fn create_test_state() -> AppState {
    AppState {
        db: Database::in_memory().unwrap(),
        catalog: Arc::new(test_catalog()),
        llm: None,
        llm_timeout_secs: 5,
    }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

async fn create_project(state: &AppState, name: &str) -> String {
    let req = make_request("POST", "/api/projects", Some(json!({"name": name})));
    let response = app(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_str().unwrap().to_string()
}

async fn add_case(state: &AppState, project_id: &str, title: &str, wstg_id: &str) -> String {
    let req = make_request(
        "POST",
        &format!("/api/projects/{}/cases", project_id),
        Some(json!({"title": title, "wstgId": wstg_id})),
    );
    let response = app(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_project_crud() {
    let state = create_test_state();

    let id = create_project(&state, "ACME webapp").await;

    let req = make_request("GET", &format!("/api/projects/{}", id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "ACME webapp");
    assert!(body["testCases"].as_array().unwrap().is_empty());

    let req = make_request(
        "PUT",
        &format!("/api/projects/{}", id),
        Some(json!({"description": "Q3 retest"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "ACME webapp");
    assert_eq!(body["description"], "Q3 retest");

    let req = make_request("DELETE", &format!("/api/projects/{}", id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = make_request("GET", &format!("/api/projects/{}", id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let state = create_test_state();
    let req = make_request("POST", "/api/projects", Some(json!({"name": "  "})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_complete_case_scores_vulnerability() {
    let state = create_test_state();
    let project_id = create_project(&state, "scored").await;
    let case_id = add_case(&state, &project_id, "SQLi", "WSTG-INPV-05").await;

    let req = make_request(
        "POST",
        &format!("/api/projects/{}/cases/{}/complete", project_id, case_id),
        Some(json!({
            "metrics": {"av": "N", "ac": "L", "pr": "N", "ui": "N", "s": "U", "c": "H", "i": "H", "a": "H"},
            "report": {"vulnDescription": "injectable", "impact": "db read"}
        })),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["severity"], "Critical");
    assert_eq!(body["cvssScore"], 9.8);
    assert_eq!(body["cvssVector"], "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
}

#[tokio::test]
async fn test_complete_recon_case_is_unscored() {
    let state = create_test_state();
    let project_id = create_project(&state, "recon").await;
    let case_id = add_case(&state, &project_id, "Fingerprint", "WSTG-INFO-02").await;

    // Metrics and impact text must be ignored for recon tasks.
    let req = make_request(
        "POST",
        &format!("/api/projects/{}/cases/{}/complete", project_id, case_id),
        Some(json!({
            "metrics": {"av": "N", "ac": "L", "pr": "N", "ui": "N", "s": "U", "c": "H", "i": "H", "a": "H"},
            "report": {"vulnDescription": "server banner", "impact": "ignored", "poc": "nginx/1.25"}
        })),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["severity"], "Info");
    assert_eq!(body["cvssScore"], 0.0);
    assert_eq!(body["cvssVector"], Value::Null);
    assert_eq!(body["impact"], Value::Null);
    assert_eq!(body["poc"], "nginx/1.25");
}

#[tokio::test]
async fn test_project_stats() {
    let state = create_test_state();
    let project_id = create_project(&state, "stats").await;
    let case_id = add_case(&state, &project_id, "SQLi", "WSTG-INPV-05").await;
    add_case(&state, &project_id, "open item", "WSTG-ATHN-01").await;

    let req = make_request(
        "POST",
        &format!("/api/projects/{}/cases/{}/complete", project_id, case_id),
        Some(json!({
            "metrics": {"av": "N", "ac": "L", "pr": "N", "ui": "N", "s": "U", "c": "H", "i": "H", "a": "H"},
            "report": {}
        })),
    );
    app(&state).oneshot(req).await.unwrap();

    let req = make_request("GET", &format!("/api/projects/{}/stats", project_id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["completed"], 1);
    assert_eq!(body["vulnerabilities_found"], 1);
    assert_eq!(body["severity_counts"]["critical"], 1);
}

#[tokio::test]
async fn test_duplicate_project_copies_cases() {
    let state = create_test_state();
    let project_id = create_project(&state, "original").await;
    add_case(&state, &project_id, "SQLi", "WSTG-INPV-05").await;

    let req = make_request("POST", &format!("/api/projects/{}/duplicate", project_id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["name"], "original (Copy)");
    assert_ne!(body["id"].as_str().unwrap(), project_id);
    let cases = body["testCases"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["title"], "SQLi");
}

#[tokio::test]
async fn test_csv_report_headers() {
    let state = create_test_state();
    let project_id = create_project(&state, "Acme Corp").await;

    let req = make_request("GET", &format!("/api/projects/{}/report/csv", project_id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("Acme_Corp_pentest_report.csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with('\u{feff}'));
    assert!(text.contains("CVSS Score,CVSS Vector"));
}

#[tokio::test]
async fn test_import_round_trip() {
    let state = create_test_state();
    let project_id = create_project(&state, "backup me").await;
    add_case(&state, &project_id, "SQLi", "WSTG-INPV-05").await;

    let req = make_request("GET", "/api/projects/export", None);
    let response = app(&state).oneshot(req).await.unwrap();
    let backup = response_json(response).await;

    // Restore into a fresh database.
    let fresh = create_test_state();
    let req = make_request("POST", "/api/projects/import", Some(backup));
    let response = app(&fresh).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["imported"], 1);

    let req = make_request("GET", &format!("/api/projects/{}", project_id), None);
    let response = app(&fresh).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["testCases"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_catalog_lookup() {
    let state = create_test_state();

    let req = make_request("GET", "/api/catalog/WSTG-INPV-05", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["title"], "Testing for SQL Injection");

    let req = make_request("GET", "/api/catalog/WSTG-NOPE-99", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_progress_round_trip() {
    let state = create_test_state();

    let req = make_request(
        "PUT",
        "/api/progress/WSTG-INPV-05",
        Some(json!({"status": "IN_PROGRESS", "userPayloads": [{"code": "x", "description": "y"}]})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = make_request("GET", "/api/progress", None);
    let response = app(&state).oneshot(req).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["WSTG-INPV-05"]["status"], "IN_PROGRESS");
    assert_eq!(body["WSTG-INPV-05"]["userPayloads"][0]["code"], "x");
}

#[tokio::test]
async fn test_ai_endpoints_require_provider() {
    let state = create_test_state();
    let req = make_request(
        "POST",
        "/api/ai/advice",
        Some(json!({"wstgId": "WSTG-INPV-05"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

struct CannedAnalyzer;

#[async_trait::async_trait]
impl wstgkit::llm::LLMProvider for CannedAnalyzer {
    async fn complete(
        &self,
        _prompt: &str,
        _system: Option<&str>,
    ) -> Result<wstgkit::llm::LLMResponse, wstgkit::errors::WstgkitError> {
        Ok(wstgkit::llm::LLMResponse {
            content: "ok".into(),
            input_tokens: None,
            output_tokens: None,
            model: "canned".into(),
        })
    }

    async fn complete_structured(
        &self,
        _prompt: &str,
        _schema: &Value,
        _system: Option<&str>,
    ) -> Result<Value, wstgkit::errors::WstgkitError> {
        Ok(json!([{
            "title": "SQLi on login",
            "wstgId": "WSTG-INPV-05",
            "description": "The login form takes user input",
            "severity": "High",
            "target": "/login"
        }]))
    }

    fn provider_name(&self) -> &str { "canned" }
    fn model_name(&self) -> &str { "canned" }
}

#[tokio::test]
async fn test_analyze_inserts_suggested_cases() {
    let mut state = create_test_state();
    state.llm = Some(Arc::new(CannedAnalyzer));
    let project_id = create_project(&state, "Acme Corp").await;

    let req = make_request(
        "POST",
        "/api/ai/analyze",
        Some(json!({
            "rawRequest": "POST /login HTTP/1.1\nHost: example.com\n\nuser=a&pass=b",
            "projectId": project_id,
        })),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["projectId"], project_id.as_str());
    assert_eq!(body["cases"][0]["severity"], "High");
    assert_eq!(body["cases"][0]["tags"][0], "AI");

    let req = make_request("GET", &format!("/api/projects/{}", project_id), None);
    let response = app(&state).oneshot(req).await.unwrap();
    let project = response_json(response).await;
    let case = &project["testCases"][0];
    assert_eq!(case["wstgId"], "WSTG-INPV-05");
    assert_eq!(case["severity"], "High");
    assert_eq!(case["target"], "/login");
    assert_eq!(case["notes"], "Auto-generated by AI");
}

#[tokio::test]
async fn test_analyze_unknown_project_is_rejected() {
    let mut state = create_test_state();
    state.llm = Some(Arc::new(CannedAnalyzer));

    let req = make_request(
        "POST",
        "/api/ai/analyze",
        Some(json!({"rawRequest": "GET / HTTP/1.1", "projectId": "missing"})),
    );
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
