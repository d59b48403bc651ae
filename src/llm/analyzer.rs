use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::WstgkitError;
use crate::models::finding::{Severity, TestCase};

use super::provider::LLMProvider;

const SYSTEM_PROMPT: &str = "You are a web application security analyst. Given a raw HTTP \
request, propose the OWASP WSTG test cases most worth running against it. Use real WSTG \
identifiers (e.g. WSTG-INPV-05) and keep descriptions specific to the request shown.";

/// Test-case suggestion produced by the request analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCase {
    pub title: String,
    pub wstg_id: String,
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

const GENERATED_SUFFIX: &str = "\n\n(Generated from Request Analysis)";

impl GeneratedCase {
    /// Turn a suggestion into a stored test case tagged as AI-generated.
    /// An explicit `target` overrides whatever the model suggested.
    pub fn into_test_case(self, project_id: &str, target: Option<&str>) -> TestCase {
        let description = format!("{}{}", self.description, GENERATED_SUFFIX);
        let mut record = TestCase::new(project_id, &self.title, &self.wstg_id, &description);
        record.severity = self
            .severity
            .as_deref()
            .map(Severity::from_str_or_info)
            .unwrap_or(Severity::Info);
        record.target = target.map(str::to_string).or(self.target);
        record.tags = vec!["AI".to_string()];
        record.notes = "Auto-generated by AI".to_string();
        record
    }
}

/// Analyze a raw HTTP request and return suggested test cases.
/// The response is all-or-nothing: one malformed entry fails the batch.
pub async fn analyze_request(
    provider: &dyn LLMProvider,
    raw_request: &str,
    timeout_secs: u64,
) -> Result<Vec<GeneratedCase>, WstgkitError> {
    if raw_request.trim().is_empty() {
        return Err(WstgkitError::Validation("request text is empty".into()));
    }

    let schema = json!([{
        "title": "string",
        "wstgId": "string, a WSTG identifier such as WSTG-INPV-05",
        "description": "string, why this test applies to the request",
        "severity": "string, one of Critical|High|Medium|Low|Informational",
        "target": "string, the endpoint under test"
    }]);

    let prompt = format!(
        "Analyze this raw HTTP request and propose applicable WSTG test cases:\n\n```\n{}\n```",
        raw_request
    );

    let value = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        provider.complete_structured(&prompt, &schema, Some(SYSTEM_PROMPT)),
    )
    .await
    .map_err(|_| WstgkitError::Timeout(format!("analysis exceeded {}s", timeout_secs)))??;

    let cases: Vec<GeneratedCase> = serde_json::from_value(value)
        .map_err(|e| WstgkitError::LLMApi(format!("unexpected analyzer payload: {}", e)))?;

    if cases.is_empty() {
        return Err(WstgkitError::LLMApi("analyzer returned no test cases".into()));
    }
    for case in &cases {
        if case.title.trim().is_empty() || case.wstg_id.trim().is_empty() {
            return Err(WstgkitError::LLMApi(
                "analyzer returned a case without title or WSTG id".into(),
            ));
        }
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::LLMResponse;
    use async_trait::async_trait;
    use serde_json::Value;

    struct StubProvider {
        payload: Value,
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _system: Option<&str>,
        ) -> Result<LLMResponse, WstgkitError> {
            Ok(LLMResponse {
                content: self.payload.to_string(),
                input_tokens: None,
                output_tokens: None,
                model: "stub".into(),
            })
        }

        async fn complete_structured(
            &self,
            _prompt: &str,
            _schema: &Value,
            _system: Option<&str>,
        ) -> Result<Value, WstgkitError> {
            Ok(self.payload.clone())
        }

        fn provider_name(&self) -> &str { "stub" }
        fn model_name(&self) -> &str { "stub" }
    }

    const RAW_REQUEST: &str = "POST /login HTTP/1.1\nHost: example.com\n\nuser=a&pass=b";

    #[tokio::test]
    async fn test_analyze_request_parses_cases() {
        let provider = StubProvider {
            payload: json!([
                {"title": "SQLi on login", "wstgId": "WSTG-INPV-05", "description": "d", "severity": "High", "target": "/login"},
                {"title": "Weak lockout", "wstgId": "WSTG-ATHN-03", "description": "d"}
            ]),
        };

        let cases = analyze_request(&provider, RAW_REQUEST, 5).await.unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].wstg_id, "WSTG-INPV-05");
        assert_eq!(cases[1].severity, None);
    }

    #[tokio::test]
    async fn test_analyze_request_rejects_blank_entries() {
        let provider = StubProvider {
            payload: json!([
                {"title": "", "wstgId": "WSTG-INPV-05", "description": "d"}
            ]),
        };

        let err = analyze_request(&provider, RAW_REQUEST, 5).await.unwrap_err();
        assert!(matches!(err, WstgkitError::LLMApi(_)));
    }

    #[tokio::test]
    async fn test_analyze_request_rejects_empty_input() {
        let provider = StubProvider { payload: json!([]) };
        let err = analyze_request(&provider, "  ", 5).await.unwrap_err();
        assert!(matches!(err, WstgkitError::Validation(_)));
    }

    #[tokio::test]
    async fn test_analyze_request_rejects_empty_batch() {
        let provider = StubProvider { payload: json!([]) };
        let err = analyze_request(&provider, RAW_REQUEST, 5).await.unwrap_err();
        assert!(matches!(err, WstgkitError::LLMApi(_)));
    }

    fn generated() -> GeneratedCase {
        GeneratedCase {
            title: "SQLi on login".into(),
            wstg_id: "WSTG-INPV-05".into(),
            description: "The login form takes user input".into(),
            severity: Some("High".into()),
            target: Some("/login".into()),
        }
    }

    #[test]
    fn test_generated_case_is_tagged() {
        let record = generated().into_test_case("p1", None);
        assert_eq!(record.tags, vec!["AI"]);
        assert_eq!(record.notes, "Auto-generated by AI");
        assert!(record.description.ends_with("(Generated from Request Analysis)"));
        assert_eq!(record.target.as_deref(), Some("/login"));
        assert_eq!(record.severity, Severity::High);
    }

    #[test]
    fn test_generated_case_severity_defaults_to_info() {
        let mut case = generated();
        case.severity = None;
        assert_eq!(case.into_test_case("p1", None).severity, Severity::Info);

        let mut case = generated();
        case.severity = Some("Catastrophic".into());
        assert_eq!(case.into_test_case("p1", None).severity, Severity::Info);
    }

    #[test]
    fn test_explicit_target_wins() {
        let record = generated().into_test_case("p1", Some("https://app.example.com"));
        assert_eq!(record.target.as_deref(), Some("https://app.example.com"));
    }
}
