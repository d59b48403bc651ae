use std::time::Duration;

use crate::errors::WstgkitError;
use crate::models::catalog::ReferenceTest;

use super::provider::LLMProvider;

const SYSTEM_PROMPT: &str = "You are an experienced penetration tester assisting a colleague \
during a web application engagement. Give practical, hands-on testing advice: concrete \
commands, payloads and tool invocations over generic methodology. Assume the engagement \
is authorized.";

/// Ask the model for hands-on testing advice for a catalogue entry.
/// `query` narrows the advice to a specific question from the tester.
pub async fn generate_advice(
    provider: &dyn LLMProvider,
    test: &ReferenceTest,
    query: Option<&str>,
    timeout_secs: u64,
) -> Result<String, WstgkitError> {
    let prompt = build_prompt(test, query);

    let response = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        provider.complete(&prompt, Some(SYSTEM_PROMPT)),
    )
    .await
    .map_err(|_| WstgkitError::Timeout(format!("advice request exceeded {}s", timeout_secs)))??;

    if response.content.trim().is_empty() {
        return Err(WstgkitError::LLMApi("empty advice response".into()));
    }
    Ok(response.content)
}

fn build_prompt(test: &ReferenceTest, query: Option<&str>) -> String {
    let mut prompt = format!(
        "I am working on the following test:\n\nID: {}\nTitle: {}\nDescription: {}\n",
        test.id, test.title, test.description
    );

    if !test.objectives.is_empty() {
        prompt.push_str("\nObjectives:\n");
        for objective in &test.objectives {
            prompt.push_str(&format!("- {}\n", objective));
        }
    }
    if !test.instructions.is_empty() {
        prompt.push_str("\nSuggested approach:\n");
        prompt.push_str(&test.instructions);
        prompt.push('\n');
    }
    if !test.payloads.is_empty() {
        prompt.push_str("\nKnown payloads:\n");
        for payload in &test.payloads {
            prompt.push_str(&format!("- `{}` ({})\n", payload.code, payload.description));
        }
    }

    match query {
        Some(q) => prompt.push_str(&format!("\nMy question: {}", q)),
        None => prompt.push_str(
            "\nGive me a practical walkthrough for this test: tools, commands, payloads \
             and what positive results look like.",
        ),
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::PayloadItem;

    fn sample_test() -> ReferenceTest {
        ReferenceTest {
            id: "WSTG-INPV-05".into(),
            category: "Input Validation".into(),
            title: "Testing for SQL Injection".into(),
            description: "Probe inputs for SQL injection.".into(),
            objectives: vec!["Identify injection points".into()],
            instructions: "Submit a single quote and watch for database errors.".into(),
            payloads: vec![PayloadItem {
                code: "' OR '1'='1".into(),
                description: "classic tautology".into(),
            }],
            strategy: String::new(),
            severity: crate::models::finding::Severity::High,
        }
    }

    #[test]
    fn test_prompt_includes_catalogue_material() {
        let prompt = build_prompt(&sample_test(), None);
        assert!(prompt.contains("WSTG-INPV-05"));
        assert!(prompt.contains("Identify injection points"));
        assert!(prompt.contains("' OR '1'='1"));
        assert!(prompt.contains("practical walkthrough"));
    }

    #[test]
    fn test_prompt_prefers_user_question() {
        let prompt = build_prompt(&sample_test(), Some("How do I test a JSON body?"));
        assert!(prompt.contains("My question: How do I test a JSON body?"));
        assert!(!prompt.contains("practical walkthrough"));
    }
}
