use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::WstgkitError;

use super::provider::LLMProvider;
use super::types::LLMResponse;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gemini-2.5-flash").to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, WstgkitError> {
        let text = match system {
            Some(sys) => format!("System: {}\n\n{}", sys, prompt),
            None => prompt.to_string(),
        };

        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": text}]}],
            "generationConfig": {
                "maxOutputTokens": 16384,
            }
        });

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let resp = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WstgkitError::Network(format!("Gemini request failed: {}", e)))?;

        if resp.status().as_u16() == 429 {
            return Err(WstgkitError::RateLimit("Gemini rate limit".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| WstgkitError::LLMApi(format!("Parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(WstgkitError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str().unwrap_or("").to_string();

        let input_tokens = data["usageMetadata"]["promptTokenCount"].as_u64();
        let output_tokens = data["usageMetadata"]["candidatesTokenCount"].as_u64();

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    async fn complete_structured(&self, prompt: &str, schema: &Value, system: Option<&str>) -> Result<Value, WstgkitError> {
        let augmented = format!(
            "{}\n\nRespond with ONLY valid JSON matching:\n{}",
            prompt,
            serde_json::to_string_pretty(schema).unwrap_or_default()
        );
        let response = self.complete(&augmented, system).await?;
        extract_json(&response.content)
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

/// Pull a JSON value out of a model response that may be wrapped in
/// prose or markdown fences. Handles both object and array payloads,
/// since the request analyzer expects a top-level array.
fn extract_json(text: &str) -> Result<Value, WstgkitError> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }

    let stripped = text.trim()
        .strip_prefix("```json").or_else(|| text.trim().strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(text);
    if let Ok(v) = serde_json::from_str::<Value>(stripped.trim()) {
        return Ok(v);
    }

    // Widest span starting at the first '{' or '['.
    let start = [stripped.find('{'), stripped.find('[')]
        .into_iter()
        .flatten()
        .min();
    let Some(start) = start else {
        return Err(WstgkitError::LLMApi("No valid JSON in Gemini response".into()));
    };

    let close = if stripped.as_bytes()[start] == b'{' { '}' } else { ']' };
    if let Some(end) = stripped.rfind(close) {
        if start < end {
            let candidate = &stripped[start..=end];
            if let Ok(v) = serde_json::from_str::<Value>(candidate) {
                return Ok(v);
            }
        }
    }

    // Truncation recovery: close whatever brackets are still open.
    if let Some(repaired) = repair_truncated_json(&stripped[start..]) {
        if let Ok(v) = serde_json::from_str::<Value>(&repaired) {
            return Ok(v);
        }
    }
    Err(WstgkitError::LLMApi("No valid JSON in Gemini response".into()))
}

/// Attempt to repair truncated JSON by closing open brackets.
/// Handles the common case where a response is cut off mid-array.
fn repair_truncated_json(text: &str) -> Option<String> {
    let mut s = text.to_string();

    // Drop any trailing partial object (everything after the last complete '}')
    if let Some(last_brace) = s.rfind('}') {
        s.truncate(last_brace + 1);
    } else {
        return None;
    }

    let mut open_braces = 0i32;
    let mut open_brackets = 0i32;
    for ch in s.chars() {
        match ch {
            '{' => open_braces += 1,
            '}' => open_braces -= 1,
            '[' => open_brackets += 1,
            ']' => open_brackets -= 1,
            _ => {}
        }
    }

    for _ in 0..open_braces { s.push('}'); }
    for _ in 0..open_brackets { s.push(']'); }

    if open_braces != 0 || open_brackets != 0 {
        Some(s)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_plain_object() {
        let v = extract_json(r#"{"title": "X"}"#).unwrap();
        assert_eq!(v["title"], "X");
    }

    #[test]
    fn test_extract_json_fenced_array() {
        let v = extract_json("```json\n[{\"title\": \"A\"}, {\"title\": \"B\"}]\n```").unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let v = extract_json("Here is the result:\n[{\"id\": 1}]\nHope it helps!").unwrap();
        assert_eq!(v[0]["id"], 1);
    }

    #[test]
    fn test_repair_truncated_array() {
        let v = extract_json(r#"[{"id": 1}, {"id": 2}, {"id"#).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_extract_json_rejects_garbage() {
        assert!(extract_json("no json here at all").is_err());
    }
}
