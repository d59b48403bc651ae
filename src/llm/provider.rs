use crate::errors::WstgkitError;
use async_trait::async_trait;

use super::types::LLMResponse;

/// Backend abstraction for the advisor and request analyzer. Both
/// consumers only need plain text and schema-guided JSON completions.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, WstgkitError>;

    /// JSON completion guided by a schema hint
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
        system: Option<&str>,
    ) -> Result<serde_json::Value, WstgkitError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
