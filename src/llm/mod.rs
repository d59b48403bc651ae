pub mod advisor;
pub mod analyzer;
pub mod gemini;
pub mod provider;
pub mod types;

pub use provider::LLMProvider;
pub use types::LLMResponse;

use crate::errors::WstgkitError;

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
) -> Result<Box<dyn LLMProvider>, WstgkitError> {
    match provider_name {
        "gemini" => Ok(Box::new(gemini::GeminiProvider::new(api_key, model))),
        other => Err(WstgkitError::Config(format!("Unknown LLM provider: {}", other))),
    }
}
