use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WstgkitConfig {
    pub storage: Option<StorageConfig>,
    pub catalog: Option<CatalogConfig>,
    pub llm: Option<LLMConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl WstgkitConfig {
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.database_path.clone())
            .unwrap_or_else(|| PathBuf::from("wstgkit.db"))
    }

    pub fn catalog_dir(&self) -> PathBuf {
        self.catalog
            .as_ref()
            .and_then(|c| c.directory.clone())
            .unwrap_or_else(|| PathBuf::from("data/catalog"))
    }

    pub fn llm_provider(&self) -> &str {
        self.llm
            .as_ref()
            .and_then(|l| l.provider.as_deref())
            .unwrap_or("gemini")
    }

    pub fn llm_model(&self) -> Option<&str> {
        self.llm.as_ref().and_then(|l| l.model.as_deref())
    }

    pub fn llm_timeout_secs(&self) -> u64 {
        self.llm
            .as_ref()
            .and_then(|l| l.timeout_secs)
            .unwrap_or(60)
    }

    /// Config value first, GEMINI_API_KEY environment variable second.
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm
            .as_ref()
            .and_then(|l| l.api_key.clone())
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}
