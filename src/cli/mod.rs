pub mod commands;

pub mod advise;
pub mod analyze;
pub mod case;
pub mod catalog;
pub mod progress;
pub mod project;
pub mod report;
pub mod serve;

pub use commands::{Cli, Commands};

use crate::catalog::Catalog;
use crate::config::WstgkitConfig;
use crate::db::Database;
use crate::errors::WstgkitError;
use crate::llm::{self, LLMProvider};

pub(crate) fn open_database(config: &WstgkitConfig) -> Result<Database, WstgkitError> {
    let path = config.database_path();
    let path = path
        .to_str()
        .ok_or_else(|| WstgkitError::Config("database path is not valid UTF-8".into()))?;
    Database::new(path)
}

pub(crate) fn load_catalog(config: &WstgkitConfig) -> Result<Catalog, WstgkitError> {
    Catalog::load(&config.catalog_dir())
}

pub(crate) fn build_provider(config: &WstgkitConfig) -> Result<Box<dyn LLMProvider>, WstgkitError> {
    let api_key = config.llm_api_key().ok_or_else(|| {
        WstgkitError::Config("No LLM API key configured (set llm.api_key or GEMINI_API_KEY)".into())
    })?;
    llm::create_provider(config.llm_provider(), &api_key, config.llm_model())
}
