use std::path::Path;

use crate::errors::WstgkitError;

use super::types::WstgkitConfig;

pub async fn parse_config(path: &Path) -> Result<WstgkitConfig, WstgkitError> {
    if !path.exists() {
        return Err(WstgkitError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(WstgkitError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: WstgkitConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Explicit path must exist; otherwise `wstgkit.yaml` is picked up from
/// the working directory when present, and defaults apply when it is not.
pub async fn load_config(path: Option<&Path>) -> Result<WstgkitConfig, WstgkitError> {
    match path {
        Some(p) => parse_config(p).await,
        None => {
            let default = Path::new("wstgkit.yaml");
            if default.exists() {
                parse_config(default).await
            } else {
                Ok(WstgkitConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_config_full() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "storage:\n  database_path: /tmp/pt.db\ncatalog:\n  directory: ./cat\nllm:\n  provider: gemini\n  model: gemini-2.5-pro\n  timeout_secs: 30\n"
        )
        .unwrap();

        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.database_path().to_str(), Some("/tmp/pt.db"));
        assert_eq!(config.catalog_dir().to_str(), Some("./cat"));
        assert_eq!(config.llm_model(), Some("gemini-2.5-pro"));
        assert_eq!(config.llm_timeout_secs(), 30);
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/wstgkit.yaml")).await.unwrap_err();
        assert!(matches!(err, WstgkitError::Config(_)));
    }

    #[tokio::test]
    async fn test_defaults_apply_for_empty_config() {
        let config = WstgkitConfig::default();
        assert_eq!(config.database_path().to_str(), Some("wstgkit.db"));
        assert_eq!(config.llm_provider(), "gemini");
        assert_eq!(config.llm_timeout_secs(), 60);
    }
}
