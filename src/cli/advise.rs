use console::style;
use tracing::info;

use crate::cli::commands::AdviseArgs;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;
use crate::llm::advisor;

pub async fn handle_advise(args: AdviseArgs, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    let catalog = crate::cli::load_catalog(config)?;
    let test = catalog
        .get(&args.wstg_id)
        .ok_or_else(|| WstgkitError::NotFound(format!("Unknown WSTG id: {}", args.wstg_id)))?;

    let provider = crate::cli::build_provider(config)?;
    info!(provider = provider.provider_name(), model = provider.model_name(), "Requesting advice");

    println!("{}  {}", style(&test.id).cyan(), style(&test.title).bold());
    println!();

    let advice = advisor::generate_advice(
        provider.as_ref(),
        test,
        args.query.as_deref(),
        config.llm_timeout_secs(),
    )
    .await?;

    println!("{}", advice);
    Ok(())
}
