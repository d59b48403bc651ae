use console::style;
use tracing::info;

use crate::cli::commands::AnalyzeArgs;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;
use crate::llm::analyzer;

pub async fn handle_analyze(args: AnalyzeArgs, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    let raw_request = if args.request == "-" {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(&args.request).await?
    };

    let provider = crate::cli::build_provider(config)?;
    info!(provider = provider.provider_name(), model = provider.model_name(), "Analyzing request");

    let cases =
        analyzer::analyze_request(provider.as_ref(), &raw_request, config.llm_timeout_secs())
            .await?;

    println!("{} suggested test case(s):", cases.len());
    for case in &cases {
        println!(
            "  {}  {}  {}",
            style(&case.wstg_id).cyan(),
            style(&case.title).bold(),
            case.severity.as_deref().unwrap_or(""),
        );
    }

    let Some(project_id) = args.project else {
        return Ok(());
    };

    let db = crate::cli::open_database(config)?;
    if db.get_project(&project_id)?.is_none() {
        return Err(WstgkitError::NotFound(format!("Project not found: {}", project_id)));
    }

    let mut added = 0;
    for case in cases {
        let record = case.into_test_case(&project_id, args.target.as_deref());
        db.insert_case(&record)?;
        added += 1;
    }
    println!("Added {} case(s) to project {}", added, project_id);
    Ok(())
}
