use crate::cli::commands::ReportArgs;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;
use crate::reporting;

pub async fn handle_report(args: ReportArgs, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    let db = crate::cli::open_database(config)?;
    let project = db
        .get_project(&args.project)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", args.project)))?;

    let doc = match args.format.as_str() {
        "csv" => reporting::csv::export_csv(&project),
        "html" => reporting::html::export_html(&project),
        other => {
            return Err(WstgkitError::Validation(format!(
                "Unknown report format: {} (expected csv or html)",
                other
            )))
        }
    };

    let path = std::path::Path::new(&args.output).join(&doc.filename);
    tokio::fs::write(&path, &doc.bytes).await?;
    println!("Wrote {}", path.display());
    Ok(())
}
