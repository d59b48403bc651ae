use console::style;

use crate::catalog::is_recon_task;
use crate::cli::commands::{
    CaseAddArgs, CaseCommands, CaseCompleteArgs, CaseExportArgs, CaseIdArgs, CaseUpdateArgs,
};
use crate::config::WstgkitConfig;
use crate::cvss::MetricSelection;
use crate::errors::WstgkitError;
use crate::models::finding::{CaseStatus, ReportDraft, TestCase, TestCaseUpdate};
use crate::reporting;

pub async fn handle_case(command: CaseCommands, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    let db = crate::cli::open_database(config)?;

    match command {
        CaseCommands::Add(args) => add_case(&db, args),
        CaseCommands::Update(args) => update_case(&db, args),
        CaseCommands::Complete(args) => complete_case(&db, args),
        CaseCommands::Duplicate(CaseIdArgs { project, case }) => {
            let copy = db
                .duplicate_case(&project, &case)?
                .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", case)))?;
            println!("Created {} ({})", style(&copy.title).bold(), copy.id);
            Ok(())
        }
        CaseCommands::Delete(CaseIdArgs { project, case }) => {
            if db.delete_case(&project, &case)? {
                println!("Deleted case {}", case);
                Ok(())
            } else {
                Err(WstgkitError::NotFound(format!("Case not found: {}", case)))
            }
        }
        CaseCommands::Export(args) => export_case(&db, config, args).await,
    }
}

fn add_case(db: &crate::db::Database, args: CaseAddArgs) -> Result<(), WstgkitError> {
    if db.get_project(&args.project)?.is_none() {
        return Err(WstgkitError::NotFound(format!("Project not found: {}", args.project)));
    }

    let mut case = TestCase::new(&args.project, &args.title, &args.wstg, &args.description);
    case.target = args.target;
    case.tags = split_tags(args.tags.as_deref());

    db.insert_case(&case)?;
    println!("Added case {} ({})", style(&case.title).bold(), case.id);
    if is_recon_task(&case.wstg_id) {
        println!("Recon task: reports for this case are informational and unscored.");
    }
    Ok(())
}

fn update_case(db: &crate::db::Database, args: CaseUpdateArgs) -> Result<(), WstgkitError> {
    let status = args.status.as_deref().map(parse_status).transpose()?;

    let update = TestCaseUpdate {
        title: args.title,
        description: args.description,
        target: args.target,
        status,
        notes: args.notes,
        tags: args.tags.as_deref().map(|t| split_tags(Some(t))),
        ..Default::default()
    };

    let case = db
        .update_case(&args.project, &args.case, update)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", args.case)))?;
    println!("Updated case {} ({})", style(&case.title).bold(), case.id);
    Ok(())
}

fn complete_case(db: &crate::db::Database, args: CaseCompleteArgs) -> Result<(), WstgkitError> {
    let metrics = match args.vector.as_deref() {
        Some(vector) => MetricSelection::parse(vector)?,
        None => MetricSelection::default(),
    };

    let draft = ReportDraft {
        vuln_description: args.summary,
        impact: args.impact,
        poc: args.poc,
        recommendation: args.recommendation,
        references: args.references,
    };

    let case = db
        .complete_case(&args.project, &args.case, &metrics, draft)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", args.case)))?;

    let case = match args.notes {
        Some(notes) => db
            .update_case(
                &args.project,
                &args.case,
                TestCaseUpdate { notes: Some(notes), ..Default::default() },
            )?
            .unwrap_or(case),
        None => case,
    };

    match case.cvss_score {
        Some(score) if !is_recon_task(&case.wstg_id) => {
            println!(
                "Completed {}: {} {} ({})",
                style(&case.title).bold(),
                style(case.severity.to_string()).red(),
                score,
                case.cvss_vector.as_deref().unwrap_or(""),
            );
        }
        _ => {
            println!(
                "Completed {}: {} (recon, unscored)",
                style(&case.title).bold(),
                case.severity,
            );
        }
    }
    Ok(())
}

async fn export_case(
    db: &crate::db::Database,
    config: &WstgkitConfig,
    args: CaseExportArgs,
) -> Result<(), WstgkitError> {
    let case = db
        .get_case(&args.project, &args.case)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Case not found: {}", args.case)))?;
    let catalog = crate::cli::load_catalog(config)?;

    let doc = reporting::markdown::export_markdown(&case, &catalog);
    let path = std::path::Path::new(&args.output).join(&doc.filename);
    tokio::fs::write(&path, &doc.bytes).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn parse_status(s: &str) -> Result<CaseStatus, WstgkitError> {
    match s {
        "NOT_STARTED" => Ok(CaseStatus::NotStarted),
        "IN_PROGRESS" => Ok(CaseStatus::InProgress),
        "COMPLETED" => Ok(CaseStatus::Completed),
        "NOT_BUG" => Ok(CaseStatus::NotBug),
        other => Err(WstgkitError::Validation(format!("Unknown status: {}", other))),
    }
}
