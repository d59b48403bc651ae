use console::style;

use crate::cli::commands::{
    BackupArgs, ProjectCommands, ProjectCreateArgs, ProjectIdArgs, ProjectShowArgs,
    ProjectUpdateArgs,
};
use crate::models::finding::TestCase;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;
use crate::models::project::Project;
use crate::reporting::stats::ProjectStats;

pub async fn handle_project(
    command: ProjectCommands,
    config: &WstgkitConfig,
) -> Result<(), WstgkitError> {
    let db = crate::cli::open_database(config)?;

    match command {
        ProjectCommands::List => {
            let projects = db.get_projects()?;
            if projects.is_empty() {
                println!("No projects yet. Create one with `wstgkit project create <name>`.");
                return Ok(());
            }
            for project in projects {
                let stats = ProjectStats::compute(&project);
                println!(
                    "{}  {}  {} cases, {:.0}% complete",
                    style(&project.id).dim(),
                    style(&project.name).bold(),
                    stats.total,
                    stats.completion_pct,
                );
            }
            Ok(())
        }
        ProjectCommands::Create(ProjectCreateArgs { name, description }) => {
            let project = db.create_project(&name, &description)?;
            println!("Created project {} ({})", style(&project.name).bold(), project.id);
            Ok(())
        }
        ProjectCommands::Show(args) => {
            let project = require_project(&db, &args.id)?;
            print_project(&project, &args);
            Ok(())
        }
        ProjectCommands::Update(ProjectUpdateArgs { id, name, description }) => {
            let existing = require_project(&db, &id)?;
            let name = name.as_deref().unwrap_or(&existing.name);
            let description = description.as_deref().unwrap_or(&existing.description);
            db.update_project(&id, name, description)?;
            println!("Updated project {}", id);
            Ok(())
        }
        ProjectCommands::Delete(ProjectIdArgs { id }) => {
            if db.delete_project(&id)? {
                println!("Deleted project {}", id);
                Ok(())
            } else {
                Err(WstgkitError::NotFound(format!("Project not found: {}", id)))
            }
        }
        ProjectCommands::Duplicate(ProjectIdArgs { id }) => {
            let copy = db
                .duplicate_project(&id)?
                .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))?;
            println!("Created {} ({})", style(&copy.name).bold(), copy.id);
            Ok(())
        }
        ProjectCommands::Stats(ProjectIdArgs { id }) => {
            let project = require_project(&db, &id)?;
            let stats = ProjectStats::compute(&project);
            println!("{}", style(&project.name).bold());
            println!("  Cases:           {}", stats.total);
            println!("  Completed:       {} ({:.0}%)", stats.completed, stats.completion_pct);
            println!("  Vulnerabilities: {}", stats.vulnerabilities_found);
            println!(
                "    {} critical, {} high, {} medium, {} low, {} informational",
                style(stats.severity_counts.critical).red(),
                stats.severity_counts.high,
                stats.severity_counts.medium,
                stats.severity_counts.low,
                stats.severity_counts.info,
            );
            Ok(())
        }
        ProjectCommands::Export(BackupArgs { file }) => {
            let projects = db.get_projects()?;
            let json = serde_json::to_string_pretty(&projects)?;
            tokio::fs::write(&file, json).await?;
            println!("Wrote {} project(s) to {}", projects.len(), file);
            Ok(())
        }
        ProjectCommands::Import(BackupArgs { file }) => {
            let content = tokio::fs::read_to_string(&file).await?;
            let entries: Vec<serde_json::Value> = serde_json::from_str(&content)?;
            let imported = db.import_projects(&entries)?;
            println!("Imported {} project(s) from {}", imported, file);
            Ok(())
        }
    }
}

fn require_project(db: &crate::db::Database, id: &str) -> Result<Project, WstgkitError> {
    db.get_project(id)?
        .ok_or_else(|| WstgkitError::NotFound(format!("Project not found: {}", id)))
}

fn case_matches(case: &TestCase, args: &ProjectShowArgs) -> bool {
    if let Some(search) = &args.search {
        let needle = search.to_lowercase();
        if !case.title.to_lowercase().contains(&needle)
            && !case.wstg_id.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(status) = &args.status {
        if case.status.as_str() != status {
            return false;
        }
    }
    if let Some(target) = &args.target {
        if case.target.as_deref() != Some(target.as_str()) {
            return false;
        }
    }
    true
}

fn print_project(project: &Project, args: &ProjectShowArgs) {
    println!("{} ({})", style(&project.name).bold(), project.id);
    if !project.description.is_empty() {
        println!("{}", project.description);
    }
    println!();
    let cases: Vec<&TestCase> =
        project.test_cases.iter().filter(|c| case_matches(c, args)).collect();
    if cases.is_empty() {
        println!("No test cases.");
        return;
    }
    for case in cases {
        let severity = match case.cvss_score {
            Some(score) => format!("{} ({})", case.severity, score),
            None => case.severity.to_string(),
        };
        println!(
            "{}  [{}] {}  {}  {}",
            style(&case.id).dim(),
            case.wstg_id,
            style(&case.title).bold(),
            case.status,
            severity,
        );
    }
}
