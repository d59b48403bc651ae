use console::style;

use crate::cli::commands::{ProgressCommands, ProgressSetArgs};
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;
use crate::models::finding::CaseStatus;
use crate::models::progress::ProgressEntry;

pub async fn handle_progress(
    command: ProgressCommands,
    config: &WstgkitConfig,
) -> Result<(), WstgkitError> {
    let db = crate::cli::open_database(config)?;

    match command {
        ProgressCommands::Show => {
            let catalog = crate::cli::load_catalog(config)?;
            let progress = db.get_progress()?;

            let mut done = 0;
            for category in catalog.categories() {
                println!("{}", style(&category.name).bold());
                for test in &category.tests {
                    let status = progress
                        .get(&test.id)
                        .map(|e| e.status)
                        .unwrap_or(CaseStatus::NotStarted);
                    if status == CaseStatus::Completed {
                        done += 1;
                    }
                    let marker = match status {
                        CaseStatus::Completed => style("x").green(),
                        CaseStatus::InProgress => style("~").yellow(),
                        CaseStatus::NotBug => style("-").dim(),
                        CaseStatus::NotStarted => style(" ").dim(),
                    };
                    println!("  [{}] {}  {}", marker, style(&test.id).cyan(), test.title);
                }
            }
            let total = catalog.total_tests();
            if total > 0 {
                println!("\n{}/{} tests completed", done, total);
            }
            Ok(())
        }
        ProgressCommands::Set(ProgressSetArgs { wstg_id, status }) => {
            let status = match status.as_str() {
                "NOT_STARTED" => CaseStatus::NotStarted,
                "IN_PROGRESS" => CaseStatus::InProgress,
                "COMPLETED" => CaseStatus::Completed,
                "NOT_BUG" => CaseStatus::NotBug,
                other => {
                    return Err(WstgkitError::Validation(format!("Unknown status: {}", other)))
                }
            };

            // Keep any payloads already collected against this test.
            let mut entry: ProgressEntry = db.get_progress_entry(&wstg_id)?;
            entry.status = status;
            db.set_progress(&wstg_id, &entry)?;
            println!("{} -> {}", wstg_id, status);
            Ok(())
        }
    }
}
