use console::style;

use crate::cli::commands::CatalogArgs;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;

pub async fn handle_catalog(args: CatalogArgs, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    let catalog = crate::cli::load_catalog(config)?;

    match args.wstg_id {
        Some(wstg_id) => {
            let test = catalog
                .get(&wstg_id)
                .ok_or_else(|| WstgkitError::NotFound(format!("Unknown WSTG id: {}", wstg_id)))?;

            println!("{}  {}", style(&test.id).cyan(), style(&test.title).bold());
            println!("Category: {}", test.category);
            println!("\n{}", test.description);
            if !test.objectives.is_empty() {
                println!("\nObjectives:");
                for objective in &test.objectives {
                    println!("  - {}", objective);
                }
            }
            if !test.instructions.is_empty() {
                println!("\nHow to test:\n{}", test.instructions);
            }
            if !test.payloads.is_empty() {
                println!("\nPayloads:");
                for payload in &test.payloads {
                    println!("  {}  {}", style(&payload.code).yellow(), payload.description);
                }
            }
        }
        None => {
            if catalog.total_tests() == 0 {
                println!(
                    "Catalogue is empty. Put category YAML files in {}.",
                    config.catalog_dir().display()
                );
                return Ok(());
            }
            for category in catalog.categories() {
                println!("{}", style(&category.name).bold());
                for test in &category.tests {
                    println!("  {}  {}", style(&test.id).cyan(), test.title);
                }
            }
        }
    }
    Ok(())
}
