use clap::Parser;
use tracing_subscriber::EnvFilter;

use wstgkit::cli::{self, Cli, Commands};
use wstgkit::config;
use wstgkit::errors::WstgkitError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            WstgkitError::Config(_) => 2,
            WstgkitError::Validation(_) => 3,
            WstgkitError::NotFound(_) => 4,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: Cli) -> Result<(), WstgkitError> {
    let config = config::load_config(cli.config.as_deref().map(std::path::Path::new)).await?;

    match cli.command {
        Commands::Project(command) => cli::project::handle_project(command, &config).await,
        Commands::Case(command) => cli::case::handle_case(command, &config).await,
        Commands::Report(args) => cli::report::handle_report(args, &config).await,
        Commands::Catalog(args) => cli::catalog::handle_catalog(args, &config).await,
        Commands::Progress(command) => cli::progress::handle_progress(command, &config).await,
        Commands::Advise(args) => cli::advise::handle_advise(args, &config).await,
        Commands::Analyze(args) => cli::analyze::handle_analyze(args, &config).await,
        Commands::Serve(args) => cli::serve::handle_serve(args, &config).await,
    }
}
