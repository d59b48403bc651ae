use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wstgkit", version, about = "OWASP WSTG pentest checklist and reporting toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage engagement projects
    #[command(subcommand)]
    Project(ProjectCommands),
    /// Manage test cases within a project
    #[command(subcommand)]
    Case(CaseCommands),
    /// Export project reports
    Report(ReportArgs),
    /// Browse the WSTG reference catalogue
    Catalog(CatalogArgs),
    /// Track checklist progress across engagements
    #[command(subcommand)]
    Progress(ProgressCommands),
    /// Ask the AI assistant for testing advice
    Advise(AdviseArgs),
    /// Generate test cases from a raw HTTP request
    Analyze(AnalyzeArgs),
    /// Start the HTTP REST API server
    Serve(ServeArgs),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Create a new project
    Create(ProjectCreateArgs),
    /// Show a project and its test cases
    Show(ProjectShowArgs),
    /// Rename a project or change its description
    Update(ProjectUpdateArgs),
    /// Delete a project and all of its cases
    Delete(ProjectIdArgs),
    /// Copy a project, cases included
    Duplicate(ProjectIdArgs),
    /// Show completion and severity statistics
    Stats(ProjectIdArgs),
    /// Write all projects to a JSON backup file
    Export(BackupArgs),
    /// Import projects from a JSON backup file
    Import(BackupArgs),
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    /// Project name
    pub name: String,

    /// Free-form description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct ProjectIdArgs {
    /// Project ID
    pub id: String,
}

#[derive(Args)]
pub struct ProjectShowArgs {
    /// Project ID
    pub id: String,

    /// Only show cases whose title or WSTG id contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show cases with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Only show cases against this target
    #[arg(short, long)]
    pub target: Option<String>,
}

#[derive(Args)]
pub struct ProjectUpdateArgs {
    /// Project ID
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct BackupArgs {
    /// Backup file path
    pub file: String,
}

#[derive(Subcommand)]
pub enum CaseCommands {
    /// Add a test case to a project
    Add(CaseAddArgs),
    /// Edit a test case
    Update(CaseUpdateArgs),
    /// Score a case and commit its report
    Complete(CaseCompleteArgs),
    /// Copy a case within its project
    Duplicate(CaseIdArgs),
    /// Remove a case
    Delete(CaseIdArgs),
    /// Write the single-finding markdown report
    Export(CaseExportArgs),
}

#[derive(Args)]
pub struct CaseAddArgs {
    /// Project ID
    pub project: String,

    /// Case title
    pub title: String,

    /// WSTG identifier, e.g. WSTG-INPV-05
    #[arg(short, long)]
    pub wstg: String,

    /// What to test
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Endpoint or host under test
    #[arg(short, long)]
    pub target: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct CaseIdArgs {
    /// Project ID
    pub project: String,

    /// Case ID
    pub case: String,
}

#[derive(Args)]
pub struct CaseUpdateArgs {
    /// Project ID
    pub project: String,

    /// Case ID
    pub case: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub target: Option<String>,

    /// NOT_STARTED, IN_PROGRESS, COMPLETED or NOT_BUG
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Comma-separated tags (replaces the existing set)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct CaseCompleteArgs {
    /// Project ID
    pub project: String,

    /// Case ID
    pub case: String,

    /// CVSS v3.1 vector, e.g. CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H.
    /// Ignored for recon tasks; defaults to the all-None baseline.
    #[arg(long)]
    pub vector: Option<String>,

    /// Vulnerability description / summary
    #[arg(long)]
    pub summary: Option<String>,

    #[arg(long)]
    pub impact: Option<String>,

    /// Proof of concept / collected findings
    #[arg(long)]
    pub poc: Option<String>,

    #[arg(long)]
    pub recommendation: Option<String>,

    #[arg(long)]
    pub references: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct CaseExportArgs {
    /// Project ID
    pub project: String,

    /// Case ID
    pub case: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Project ID
    pub project: String,

    /// Report format: csv, html
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Show a single test instead of the category listing
    pub wstg_id: Option<String>,
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Show checklist progress for every catalogue test
    Show,
    /// Set the progress status of a catalogue test
    Set(ProgressSetArgs),
}

#[derive(Args)]
pub struct ProgressSetArgs {
    /// WSTG identifier
    pub wstg_id: String,

    /// NOT_STARTED, IN_PROGRESS, COMPLETED or NOT_BUG
    pub status: String,
}

#[derive(Args)]
pub struct AdviseArgs {
    /// WSTG identifier to get advice for
    pub wstg_id: String,

    /// Specific question for the assistant
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// File containing the raw HTTP request ("-" for stdin)
    pub request: String,

    /// Project to add the generated cases to
    #[arg(short, long)]
    pub project: Option<String>,

    /// Override the target recorded on generated cases
    #[arg(short, long)]
    pub target: Option<String>,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
}
