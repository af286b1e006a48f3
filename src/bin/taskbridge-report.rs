//! taskbridge-report: Publish today's Todoist report as a PDF in Google Drive
//!
//! Usage:
//!   taskbridge-report                      # properties from env / default config file
//!   taskbridge-report --config props.toml  # properties file override

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use taskbridge::config::{LayeredProperties, ReportConfig};
use taskbridge::google::{DriveClient, GoogleApi, SheetsWorkspace};
use taskbridge::report::{ReportOutcome, ReportPipeline};
use taskbridge::todoist::TodoistClient;

#[derive(Parser)]
#[command(name = "taskbridge-report")]
#[command(about = "Publish a PDF report of open Todoist tasks grouped by project")]
#[command(version)]
struct Cli {
    /// Properties file (defaults to ~/.config/taskbridge/taskbridge.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.verbose.log_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let props = LayeredProperties::standard(cli.config.as_deref())?;
    let config = ReportConfig::from_properties(&props)?;

    let google = GoogleApi::new(&config.google_token);
    let tracker = TodoistClient::new(&config.todoist_token);
    let workspace = SheetsWorkspace::new(google.clone());
    let store = DriveClient::new(google);

    let today = chrono::Local::now().date_naive();
    let pipeline = ReportPipeline::new(&config, &tracker, &workspace, &store);

    match pipeline.run(today).await? {
        ReportOutcome::NothingToReport => {
            println!("No uncompleted tasks, no report created.");
        }
        ReportOutcome::Published(report) => {
            println!("📄 Report saved: {} ({})", report.file.name, report.file.id);
            println!("  📁 Projects: {}", report.project_count);
            println!("  ✅ Tasks:    {}", report.task_count);
            println!("  🗑️  Removed:  {}", report.removed.len());

            if !report.warnings.is_empty() {
                println!();
                println!("⚠️  Cleanup warnings ({}):", report.warnings.len());
                for warning in &report.warnings {
                    println!("  - {}", warning);
                }
            }
        }
    }

    Ok(())
}
