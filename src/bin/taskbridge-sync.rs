//! taskbridge-sync: Move open Google Tasks into Todoist
//!
//! Usage:
//!   taskbridge-sync              # move tasks
//!   taskbridge-sync --dry-run    # preview without creating or deleting

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use taskbridge::config::{LayeredProperties, SyncConfig};
use taskbridge::google::{GoogleApi, TasksClient};
use taskbridge::sync::SyncPipeline;
use taskbridge::todoist::TodoistClient;

#[derive(Parser)]
#[command(name = "taskbridge-sync")]
#[command(about = "Move open tasks from a Google Tasks list into Todoist")]
#[command(version)]
struct Cli {
    /// Properties file (defaults to ~/.config/taskbridge/taskbridge.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preview changes without applying them
    #[arg(long)]
    dry_run: bool,

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
    let config = SyncConfig::from_properties(&props)?;

    if cli.dry_run {
        println!("🔍 Dry run mode - no changes will be made");
        println!();
    }

    let source = TasksClient::new(GoogleApi::new(&config.google_token));
    let tracker = TodoistClient::new(&config.todoist_token);
    let pipeline = SyncPipeline::new(&config, &source, &tracker);

    let stats = pipeline.sync(cli.dry_run).await?;

    println!();
    if cli.dry_run {
        println!("📊 Would make the following changes:");
    } else {
        println!("📊 Sync complete:");
    }
    println!("  ✅ Created: {}", stats.created);
    println!("  🗑️  Deleted: {}", stats.deleted);
    println!("  ⏭️  Skipped: {}", stats.skipped);

    if stats.has_errors() {
        println!();
        println!("⚠️  Errors ({}):", stats.errors.len());
        for error in &stats.errors {
            println!("  - {}", error);
        }
    }

    Ok(())
}
