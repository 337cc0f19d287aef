//! Reltrack CLI - multi-repository release progress tracker.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{warn, Level};

use reltrack_collector::{build_report, load_ledger, write_report, Collector};
use reltrack_github::GithubClient;

#[derive(Parser)]
#[command(name = "reltrack")]
#[command(about = "Multi-repository release progress tracker", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect progress data and write the progress report
    Collect {
        /// Path to the release ledger (releases-master.yaml)
        #[arg(long)]
        ledger: PathBuf,
        /// Path to write the progress report (releases-progress.yaml)
        #[arg(long)]
        output: PathBuf,
        /// Hosting organization to scan
        #[arg(long)]
        org: String,
    },
    /// Render the HTML viewer from a progress report
    Render {
        /// Path to the progress report (.yaml or .json)
        #[arg(long)]
        data: PathBuf,
        /// Path to write the HTML file
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        Commands::Collect {
            ledger,
            output,
            org,
        } => {
            let start = Instant::now();

            let ledger = load_ledger(&ledger)
                .with_context(|| format!("failed to read ledger {}", ledger.display()))?;

            // Token pass-through from GITHUB_TOKEN; anonymous works for
            // public repositories with a smaller rate budget
            let collector = Collector::new(GithubClient::new(org));
            let outcome = collector.collect_all(&ledger).await;
            if outcome.aborted {
                warn!("collection aborted early; writing partial report");
            }

            let report = build_report(outcome, start.elapsed().as_secs_f64());
            write_report(&report, &output)
                .with_context(|| format!("failed to write report {}", output.display()))?;
            println!("Wrote: {}", output.display());
        }
        Commands::Render { data, output } => {
            reltrack_viewer::generate_viewer(&data, &output)
                .with_context(|| format!("failed to render viewer from {}", data.display()))?;
            println!("Generated: {}", output.display());
        }
    }

    Ok(())
}
