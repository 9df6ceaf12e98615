// ABOUTME: CLI for batch scraping driven by a JSON config of directories and specialties.
// ABOUTME: Each directory is fetched once; one output is written per specialty.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use docdir_cli::{init_logging, CommonArgs};
use docdir_scrape::{run_batch, BatchConfig};

/// Run the directory scraper from a JSON config.
#[derive(Parser, Debug)]
#[command(name = "docdir-batch")]
#[command(about = "Scrape several directories and specialties listed in a JSON config", long_about = None)]
struct Args {
    /// Path to JSON config file listing directories and specialties
    #[arg(long)]
    config: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: Args) -> Result<()> {
    // Validate the whole config before touching the network.
    let config = BatchConfig::from_path(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    let client = args.common.build_client()?;

    let results = run_batch(&client, &config)?;
    for result in &results {
        match &result.destination {
            Some(path) => tracing::info!(
                url = %result.url,
                specialty = %result.specialty,
                records = result.records.len(),
                path = %path.display(),
                "wrote specialty"
            ),
            None => tracing::info!(
                url = %result.url,
                specialty = %result.specialty,
                records = result.records.len(),
                "printed specialty"
            ),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.common.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
