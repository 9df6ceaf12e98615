// ABOUTME: CLI for scraping one directory and filtering it by one specialty.
// ABOUTME: Prints JSON or CSV to stdout, or writes it to --output.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use docdir_cli::{init_logging, CommonArgs};
use docdir_scrape::{run_single, OutputFormat, SingleRun};

/// Scrape a directory for doctors by specialty.
#[derive(Parser, Debug)]
#[command(name = "docdir")]
#[command(about = "Scrape a Next.js medical directory and filter doctors by specialty", long_about = None)]
struct Args {
    /// Directory URL, e.g. https://medicosdoc.com/en/medical-directory-colombia
    #[arg(long)]
    url: String,

    /// Specialty to filter (case- and accent-insensitive substring match)
    #[arg(long)]
    specialty: String,

    /// Output format: json or csv
    #[arg(short = 'f', long = "format", default_value = "json")]
    format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Limit number of pages to fetch (useful for quick tests)
    #[arg(long = "max-pages", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: Args) -> Result<()> {
    let client = args.common.build_client()?;
    let run = SingleRun {
        url: args.url,
        specialty: args.specialty,
        format: args.format,
        output: args.output,
        max_pages: args.max_pages,
    };

    let records = run_single(&client, &run)
        .with_context(|| format!("scraping {} for {:?} failed", run.url, run.specialty))?;
    tracing::info!(records = records.len(), specialty = %run.specialty, "done");
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
