// ABOUTME: Shared pieces of the docdir binaries: common flags, logging setup, and client construction.
// ABOUTME: Logs go to stderr so stdout stays reserved for scraped records.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Args;
use docdir_scrape::DirectoryClient;
use tracing_subscriber::EnvFilter;

/// Flags accepted by every docdir binary.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Override the User-Agent header sent to the directory site
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Builds the HTTP client used for the whole run.
    pub fn build_client(&self) -> Result<DirectoryClient> {
        let mut builder = DirectoryClient::builder();
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build().context("failed to build HTTP client")
    }
}

/// Default filter directive for a verbosity count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr tracing subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init();
}
