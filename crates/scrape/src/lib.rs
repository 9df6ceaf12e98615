// ABOUTME: Library entry point for scraping Next.js-rendered professional directories.
// ABOUTME: Re-exports the client, models, filter, mapper, writers, config, and run orchestration.

//! Directory scraper for sites that embed their listing data in a Next.js
//! `__NEXT_DATA__` island and serve further pages from `/_next/data/...`.
//!
//! # Example
//!
//! ```no_run
//! use docdir_scrape::{run_single, DirectoryClient, OutputFormat, SingleRun};
//!
//! fn main() -> Result<(), docdir_scrape::ScrapeError> {
//!     let client = DirectoryClient::builder().build()?;
//!     let run = SingleRun {
//!         url: "https://medicosdoc.com/en/medical-directory-colombia".into(),
//!         specialty: "Gynecologist".into(),
//!         format: OutputFormat::Csv,
//!         output: None,
//!         max_pages: Some(2),
//!     };
//!     run_single(&client, &run)?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod models;
pub mod options;
pub mod payload;
pub mod runner;
pub mod text;
pub mod writer;

pub use crate::client::{parse_directory_url, DirectoryClient};
pub use crate::config::{BatchConfig, DirectoryTarget};
pub use crate::error::{Result, ScrapeError};
pub use crate::filter::filter_by_specialty;
pub use crate::mapper::to_record;
pub use crate::models::{DirectoryPage, NormalizedRecord, PaginationState, RawEntry, RECORD_FIELDS};
pub use crate::options::{DirectoryClientBuilder, Options};
pub use crate::payload::{extract_initial_payload, resource_path};
pub use crate::runner::{
    output_file_name, records_for_specialty, run_batch, run_single, run_specialties,
    OutputSettings, SingleRun, SpecialtyRecords,
};
pub use crate::text::{normalize, slugify};
pub use crate::writer::{write_records, write_records_to, OutputFormat};
