// ABOUTME: Error types for directory scraping, paging, and output writing.
// ABOUTME: Provides the ScrapeError enum and the crate-wide Result alias.

use thiserror::Error;

/// Errors that can occur while scraping a directory or writing its records.
///
/// Every variant is fatal to the current run; nothing is retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The directory URL could not be parsed or is not http(s).
    #[error("invalid directory URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The page has no `__NEXT_DATA__` script block, or the block is empty.
    #[error("could not locate __NEXT_DATA__ on the page; site layout may have changed")]
    MissingDataIsland,

    /// The `__NEXT_DATA__` block is not valid JSON.
    #[error("__NEXT_DATA__ is not valid JSON: {0}")]
    MalformedDataIsland(#[source] serde_json::Error),

    /// The embedded payload carries no build identifier.
    #[error("could not find buildId; site layout may have changed")]
    MissingBuildId,

    /// The embedded payload has no directory listing.
    #[error("directory data missing from initial payload")]
    MissingDirectoryData,

    /// A data endpoint response lacked `pageProps.directoryDoctors.data`.
    #[error("unexpected response shape for page {page}")]
    UnexpectedPageShape { page: u32 },

    /// Transport failure, timeout, or non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A page cap of zero was requested.
    #[error("max_pages must be at least 1")]
    InvalidMaxPages,

    /// The batch configuration document is invalid.
    #[error("invalid config: {0}")]
    Config(String),

    /// An output format other than json or csv was requested.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Creates a Config error with a custom message.
    pub fn config(msg: impl Into<String>) -> Self {
        ScrapeError::Config(msg.into())
    }

    /// Creates an InvalidUrl error for the given input.
    pub fn invalid_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ScrapeError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors caused by the origin serving an unexpected layout.
    pub fn is_layout_change(&self) -> bool {
        matches!(
            self,
            ScrapeError::MissingDataIsland
                | ScrapeError::MalformedDataIsland(_)
                | ScrapeError::MissingBuildId
                | ScrapeError::MissingDirectoryData
                | ScrapeError::UnexpectedPageShape { .. }
        )
    }

    /// Returns true if this is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Http(e) if e.is_timeout())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;
