// ABOUTME: Blocking HTTP client that walks a Next.js directory listing page by page.
// ABOUTME: Reads page 1 from the embedded data island and later pages from the _next/data endpoint.

use serde_json::Value;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::models::{PaginationState, RawEntry};
use crate::options::{DirectoryClientBuilder, Options};
use crate::payload::extract_initial_payload;

/// Parses and validates a directory URL. Only http and https are accepted.
pub fn parse_directory_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::invalid_url(url, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ScrapeError::invalid_url(url, "scheme must be http or https")),
    }
}

/// Directory scraper client. Holds one HTTP connection pool for the whole run.
///
/// Requests are sequential and never retried; the first failure is returned.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    opts: Options,
    http: reqwest::blocking::Client,
}

impl DirectoryClient {
    /// Create a builder for configuring a client.
    pub fn builder() -> DirectoryClientBuilder {
        DirectoryClientBuilder::new()
    }

    /// Create a new client with the given options.
    pub fn new(opts: Options) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(&opts.user_agent)
            .timeout(opts.timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;
        Ok(Self { opts, http })
    }

    /// Issues a GET and rejects non-success statuses.
    fn get(&self, url: &Url) -> Result<reqwest::blocking::Response> {
        let mut request = self.http.get(url.clone());
        for (key, value) in &self.opts.headers {
            request = request.header(key, value);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response)
    }

    /// Fetches the HTML of a directory page.
    pub fn fetch_html(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, "fetching directory page");
        Ok(self.get(url)?.text()?)
    }

    /// Fetches the directory page and returns its pagination state together
    /// with the entries embedded in it. Only one request is made.
    pub fn first_page(&self, directory_url: &Url) -> Result<(PaginationState, Vec<RawEntry>)> {
        let html = self.fetch_html(directory_url)?;
        let (state, page) = extract_initial_payload(directory_url, &html)?;
        tracing::debug!(
            build_id = %state.build_id,
            resource = %state.resource_path,
            total_pages = state.total_pages,
            entries = page.data.len(),
            "parsed first page"
        );
        Ok((state, page.data))
    }

    /// Fetches page `page` (2 or later) from the data endpoint.
    pub fn fetch_page(
        &self,
        directory_url: &Url,
        state: &PaginationState,
        page: u32,
    ) -> Result<Vec<RawEntry>> {
        let data_url = state.data_url(directory_url, page);
        tracing::debug!(page, url = %data_url, "fetching data page");

        let body = self.get(&data_url)?.text()?;
        let shape_error = || ScrapeError::UnexpectedPageShape { page };
        let payload: Value = serde_json::from_str(&body).map_err(|_| shape_error())?;
        let entries = payload
            .pointer("/pageProps/directoryDoctors/data")
            .cloned()
            .ok_or_else(shape_error)?;
        serde_json::from_value(entries).map_err(|_| shape_error())
    }

    /// Fetches every entry of a directory, in page order.
    ///
    /// With `max_pages` set, pages past the cap are never requested. A cap of
    /// zero is rejected before any network access.
    pub fn fetch_entries(&self, directory_url: &str, max_pages: Option<u32>) -> Result<Vec<RawEntry>> {
        if max_pages == Some(0) {
            return Err(ScrapeError::InvalidMaxPages);
        }
        let url = parse_directory_url(directory_url)?;

        let (state, mut entries) = self.first_page(&url)?;
        let last_page = state.last_page(max_pages);
        for page in 2..=last_page {
            entries.extend(self.fetch_page(&url, &state, page)?);
        }

        tracing::info!(
            url = %url,
            pages = last_page.max(1),
            entries = entries.len(),
            "fetched directory"
        );
        Ok(entries)
    }
}
