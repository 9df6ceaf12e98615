// ABOUTME: Extracts the Next.js data island (__NEXT_DATA__) from a directory page.
// ABOUTME: Yields the build id, the resource path, and the first page of listing entries.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::models::{DirectoryPage, PaginationState};

static NEXT_DATA: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[id="__NEXT_DATA__"]"#).unwrap());

/// Resource path addressed by the data endpoint for a directory URL.
///
/// Leading slashes and one trailing slash are stripped; the site root maps to
/// `"index"`, matching how Next.js names the root page's data file.
pub fn resource_path(directory_url: &Url) -> String {
    let path = directory_url.path().trim_start_matches('/');
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        "index".to_string()
    } else {
        path.to_string()
    }
}

/// Returns the raw text of the `__NEXT_DATA__` script block.
pub fn extract_next_data(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let text = document
        .select(&NEXT_DATA)
        .next()
        .map(|script| script.text().collect::<String>())
        .ok_or(ScrapeError::MissingDataIsland)?;
    if text.trim().is_empty() {
        return Err(ScrapeError::MissingDataIsland);
    }
    Ok(text)
}

/// Parses a directory page into its pagination state and first page of entries.
///
/// No network access happens here, so callers capped at one page never touch
/// the data endpoint.
pub fn extract_initial_payload(
    directory_url: &Url,
    html: &str,
) -> Result<(PaginationState, DirectoryPage)> {
    let text = extract_next_data(html)?;
    let payload: Value = serde_json::from_str(&text).map_err(ScrapeError::MalformedDataIsland)?;

    let build_id = payload
        .get("buildId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(ScrapeError::MissingBuildId)?
        .to_string();

    let directory = payload
        .pointer("/props/pageProps/directoryDoctors")
        .filter(|data| data.as_object().is_some_and(|obj| !obj.is_empty()))
        .cloned()
        .ok_or(ScrapeError::MissingDirectoryData)?;
    let first_page: DirectoryPage =
        serde_json::from_value(directory).map_err(ScrapeError::MalformedDataIsland)?;

    let state = PaginationState {
        build_id,
        resource_path: resource_path(directory_url),
        total_pages: first_page.total_pages,
    };
    Ok((state, first_page))
}
