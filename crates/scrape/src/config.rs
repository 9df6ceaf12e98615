// ABOUTME: Batch configuration listing directories and the specialties to extract from each.
// ABOUTME: The document is validated in full before any network access.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::runner::OutputSettings;
use crate::writer::OutputFormat;

/// One directory to scrape and the specialties to filter it by.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectoryTarget {
    pub url: String,
    pub specialties: Vec<String>,
}

/// Batch run configuration.
///
/// ```json
/// {
///   "directories": [{"url": "https://example.com/en/dir", "specialties": ["Gynecologist"]}],
///   "output_format": "csv",
///   "max_pages": 2,
///   "output_dir": "out"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BatchConfig {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub directories: Vec<DirectoryTarget>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<DirectoryTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DirectoryTarget>>::deserialize(deserializer)?.unwrap_or_default())
}

impl BatchConfig {
    /// Loads and validates a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ScrapeError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a config document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ScrapeError::config(format!("config is not valid JSON: {e}")))?;
        validate_directories(&value)?;

        let config: BatchConfig =
            serde_json::from_value(value).map_err(|e| ScrapeError::config(e.to_string()))?;
        if config.max_pages == Some(0) {
            return Err(ScrapeError::config("max_pages must be at least 1"));
        }
        Ok(config)
    }

    /// Output settings shared by every directory in the batch.
    pub fn output_settings(&self) -> OutputSettings {
        OutputSettings {
            format: self.output_format,
            max_pages: self.max_pages,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Checks each directory entry for the required members, with messages that
/// name the offending entry.
fn validate_directories(value: &Value) -> Result<()> {
    let entries = match value.get("directories") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ScrapeError::config("'directories' must be a list")),
    };

    for (index, entry) in entries.iter().enumerate() {
        if !entry.get("url").is_some_and(Value::is_string) {
            return Err(ScrapeError::config(format!(
                "directory entry {index} must include a 'url'"
            )));
        }
        if !entry.get("specialties").is_some_and(Value::is_array) {
            return Err(ScrapeError::config(format!(
                "directory entry {index} must include a 'specialties' list"
            )));
        }
    }
    Ok(())
}
