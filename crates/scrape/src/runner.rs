// ABOUTME: Run orchestration: single specialty, several specialties per directory, and batch runs.
// ABOUTME: Fetches each directory once, then filters, maps, and writes per specialty.

use std::fs;
use std::path::PathBuf;

use url::Url;

use crate::client::{parse_directory_url, DirectoryClient};
use crate::config::BatchConfig;
use crate::error::Result;
use crate::filter::filter_by_specialty;
use crate::mapper::to_record;
use crate::models::{NormalizedRecord, RawEntry};
use crate::text::slugify;
use crate::writer::{write_records, OutputFormat};

/// URL slug used when the directory URL has no final path segment.
const FALLBACK_URL_SLUG: &str = "directory";

/// Arguments of a single-specialty run.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRun {
    pub url: String,
    pub specialty: String,
    pub format: OutputFormat,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    pub max_pages: Option<u32>,
}

/// Output settings for multi-specialty runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub max_pages: Option<u32>,
    /// One file per specialty in this directory; stdout when absent.
    pub output_dir: Option<PathBuf>,
}

/// Records produced for one (directory, specialty) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialtyRecords {
    pub url: String,
    pub specialty: String,
    pub records: Vec<NormalizedRecord>,
    /// File the records were written to, if any.
    pub destination: Option<PathBuf>,
}

/// Filters `entries` by specialty and maps the matches to output records.
pub fn records_for_specialty(
    entries: &[RawEntry],
    specialty: &str,
    directory_url: &Url,
) -> Vec<NormalizedRecord> {
    filter_by_specialty(entries, specialty)
        .into_iter()
        .map(|entry| to_record(entry, directory_url))
        .collect()
}

/// Scrapes one directory for one specialty and writes the result.
pub fn run_single(client: &DirectoryClient, run: &SingleRun) -> Result<Vec<NormalizedRecord>> {
    let url = parse_directory_url(&run.url)?;
    let entries = client.fetch_entries(&run.url, run.max_pages)?;
    let records = records_for_specialty(&entries, &run.specialty, &url);
    write_records(&records, run.format, run.output.as_deref())?;
    Ok(records)
}

/// Scrapes one directory once and writes one output per specialty.
///
/// Results come back in the order the specialties were given.
pub fn run_specialties(
    client: &DirectoryClient,
    url: &str,
    specialties: &[String],
    settings: &OutputSettings,
) -> Result<Vec<SpecialtyRecords>> {
    let directory_url = parse_directory_url(url)?;
    if let Some(dir) = &settings.output_dir {
        fs::create_dir_all(dir)?;
    }

    let entries = client.fetch_entries(url, settings.max_pages)?;
    let mut results = Vec::with_capacity(specialties.len());
    for specialty in specialties {
        let records = records_for_specialty(&entries, specialty, &directory_url);
        let destination = settings
            .output_dir
            .as_ref()
            .map(|dir| dir.join(output_file_name(&directory_url, specialty, settings.format)));
        write_records(&records, settings.format, destination.as_deref())?;

        results.push(SpecialtyRecords {
            url: url.to_string(),
            specialty: specialty.clone(),
            records,
            destination,
        });
    }
    Ok(results)
}

/// Runs every directory of a batch config in order. The first failure aborts the batch.
pub fn run_batch(client: &DirectoryClient, config: &BatchConfig) -> Result<Vec<SpecialtyRecords>> {
    let settings = config.output_settings();
    if let Some(dir) = &settings.output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut results = Vec::new();
    for target in &config.directories {
        tracing::info!(url = %target.url, specialties = target.specialties.len(), "processing directory");
        results.extend(run_specialties(client, &target.url, &target.specialties, &settings)?);
    }
    Ok(results)
}

/// `{url-slug}-{specialty-slug}.{ext}` for a directory/specialty pair.
pub fn output_file_name(directory_url: &Url, specialty: &str, format: OutputFormat) -> String {
    format!(
        "{}-{}.{}",
        url_slug(directory_url),
        slugify(specialty),
        format.extension()
    )
}

/// Slug of the URL's final path segment, percent-decoded first so accented
/// paths slug the same way as their plain spelling.
pub fn url_slug(directory_url: &Url) -> String {
    let last = directory_url.path().rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        return slugify(FALLBACK_URL_SLUG);
    }
    match urlencoding::decode(last) {
        Ok(decoded) => slugify(&decoded),
        Err(_) => slugify(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn file_names() {
        assert_eq!(
            output_file_name(
                &url("https://medicosdoc.com/en/medical-directory-colombia"),
                "Gynecologist",
                OutputFormat::Csv
            ),
            "medical-directory-colombia-gynecologist.csv"
        );
        assert_eq!(
            output_file_name(&url("https://example.com/en/dir/"), "Medicina Interna", OutputFormat::Json),
            "directory-medicina-interna.json"
        );
        assert_eq!(
            output_file_name(&url("https://example.com"), "  ", OutputFormat::Json),
            "directory-unknown.json"
        );
        assert_eq!(
            output_file_name(
                &url("https://medicosdoc.com/es/directorio-médico"),
                "Pediatría",
                OutputFormat::Json
            ),
            "directorio-medico-pediatria.json"
        );
        assert_eq!(
            url_slug(&url("https://example.com/es/cl%C3%ADnicas%20bogot%C3%A1")),
            "clinicas-bogota"
        );
    }

    #[test]
    fn records_for_specialty_filters_then_maps() {
        let entries: Vec<RawEntry> = serde_json::from_value(json!([
            {"_id": "1", "Name": "Ana", "SubSpecialties": {"Specialty": {"SpecialityNameEnglish": "Gynecologist"}}},
            {"_id": "2", "Name": "Luis", "SubSpecialties": {"Specialty": {"SpecialityNameEnglish": "Cardiologist"}}},
            {"_id": "3", "Name": "Eva", "SubSpecialties": {"Specialty": {"SpecialityName": "Ginecóloga"}}}
        ]))
        .unwrap();

        let records = records_for_specialty(&entries, "gynecolog", &url("https://example.com/en/dir"));
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
        assert_eq!(records[0].id.as_deref(), Some("1"));
    }
}
