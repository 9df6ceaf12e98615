// ABOUTME: Serializes normalized records as pretty JSON or fixed-column CSV.
// ABOUTME: Writes to a file path, standard output, or any io::Write.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::models::{NormalizedRecord, RECORD_FIELDS};

/// Output serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File extension used for generated output files.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ScrapeError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ScrapeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.to_string()
    }
}

/// Writes `records` to `destination`, or to stdout when no destination is given.
///
/// JSON sent to stdout gets a trailing newline; JSON files are written as-is.
pub fn write_records(
    records: &[NormalizedRecord],
    format: OutputFormat,
    destination: Option<&Path>,
) -> Result<()> {
    match destination {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_records_to(&mut out, records, format)?;
            out.flush()?;
            tracing::info!(path = %path.display(), records = records.len(), %format, "wrote output file");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_records_to(&mut out, records, format)?;
            if format == OutputFormat::Json {
                writeln!(out)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

/// Serializes `records` into any writer.
pub fn write_records_to<W: Write>(
    writer: W,
    records: &[NormalizedRecord],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(writer, records)?,
        OutputFormat::Csv => {
            let mut csv = csv::WriterBuilder::new()
                .terminator(csv::Terminator::CRLF)
                .from_writer(writer);
            csv.write_record(RECORD_FIELDS)?;
            for record in records {
                csv.write_record(csv_row(record))?;
            }
            csv.flush()?;
        }
    }
    Ok(())
}

/// One CSV row in [`RECORD_FIELDS`] order. Nulls become empty cells.
pub fn csv_row(record: &NormalizedRecord) -> [String; 13] {
    [
        text_cell(&record.id),
        record.name.clone(),
        record.specialty.clone(),
        text_cell(&record.city),
        text_cell(&record.address),
        text_cell(&record.medical_center),
        text_cell(&record.office),
        value_cell(&record.highlighted_services),
        value_cell(&record.consult_value),
        record.premium.to_string(),
        // Same spelling as the JSON writer: 4.0 stays "4.0".
        record.rating_average.map(|v| Value::from(v).to_string()).unwrap_or_default(),
        record.rating_count.map(|v| v.to_string()).unwrap_or_default(),
        text_cell(&record.photo_url),
    ]
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn value_cell(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
