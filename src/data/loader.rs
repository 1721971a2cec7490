use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result};
use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record};

/// Errors specific to the shape of an input file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load meteorite records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "name": "Aachen", "recclass": "L5", "mass": "21", ... }, ...]`
/// * `.csv`     – header row, e.g. the public `Meteorite_Landings.csv` export
/// * `.parquet` – one column per record field
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string()).into()),
    };

    Ok(Dataset::new(records).with_source(path.to_path_buf()))
}

/// Load a file on a worker thread.
///
/// The UI polls the returned receiver once per frame; exactly one message
/// is sent.
pub fn spawn_load(path: PathBuf) -> Receiver<Result<Dataset>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::debug!("Loading {}", path.display());
        let result = load_file(&path).with_context(|| format!("loading {}", path.display()));
        // The receiver is gone if the app closed mid-load.
        let _ = tx.send(result);
    });
    rx
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as served by the open-data portal):
///
/// ```json
/// [
///   {
///     "name": "Aachen",
///     "id": "1",
///     "recclass": "L5",
///     "mass": "21",
///     "fall": "Fell",
///     "year": "1880-01-01T00:00:00.000",
///     "reclat": "50.775000",
///     "reclong": "6.083330",
///     "geolocation": { "type": "Point", "coordinates": [6.08333, 50.775] }
///   },
///   ...
/// ]
/// ```
///
/// Numbers are accepted in place of strings. Nested values are ignored.
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(LoadError::NotAnObject(i))?;

        let mut record = Record::default();
        for (key, val) in obj {
            if let Some(value) = json_to_field(val) {
                record.set_field(key, Some(value));
            }
        }
        records.push(record);
    }
    Ok(records)
}

fn json_to_field(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names matching record fields.
/// `mass (g)` is accepted for `mass`; unknown columns are skipped.
/// Empty cells count as absent.
fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record = Record::default();
        for (header, value) in headers.iter().zip(row.iter()) {
            if !value.is_empty() {
                record.set_field(header, Some(value.to_string()));
            }
        }
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of meteorite records.
///
/// Each column named like a record field (`name`, `recclass`, `mass`, ...)
/// is read through Arrow's display formatting, so strings, numbers, booleans,
/// dates and timestamps all arrive as text. Timestamps render as
/// `1880-01-01T00:00:00`, which the year parser accepts. Nested columns
/// (lists, structs) are skipped. Works with files written by **Pandas** and
/// **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let options = FormatOptions::default();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<(&str, &dyn Array, ArrayFormatter)> = Vec::new();
        for (field, col) in schema.fields().iter().zip(batch.columns()) {
            if col.data_type().is_nested() {
                log::debug!("Skipping nested parquet column '{}'", field.name());
                continue;
            }
            match ArrayFormatter::try_new(col.as_ref(), &options) {
                Ok(fmt) => columns.push((field.name().as_str(), col.as_ref(), fmt)),
                Err(e) => log::warn!("Skipping parquet column '{}': {e}", field.name()),
            }
        }

        for row in 0..batch.num_rows() {
            let mut record = Record::default();
            for (name, col, fmt) in &columns {
                if col.is_null(row) {
                    continue;
                }
                record.set_field(name, Some(fmt.value(row).to_string()));
            }
            records.push(record);
        }
    }

    Ok(records)
}
