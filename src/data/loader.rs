use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, FieldValue, Record};

/// Bundled yearly datasets, compiled into the binary.
const DATA_2025: &str = include_str!("../../assets/data/2025.json");
const DATA_2026: &str = include_str!("../../assets/data/2026.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("expected a top-level JSON array of records")]
    NotAnArray,
    #[error("row {0} is not a JSON object")]
    RowNotAnObject(usize),
}

// ---------------------------------------------------------------------------
// Bundled datasets
// ---------------------------------------------------------------------------

/// Parse both bundled yearly datasets. Called once at startup.
pub fn load_bundled() -> Result<(Dataset, Dataset)> {
    let a = parse_json(DATA_2025).context("parsing bundled 2025 dataset")?;
    let b = parse_json(DATA_2026).context("parsing bundled 2026 dataset")?;
    Ok((a, b))
}

// ---------------------------------------------------------------------------
// File loading (File → Open)
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "isp": "...", "amount": 123.4, ... }, ...]`
/// * `.csv`  – header row with column names, one record per row
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Records-oriented JSON: a top-level array of flat objects. Nested values
/// are stringified rather than rejected, matching the loose source data.
fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(LoadError::RowNotAnObject(i))?;
        let record: Record = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_field(val)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(n.to_string())),
        JsonValue::Bool(b) => FieldValue::Text(b.to_string()),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell type-guessed the
/// same way the JSON loader treats values.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record: Record = row
            .iter()
            .enumerate()
            .filter_map(|(col_idx, cell)| {
                headers
                    .get(col_idx)
                    .map(|name| (name.clone(), guess_field_type(cell)))
            })
            .collect();
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn guess_field_type(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(n) = s.parse::<f64>() {
        return FieldValue::Number(n);
    }
    FieldValue::Text(s.to_string())
}
