//! CSV export of the raw series.
//!
//! The file holds the provider's strings untouched: a `Date` column, then one
//! column per raw field label, one row per raw entry in provider order.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use stockview_core::{DataError, RawSeries, Result, Symbol};
use tracing::info;

/// Name of the index column.
pub const DATE_COLUMN: &str = "Date";

/// File name used for a symbol's export.
#[must_use]
pub fn csv_file_name(symbol: &Symbol) -> String {
    format!("{symbol}_data.csv")
}

/// Field labels in first-seen order across all entries.
fn field_labels(raw: &RawSeries) -> Vec<&str> {
    let mut labels: Vec<&str> = Vec::new();
    for label in raw.values().flat_map(|fields| fields.keys()) {
        if !labels.contains(&label.as_str()) {
            labels.push(label);
        }
    }
    labels
}

/// Builds the export frame; every column is a string column.
///
/// # Errors
///
/// [`DataError::Export`] if polars rejects the frame.
pub fn raw_frame(raw: &RawSeries) -> Result<DataFrame> {
    let mut columns = Vec::new();
    let dates: Vec<&str> = raw.keys().map(String::as_str).collect();
    columns.push(Column::new(DATE_COLUMN.into(), dates));

    for label in field_labels(raw) {
        let values: Vec<Option<&str>> = raw
            .values()
            .map(|fields| fields.get(label).map(String::as_str))
            .collect();
        columns.push(Column::new(label.into(), values));
    }

    DataFrame::new(columns).map_err(|e| DataError::Export(e.to_string()))
}

/// Writes `raw` to `{dir}/{SYMBOL}_data.csv`, replacing any existing file.
///
/// # Errors
///
/// I/O errors creating the file and [`DataError::Export`] from the writer.
pub fn export_csv(raw: &RawSeries, symbol: &Symbol, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(symbol));
    let mut frame = raw_frame(raw)?;

    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| DataError::Export(e.to_string()))?;

    info!(path = %path.display(), rows = frame.height(), "Exported raw series");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockview_core::RawFields;

    fn fields(pairs: &[(&str, &str)]) -> RawFields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_file_name() {
        let symbol = Symbol::parse("msft").unwrap();
        assert_eq!(csv_file_name(&symbol), "MSFT_data.csv");
    }

    #[test]
    fn test_raw_frame_layout() {
        let mut raw = RawSeries::new();
        raw.insert(
            "2024-03-15".to_string(),
            fields(&[("1. open", "1.0"), ("4. close", "2.0")]),
        );
        raw.insert(
            "2024-03-14".to_string(),
            fields(&[("1. open", "3.0"), ("4. close", "4.0")]),
        );

        let frame = raw_frame(&raw).unwrap();
        assert_eq!(frame.height(), 2);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ["Date", "1. open", "4. close"]);
    }

    #[test]
    fn test_raw_frame_union_of_labels() {
        let mut raw = RawSeries::new();
        raw.insert("2024-03-15".to_string(), fields(&[("1. open", "1.0")]));
        raw.insert(
            "2024-03-14".to_string(),
            fields(&[("1. open", "3.0"), ("5. volume", "9")]),
        );

        let frame = raw_frame(&raw).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.column("5. volume").unwrap().null_count(), 1);
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let symbol = Symbol::parse("AAPL").unwrap();
        std::fs::write(dir.path().join("AAPL_data.csv"), "stale contents\n").unwrap();

        let mut raw = RawSeries::new();
        raw.insert("2024-03-15".to_string(), fields(&[("4. close", "2.0")]));
        let path = export_csv(&raw, &symbol, dir.path()).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().next(), Some("Date,4. close"));
    }
}
