use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::IngestError;

/// A survey export held as text: one header row of question wording, then one
/// row per submission.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Trim, drop a byte-order mark, collapse internal whitespace runs and
/// compose to NFC.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized.nfc().collect()
}

/// Trimmed cell text in NFC, so decomposed Vietnamese matches the labels.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().nfc().collect()
}

/// Read a delimited export. The first non-blank row is the header row; short
/// rows are padded with empty cells.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows: Vec<Vec<String>> = raw_rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );
    Ok(CsvTable { headers, rows })
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names made unique and non-empty, in header order.
    pub fn column_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let base = if header.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                header.clone()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            names.push(name);
        }
        names
    }

    /// Every column becomes a string column; empty cells become null.
    pub fn to_dataframe(&self) -> Result<DataFrame, IngestError> {
        let names = self.column_names();
        let mut columns: Vec<Column> = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let values: Vec<Option<String>> = self
                .rows
                .iter()
                .map(|row| {
                    row.get(idx)
                        .filter(|value| !value.is_empty())
                        .cloned()
                })
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }
        Ok(DataFrame::new(columns)?)
    }
}
