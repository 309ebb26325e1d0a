use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use survey_ingest::any_to_string;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `df` as a BOM-prefixed UTF-8 CSV. Nulls become empty cells and whole
/// floats lose their fractional part.
pub fn write_canonical_csv(path: &Path, df: &DataFrame) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut sink = BufWriter::new(file);
    sink.write_all(UTF8_BOM)
        .with_context(|| format!("write {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(sink);
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&headers)
        .with_context(|| format!("write header to {}", path.display()))?;

    let columns = df.get_columns();
    for idx in 0..df.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("write row {idx} to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = headers.len(),
        "wrote canonical csv"
    );
    Ok(())
}
