//! Output writers for the survey pipeline.
//!
//! - **Canonical CSV**: the clean dataset, UTF-8 with a byte-order mark so
//!   spreadsheet tools pick the right encoding
//! - **JSON**: the summary report and the chart data, pretty-printed with
//!   keys in report order

mod csv_output;
mod json_output;

pub use csv_output::{UTF8_BOM, write_canonical_csv};
pub use json_output::{write_json, write_report_json};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use survey_model::Report;

pub const PROCESSED_CSV: &str = "processed.csv";
pub const REPORT_JSON: &str = "report.json";
pub const CHART_DATA_JSON: &str = "chart_data.json";

/// Paths written by [`write_run_outputs`].
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub processed: PathBuf,
    pub report: PathBuf,
    pub chart_data: PathBuf,
}

/// Write the canonical dataset, summary report and chart data into
/// `output_dir`, creating it when needed.
pub fn write_run_outputs(
    output_dir: &Path,
    data: &DataFrame,
    report: &Report,
    chart_data: &Report,
) -> Result<RunOutputs> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let outputs = RunOutputs {
        processed: output_dir.join(PROCESSED_CSV),
        report: output_dir.join(REPORT_JSON),
        chart_data: output_dir.join(CHART_DATA_JSON),
    };
    write_canonical_csv(&outputs.processed, data)?;
    write_report_json(&outputs.report, report)?;
    write_report_json(&outputs.chart_data, chart_data)?;
    Ok(outputs)
}
