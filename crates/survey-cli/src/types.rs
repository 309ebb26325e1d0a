use std::path::PathBuf;

use survey_model::{ConformanceReport, Report};
use survey_report::RunOutputs;
use survey_transform::EtlSummary;

/// Outcome of `survey process`.
#[derive(Debug)]
pub struct ProcessResult {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub etl: EtlSummary,
    pub conformance: ConformanceReport,
}

/// Outcome of `survey analyze`.
#[derive(Debug)]
pub struct AnalyzeResult {
    pub input: PathBuf,
    pub report_path: Option<PathBuf>,
    pub chart_path: Option<PathBuf>,
    pub report: Report,
    pub conformance: ConformanceReport,
}

/// Outcome of `survey run`.
#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub source_sha256: String,
    pub etl: EtlSummary,
    pub conformance: ConformanceReport,
    pub report: Report,
    pub outputs: Option<RunOutputs>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.conformance.has_errors()
    }
}
