//! Survey processing pipeline with explicit stages.
//!
//! 1. **Ingest**: read the export (or an already processed CSV) into a frame
//! 2. **Transform**: mapping, cleaning, Likert encoding, reverse coding
//! 3. **Validate**: conformance checks on the canonical dataset
//! 4. **Analyze**: summary report and chart data
//! 5. **Output**: canonical CSV and JSON reports
//!
//! Each stage takes the output of the previous one and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use survey_analysis::SurveyAnalyzer;
use survey_ingest::{StopWords, load_stop_words, read_csv_table};
use survey_model::{ConformanceReport, Report};
use survey_report::{PROCESSED_CSV, write_run_outputs};
use survey_standards::hash::sha256_file;
use survey_standards::{SurveyStandards, resolve_standards};
use survey_transform::{CanonicalFrame, EtlOutput, process_survey};
use survey_validate::validate_canonical;

use crate::logging::redact_value;
use crate::types::RunResult;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Read a survey export into an all-text frame.
pub fn load_export(path: &Path) -> Result<DataFrame> {
    let table = read_csv_table(path).with_context(|| format!("read {}", path.display()))?;
    let df = table
        .to_dataframe()
        .with_context(|| format!("build frame from {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded export"
    );
    Ok(df)
}

/// Read a processed CSV back as the canonical dataset.
pub fn load_canonical(path: &Path, standards: &SurveyStandards) -> Result<CanonicalFrame> {
    let df = load_export(path)?;
    CanonicalFrame::from_processed(df, standards)
        .with_context(|| format!("restore column types in {}", path.display()))
}

/// The stop-word file when given, otherwise the built-in Vietnamese list.
pub fn load_stop_word_set(path: Option<&Path>) -> Result<StopWords> {
    match path {
        Some(path) => load_stop_words(path)
            .with_context(|| format!("load stop words from {}", path.display())),
        None => Ok(StopWords::vietnamese_defaults()),
    }
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

pub fn transform(raw: DataFrame, standards: &SurveyStandards) -> Result<EtlOutput> {
    process_survey(raw, standards).context("transform survey export")
}

// ============================================================================
// Stage 3: Validate
// ============================================================================

pub fn validate(
    frame: &CanonicalFrame,
    dataset: &str,
    standards: &SurveyStandards,
) -> ConformanceReport {
    let span = info_span!("validate", dataset);
    span.in_scope(|| validate_canonical(dataset, frame.data(), standards))
}

// ============================================================================
// Stage 4: Analyze
// ============================================================================

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: Report,
    pub chart_data: Report,
}

pub fn analyze(
    frame: &CanonicalFrame,
    standards: &SurveyStandards,
    stop_words: StopWords,
    source_sha256: Option<&str>,
) -> AnalysisOutput {
    let mut analyzer = SurveyAnalyzer::new(standards).with_stop_words(stop_words);
    if let Some(digest) = source_sha256 {
        analyzer = analyzer.with_source_sha256(digest);
    }
    let report = analyzer.analyze(frame);
    log_wish_keywords(&report);
    let chart_data = analyzer.chart_data(frame);
    AnalysisOutput { report, chart_data }
}

/// Keywords are respondent free text and stay redacted unless `--log-data`.
fn log_wish_keywords(report: &Report) {
    let Some(keywords) = report.map("wish_analysis") else {
        return;
    };
    for (keyword, metric) in keywords.iter() {
        debug!(
            keyword = redact_value(keyword),
            count = metric.as_count(),
            "wish keyword"
        );
    }
}

// ============================================================================
// Full run
// ============================================================================

/// Inputs for [`run_pipeline`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub standards: Option<PathBuf>,
    pub stop_words: Option<PathBuf>,
    /// Compute everything, write nothing.
    pub dry_run: bool,
}

/// Export in, canonical CSV plus reports out.
pub fn run_pipeline(options: &RunOptions) -> Result<RunResult> {
    let span = info_span!("run", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let standards =
        resolve_standards(options.standards.as_deref()).context("load survey standards")?;
    let stop_words = load_stop_word_set(options.stop_words.as_deref())?;
    let source_sha256 = sha256_file(&options.input)
        .with_context(|| format!("hash {}", options.input.display()))?;

    let raw = load_export(&options.input)?;
    let EtlOutput { frame, summary } = transform(raw, &standards)?;
    let conformance = validate(&frame, PROCESSED_CSV, &standards);
    let analysis = analyze(&frame, &standards, stop_words, Some(&source_sha256));

    let outputs = if options.dry_run {
        info!("dry run, no files written");
        None
    } else {
        Some(write_run_outputs(
            &options.output_dir,
            frame.data(),
            &analysis.report,
            &analysis.chart_data,
        )?)
    };

    info!(
        respondents = frame.height(),
        conformance_errors = conformance.error_count(),
        conformance_warnings = conformance.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        input: options.input.clone(),
        output_dir: options.output_dir.clone(),
        source_sha256,
        etl: summary,
        conformance,
        report: analysis.report,
        outputs,
    })
}
