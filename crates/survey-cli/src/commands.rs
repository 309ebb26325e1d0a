use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info_span;

use survey_cli::pipeline::{
    RunOptions, analyze, load_canonical, load_export, load_stop_word_set, run_pipeline,
    transform, validate,
};
use survey_cli::types::{AnalyzeResult, ProcessResult, RunResult};
use survey_model::schema::is_factor_field;
use survey_report::{PROCESSED_CSV, REPORT_JSON, write_canonical_csv, write_report_json};
use survey_standards::{SurveyStandards, resolve_standards};

use crate::cli::{AnalyzeArgs, ProcessArgs, RunArgs, StandardsArgs};
use crate::summary::{apply_table_style, dim_cell};

fn load_standards_arg(args: &StandardsArgs) -> Result<SurveyStandards> {
    resolve_standards(args.standards.as_deref()).context("load survey standards")
}

/// `name` in the same directory as `path`.
fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from(name), |parent| parent.join(name))
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let span = info_span!("process", input = %args.input.display());
    let _guard = span.enter();
    let standards = load_standards_arg(&args.standards)?;
    let raw = load_export(&args.input)?;
    let output = transform(raw, &standards)?;
    let conformance = validate(&output.frame, PROCESSED_CSV, &standards);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| sibling(&args.input, PROCESSED_CSV));
    let written = if args.dry_run {
        None
    } else {
        write_canonical_csv(&path, output.frame.data())?;
        Some(path)
    };
    Ok(ProcessResult {
        input: args.input.clone(),
        output: written,
        etl: output.summary,
        conformance,
    })
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();
    let standards = load_standards_arg(&args.standards)?;
    let stop_words = load_stop_word_set(args.stop_words.as_deref())?;
    let frame = load_canonical(&args.input, &standards)?;
    let conformance = validate(&frame, &args.input.display().to_string(), &standards);
    let analysis = analyze(&frame, &standards, stop_words, None);

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| sibling(&args.input, REPORT_JSON));
    write_report_json(&report_path, &analysis.report)?;
    if let Some(path) = &args.chart_data {
        write_report_json(path, &analysis.chart_data)?;
    }
    Ok(AnalyzeResult {
        input: args.input.clone(),
        report_path: Some(report_path),
        chart_path: args.chart_data.clone(),
        report: analysis.report,
        conformance,
    })
}

pub fn run_full(args: &RunArgs) -> Result<RunResult> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| sibling(&args.input, "output"));
    let options = RunOptions {
        input: args.input.clone(),
        output_dir,
        standards: args.standards.standards.clone(),
        stop_words: args.stop_words.clone(),
        dry_run: args.dry_run,
    };
    run_pipeline(&options)
}

pub fn run_standards(args: &StandardsArgs) -> Result<()> {
    let standards = load_standards_arg(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Question", "Column", "Handling"]);
    apply_table_style(&mut table);
    for mapping in &standards.column_mapping {
        table.add_row(vec![
            Cell::new(&mapping.raw),
            Cell::new(&mapping.canonical),
            handling_cell(&standards, &mapping.canonical),
        ]);
    }
    println!("{table}");

    let mut scale = Table::new();
    scale.set_header(vec!["Answer", "Code"]);
    apply_table_style(&mut scale);
    for level in &standards.likert_scale {
        scale.add_row(vec![Cell::new(&level.label), Cell::new(level.code)]);
    }
    println!("{scale}");
    Ok(())
}

fn handling_cell(standards: &SurveyStandards, canonical: &str) -> Cell {
    if standards.pii_columns.iter().any(|column| column == canonical) {
        Cell::new("dropped")
    } else if standards.attention.column == canonical {
        Cell::new(format!("attention gate: {:?}", standards.attention.expected))
    } else if canonical == standards.worry_field {
        Cell::new("residence stress only, excluded from scores")
    } else if standards.is_reverse_coded(canonical) {
        Cell::new("reverse coded")
    } else if is_factor_field(canonical) {
        Cell::new("factor item")
    } else {
        dim_cell("-")
    }
}
