//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey",
    version,
    about = "Student wellbeing survey pipeline - clean exports and compute wellbeing metrics",
    long_about = "Clean a Vietnamese student wellbeing questionnaire export and analyze it.\n\n\
                  Maps question text to canonical columns, filters inattentive and duplicate\n\
                  responses, encodes Likert answers, then reports happiness, NHS, cohort\n\
                  breakdowns, factor correlations and wish keywords."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow respondent free text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a raw export into the canonical CSV.
    Process(ProcessArgs),

    /// Analyze an already processed CSV.
    Analyze(AnalyzeArgs),

    /// Clean and analyze in one go.
    Run(RunArgs),

    /// Print the active question-to-column mapping.
    Standards(StandardsArgs),
}

#[derive(Args)]
pub struct StandardsArgs {
    /// TOML file overriding the built-in questionnaire configuration.
    ///
    /// Falls back to SURVEY_STANDARDS_FILE, then to the built-in defaults.
    #[arg(long = "standards", value_name = "FILE")]
    pub standards: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Raw questionnaire export (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Canonical CSV path (default: processed.csv next to INPUT).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,

    /// Clean and validate without writing the canonical CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Canonical CSV produced by `process` or `run`.
    #[arg(value_name = "CANONICAL_CSV")]
    pub input: PathBuf,

    /// Report path (default: report.json next to CANONICAL_CSV).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Also write chart data to this path.
    #[arg(long = "chart-data", value_name = "PATH")]
    pub chart_data: Option<PathBuf>,

    /// Newline-delimited stop words (default: built-in Vietnamese list).
    #[arg(long = "stop-words", value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Raw questionnaire export (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Newline-delimited stop words (default: built-in Vietnamese list).
    #[arg(long = "stop-words", value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    #[command(flatten)]
    pub standards: StandardsArgs,

    /// Run every stage and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
