//! Wellbeing analysis over the canonical survey dataset.
//!
//! - **dataset**: per-respondent scores derived once per run
//! - **aggregate**: AHS and factor scores
//! - **index**: NHS, retention risk, cohort breakdowns
//! - **correlation**: factor/happiness Pearson correlations
//! - **keywords**: wish keyword frequencies behind an injected tokenizer
//! - **charts**: distributions for plotting
//! - **analyzer**: runs the stages and builds the report

pub mod aggregate;
pub mod analyzer;
pub mod charts;
pub mod correlation;
pub mod dataset;
pub mod index;
pub mod keywords;
pub mod stats;

pub use analyzer::SurveyAnalyzer;
pub use dataset::SurveyData;
pub use keywords::{
    CHART_KEYWORDS, SUMMARY_KEYWORDS, TokenizeError, Tokenizer, UnicodeWordTokenizer,
    extract_keywords,
};
pub use stats::{pearson, round2};
