//! Runs every analysis stage and merges their sections into a [`Report`].

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use survey_ingest::StopWords;
use survey_model::{Metric, Report, ReportBuilder, ReportSection};
use survey_standards::SurveyStandards;
use survey_transform::CanonicalFrame;

use crate::aggregate::{ahs_section, factor_scores_section};
use crate::charts::chart_section;
use crate::correlation::correlation_section;
use crate::dataset::SurveyData;
use crate::index::{cohort_section, nhs_section, retention_section};
use crate::keywords::{Tokenizer, UnicodeWordTokenizer, wish_section};

pub struct SurveyAnalyzer<'a> {
    standards: &'a SurveyStandards,
    tokenizer: Box<dyn Tokenizer + 'a>,
    stop_words: StopWords,
    source_sha256: Option<String>,
}

impl<'a> SurveyAnalyzer<'a> {
    /// Analyzer with the Unicode word tokenizer and no stop words.
    pub fn new(standards: &'a SurveyStandards) -> Self {
        Self {
            standards,
            tokenizer: Box::new(UnicodeWordTokenizer),
            stop_words: StopWords::empty(),
            source_sha256: None,
        }
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'a) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Tag reports with the digest of the export they were computed from.
    #[must_use]
    pub fn with_source_sha256(mut self, digest: impl Into<String>) -> Self {
        self.source_sha256 = Some(digest.into());
        self
    }

    fn metadata_section(&self, data: &SurveyData<'_>) -> ReportSection {
        let mut section = ReportSection::new();
        if let Some(digest) = &self.source_sha256 {
            section.insert("source_sha256", Metric::Text(digest.clone()));
        }
        section.insert(
            "respondent_count",
            Metric::Count(data.respondent_count() as u64),
        );
        section
    }

    /// The summary report.
    pub fn analyze(&self, frame: &CanonicalFrame) -> Report {
        self.analyze_frame(frame.data())
    }

    pub fn analyze_frame(&self, df: &DataFrame) -> Report {
        let span = info_span!("analyze", respondents = df.height());
        let _guard = span.enter();
        let start = Instant::now();
        let data = SurveyData::new(df, self.standards);
        let report = ReportBuilder::new()
            .merge(self.metadata_section(&data))
            .merge(ahs_section(&data))
            .merge(factor_scores_section(&data))
            .merge(nhs_section(&data))
            .merge(cohort_section(&data))
            .merge(correlation_section(&data))
            .merge(retention_section(&data))
            .merge(wish_section(&data, self.tokenizer.as_ref(), &self.stop_words))
            .build();
        info!(
            metrics = report.len(),
            ahs_overall = report.value("ahs_overall"),
            nhs_percentage = report.value("nhs_percentage"),
            duration_ms = start.elapsed().as_millis(),
            "analysis complete"
        );
        report
    }

    /// Distributions and breakdowns for plotting.
    pub fn chart_data(&self, frame: &CanonicalFrame) -> Report {
        let df = frame.data();
        let data = SurveyData::new(df, self.standards);
        ReportBuilder::new()
            .merge(self.metadata_section(&data))
            .merge(chart_section(&data, self.tokenizer.as_ref(), &self.stop_words))
            .build()
    }
}
