//! Typed ETL stages.
//!
//! Each stage consumes the previous one and returns the next:
//!
//! 1. [`MappedFrame`] - raw headers renamed to canonical ids
//! 2. [`CleanFrame`] - identity columns out, attention gate, semester, duplicates, coercion
//! 3. [`EncodedFrame`] - Likert columns as 1..5, numeric text cast to numbers
//! 4. [`CanonicalFrame`] - reverse-coded items flipped; the immutable ETL output
//!
//! Reverse coding is a method on [`EncodedFrame`] that takes `self`, so a
//! frame can be flipped once and only once.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use survey_ingest::column_string_values;
use survey_model::{ColumnKind, MappingSummary, Result};
use survey_standards::SurveyStandards;

use crate::cleaner::{CleanSummary, clean_responses, drop_duplicate_rows};
use crate::coerce::{CoerceSummary, coerce_types};
use crate::frame::{column_names, is_numeric_column};
use crate::likert::{LikertSummary, cast_numeric_text, encode_likert_columns, profile_values};
use crate::reverse::{ReverseSummary, reverse_code_columns};

/// Raw export with canonical headers.
#[derive(Debug, Clone)]
pub struct MappedFrame {
    data: DataFrame,
}

impl MappedFrame {
    pub fn map(mut data: DataFrame, standards: &SurveyStandards) -> Result<(Self, MappingSummary)> {
        let summary = survey_map::apply_column_mapping(&mut data, standards)?;
        Ok((Self { data }, summary))
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Run the cleaner, then coerce timestamps and GPA.
    pub fn clean(
        mut self,
        standards: &SurveyStandards,
    ) -> Result<(CleanFrame, CleanSummary, CoerceSummary)> {
        let clean = clean_responses(&mut self.data, standards)?;
        let coerce = coerce_types(&mut self.data, standards)?;
        Ok((CleanFrame { data: self.data }, clean, coerce))
    }
}

/// Cleaned responses, Likert items still as text.
#[derive(Debug, Clone)]
pub struct CleanFrame {
    data: DataFrame,
}

impl CleanFrame {
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn encode(mut self, standards: &SurveyStandards) -> Result<(EncodedFrame, LikertSummary)> {
        let summary = encode_likert_columns(&mut self.data, standards)?;
        Ok((EncodedFrame { data: self.data }, summary))
    }
}

/// Likert items encoded, reverse-worded items not yet flipped.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    data: DataFrame,
}

impl EncodedFrame {
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Flip the reverse-worded items and seal the canonical dataset.
    ///
    /// Rows that became identical through encoding or coercion are collapsed
    /// so the canonical dataset never holds duplicates.
    pub fn reverse_code(
        mut self,
        standards: &SurveyStandards,
    ) -> Result<(CanonicalFrame, ReverseSummary, usize)> {
        let summary = reverse_code_columns(&mut self.data, &standards.reverse_coded)?;
        let duplicates = drop_duplicate_rows(&mut self.data)?;
        Ok((CanonicalFrame { data: self.data }, summary, duplicates))
    }
}

/// The canonical clean dataset: one row per respondent, factor items oriented
/// "higher is more positive".
#[derive(Debug, Clone)]
pub struct CanonicalFrame {
    data: DataFrame,
}

impl CanonicalFrame {
    /// Wrap a frame read back from a processed CSV. Text columns whose values
    /// are all numbers get their numeric type back.
    pub fn from_processed(mut data: DataFrame, standards: &SurveyStandards) -> Result<Self> {
        restore_numeric_columns(&mut data, standards)?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.data)
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }
}

fn restore_numeric_columns(df: &mut DataFrame, standards: &SurveyStandards) -> Result<()> {
    for name in column_names(df) {
        if is_numeric_column(df, &name) {
            continue;
        }
        let Some(values) = column_string_values(df, &name) else {
            continue;
        };
        if profile_values(&values, standards).classify() != ColumnKind::Numeric {
            continue;
        }
        cast_numeric_text(df, &name, &values)?;
        debug!(column = %name, "restored numeric column");
    }
    Ok(())
}

/// What each ETL stage did.
#[derive(Debug, Clone, Default)]
pub struct EtlSummary {
    pub mapping: MappingSummary,
    pub clean: CleanSummary,
    pub coerce: CoerceSummary,
    pub likert: LikertSummary,
    pub reverse: ReverseSummary,
    /// Rows collapsed after encoding made them identical.
    pub late_duplicates: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone)]
pub struct EtlOutput {
    pub frame: CanonicalFrame,
    pub summary: EtlSummary,
}

/// Runs the ETL stages in order against one questionnaire configuration.
#[derive(Debug, Clone)]
pub struct EtlPipeline<'a> {
    standards: &'a SurveyStandards,
}

impl<'a> EtlPipeline<'a> {
    pub fn new(standards: &'a SurveyStandards) -> Self {
        Self { standards }
    }

    pub fn run(&self, raw: DataFrame) -> Result<EtlOutput> {
        let span = info_span!("etl", input_rows = raw.height());
        let _guard = span.enter();
        let etl_start = Instant::now();

        let start = Instant::now();
        let (mapped, mapping) = MappedFrame::map(raw, self.standards)?;
        debug!(
            renamed = mapping.renamed_count(),
            duration_ms = start.elapsed().as_millis(),
            "mapping stage complete"
        );

        let start = Instant::now();
        let (cleaned, clean, coerce) = mapped.clean(self.standards)?;
        debug!(
            rows = cleaned.data().height(),
            duration_ms = start.elapsed().as_millis(),
            "cleaning stage complete"
        );

        let start = Instant::now();
        let (encoded, likert) = cleaned.encode(self.standards)?;
        debug!(
            encoded = likert.encoded.len(),
            duration_ms = start.elapsed().as_millis(),
            "encoding stage complete"
        );

        let (frame, reverse, late_duplicates) = encoded.reverse_code(self.standards)?;
        let output_rows = frame.height();
        info!(
            output_rows,
            likert_columns = likert.encoded.len(),
            reversed = reverse.reversed.len(),
            duration_ms = etl_start.elapsed().as_millis(),
            "etl complete"
        );
        Ok(EtlOutput {
            frame,
            summary: EtlSummary {
                mapping,
                clean,
                coerce,
                likert,
                reverse,
                late_duplicates,
                output_rows,
            },
        })
    }
}

/// Convenience wrapper around [`EtlPipeline::run`].
pub fn process_survey(raw: DataFrame, standards: &SurveyStandards) -> Result<EtlOutput> {
    EtlPipeline::new(standards).run(raw)
}
