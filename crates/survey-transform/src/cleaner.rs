//! Response Validator/Cleaner.
//!
//! Runs in a fixed order: identity columns out, attention-check gate,
//! semester normalization, exact-duplicate removal. Running it on its own
//! output changes nothing.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use polars::prelude::{AnyValue, DataFrame};
use regex::Regex;
use tracing::{debug, info};

use survey_ingest::{any_to_string, column_string_values};
use survey_model::schema::{DEM_SEMESTER, SEMESTER_RANGE};
use survey_model::{Result, SurveyError};
use survey_standards::{SurveyStandards, normalize_label};

use crate::frame::{cell_key, column_names, drop_column, filter_rows, set_i64_column};

static DIGITS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());

/// Row and column counts removed by each cleaning step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub input_rows: usize,
    pub pii_dropped: Vec<String>,
    pub attention_failed: usize,
    pub semester_dropped: usize,
    pub duplicates_removed: usize,
    pub output_rows: usize,
}

/// Remove the identity columns named by the questionnaire configuration.
pub fn drop_pii_columns(df: &mut DataFrame, standards: &SurveyStandards) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for name in &standards.pii_columns {
        if drop_column(df, name)? {
            dropped.push(name.clone());
        }
    }
    Ok(dropped)
}

/// Keep only respondents who gave the expected attention-check answer (or
/// its Likert code), then drop the check column. Returns the number of rows removed.
pub fn apply_attention_gate(df: &mut DataFrame, standards: &SurveyStandards) -> Result<usize> {
    let column = standards.attention.column.as_str();
    let Some(values) = column_string_values(df, column) else {
        debug!(column, "attention check column absent, no filtering");
        return Ok(0);
    };
    let expected = normalize_label(&standards.attention.expected);
    // Numeric-coded exports carry the label's code instead of the label.
    let expected_code = standards.likert_code(&expected).map(|code| code.to_string());
    let keep: Vec<bool> = values
        .iter()
        .map(|value| {
            value.as_deref().map(normalize_label).is_some_and(|answer| {
                answer == expected || expected_code.as_deref() == Some(answer.as_str())
            })
        })
        .collect();
    let removed = keep.iter().filter(|kept| !**kept).count();
    filter_rows(df, &keep)?;
    drop_column(df, column)?;
    Ok(removed)
}

/// First run of ASCII digits in a semester answer ("Kỳ 3" -> 3).
pub fn extract_semester(raw: &str) -> Option<i64> {
    let regex = DIGITS.as_ref()?;
    let digits = regex.find(raw)?;
    digits.as_str().parse::<i64>().ok()
}

/// Rewrite `dem_semester` as an integer column, dropping rows without a
/// usable semester. Returns the number of rows removed.
pub fn normalize_semester(df: &mut DataFrame) -> Result<usize> {
    let Ok(column) = df.column(DEM_SEMESTER) else {
        debug!("semester column absent, normalization skipped");
        return Ok(0);
    };
    let parsed: Vec<Option<i64>> = (0..df.height())
        .map(|idx| {
            let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            extract_semester(&raw).filter(|semester| SEMESTER_RANGE.contains(semester))
        })
        .collect();
    let keep: Vec<bool> = parsed.iter().map(Option::is_some).collect();
    let removed = keep.iter().filter(|kept| !**kept).count();
    let values: Vec<Option<i64>> = parsed.into_iter().flatten().map(Some).collect();
    filter_rows(df, &keep)?;
    set_i64_column(df, DEM_SEMESTER, values)?;
    Ok(removed)
}

/// Remove rows equal to an earlier row across every column, keeping the first.
pub fn drop_duplicate_rows(df: &mut DataFrame) -> Result<usize> {
    if df.height() == 0 || df.width() == 0 {
        return Ok(0);
    }
    let names = column_names(df);
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        columns.push(
            df.column(name)
                .map_err(|_| SurveyError::MissingColumn(name.clone()))?,
        );
    }
    let mut seen: BTreeSet<Vec<Option<String>>> = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let key: Vec<Option<String>> = columns
            .iter()
            .map(|column| cell_key(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        keep.push(seen.insert(key));
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed > 0 {
        filter_rows(df, &keep)?;
    }
    Ok(removed)
}

/// Run every cleaning step in order.
pub fn clean_responses(df: &mut DataFrame, standards: &SurveyStandards) -> Result<CleanSummary> {
    let input_rows = df.height();
    let pii_dropped = drop_pii_columns(df, standards)?;
    let attention_failed = apply_attention_gate(df, standards)?;
    let semester_dropped = normalize_semester(df)?;
    let duplicates_removed = drop_duplicate_rows(df)?;
    let summary = CleanSummary {
        input_rows,
        pii_dropped,
        attention_failed,
        semester_dropped,
        duplicates_removed,
        output_rows: df.height(),
    };
    info!(
        input_rows,
        attention_failed,
        semester_dropped,
        duplicates_removed,
        output_rows = summary.output_rows,
        "responses cleaned"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_digits_are_extracted() {
        assert_eq!(extract_semester("Kỳ 3"), Some(3));
        assert_eq!(extract_semester("7"), Some(7));
        assert_eq!(extract_semester("kỳ 12 (cuối)"), Some(12));
        assert_eq!(extract_semester("Chưa rõ"), None);
        assert_eq!(extract_semester(""), None);
    }
}
