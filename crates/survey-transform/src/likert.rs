//! Likert Encoder.
//!
//! Every text column is profiled once and tagged with a [`ColumnKind`].
//! Columns tagged [`ColumnKind::Likert`] are rewritten as 1..5 integers and
//! text columns tagged [`ColumnKind::Numeric`] get their numeric type.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;
use tracing::debug;

use survey_ingest::{column_string_values, parse_f64, parse_i64};
use survey_model::{ColumnKind, ColumnProfile, Result};
use survey_standards::SurveyStandards;

use crate::frame::{column_names, is_numeric_column, set_f64_column, set_i64_column};

/// Count recognized labels, numbers and distinct values in one column.
pub fn profile_values(values: &[Option<String>], standards: &SurveyStandards) -> ColumnProfile {
    let mut profile = ColumnProfile {
        total: values.len(),
        ..ColumnProfile::default()
    };
    let mut distinct = BTreeSet::new();
    for value in values.iter().flatten() {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        profile.non_null += 1;
        if parse_f64(trimmed).is_some() {
            profile.numeric += 1;
        }
        if standards.likert_code(trimmed).is_some() {
            profile.likert += 1;
        }
        distinct.insert(trimmed);
    }
    profile.distinct = distinct.len();
    profile
}

/// Classify every column of `df`. Columns already holding numbers are
/// [`ColumnKind::Numeric`] without inspection.
pub fn classify_columns(
    df: &DataFrame,
    standards: &SurveyStandards,
) -> BTreeMap<String, ColumnKind> {
    let mut kinds = BTreeMap::new();
    for name in column_names(df) {
        let kind = if is_numeric_column(df, &name) {
            ColumnKind::Numeric
        } else {
            match column_string_values(df, &name) {
                Some(values) => profile_values(&values, standards).classify(),
                None => continue,
            }
        };
        debug!(column = %name, kind = kind.as_str(), "classified column");
        kinds.insert(name, kind);
    }
    kinds
}

/// Columns converted by [`encode_likert_columns`], plus the classification
/// they were chosen from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikertSummary {
    pub kinds: BTreeMap<String, ColumnKind>,
    pub encoded: Vec<String>,
    /// Text columns of numbers cast to Int64, or Float64 when any value has a fraction.
    pub numeric: Vec<String>,
    /// Non-null values in encoded columns that were not recognized labels.
    pub unrecognized: usize,
}

/// Rewrite a text column of numbers as Int64, or Float64 when some value is
/// not an integer.
pub(crate) fn cast_numeric_text(
    df: &mut DataFrame,
    name: &str,
    values: &[Option<String>],
) -> Result<()> {
    let integers: Vec<Option<i64>> = values
        .iter()
        .map(|value| value.as_deref().and_then(parse_i64))
        .collect();
    let all_integers = values.iter().zip(&integers).all(|(value, parsed)| {
        parsed.is_some() || value.as_deref().is_none_or(|text| text.trim().is_empty())
    });
    if all_integers {
        set_i64_column(df, name, integers)
    } else {
        let floats: Vec<Option<f64>> = values
            .iter()
            .map(|value| value.as_deref().and_then(parse_f64))
            .collect();
        set_f64_column(df, name, floats)
    }
}

/// Map recognized agreement labels to their codes in every Likert column.
/// Unrecognized values become null. Numeric-coded exports ("1".."5") are
/// cast so later stages see numbers either way.
pub fn encode_likert_columns(
    df: &mut DataFrame,
    standards: &SurveyStandards,
) -> Result<LikertSummary> {
    let kinds = classify_columns(df, standards);
    let mut summary = LikertSummary::default();
    for (name, kind) in &kinds {
        if *kind == ColumnKind::Numeric && !is_numeric_column(df, name) {
            if let Some(values) = column_string_values(df, name) {
                cast_numeric_text(df, name, &values)?;
                debug!(column = %name, "cast numeric text column");
                summary.numeric.push(name.clone());
            }
            continue;
        }
        if *kind != ColumnKind::Likert {
            continue;
        }
        let Some(values) = column_string_values(df, name) else {
            continue;
        };
        let codes: Vec<Option<i64>> = values
            .iter()
            .map(|value| value.as_deref().and_then(|label| standards.likert_code(label)))
            .collect();
        summary.unrecognized += values
            .iter()
            .zip(&codes)
            .filter(|(value, code)| value.is_some() && code.is_none())
            .count();
        set_i64_column(df, name, codes)?;
        summary.encoded.push(name.clone());
    }
    summary.kinds = kinds;
    debug!(
        encoded = summary.encoded.len(),
        numeric = summary.numeric.len(),
        unrecognized = summary.unrecognized,
        "likert encoding complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(raw: &[&str]) -> Vec<Option<String>> {
        raw.iter()
            .map(|value| {
                if value.is_empty() {
                    None
                } else {
                    Some((*value).to_string())
                }
            })
            .collect()
    }

    #[test]
    fn nulls_do_not_count_against_the_threshold() {
        let standards = SurveyStandards::builtin();
        let profile = profile_values(
            &values(&["Đồng ý", "", "", "Trung lập", "Không đồng ý", "Đồng ý", "Có lẽ"]),
            &standards,
        );
        assert_eq!(profile.non_null, 5);
        assert_eq!(profile.likert, 4);
        assert_eq!(profile.classify(), ColumnKind::Likert);
    }

    #[test]
    fn residence_answers_are_categorical() {
        let standards = SurveyStandards::builtin();
        let profile = profile_values(
            &values(&["Ở trọ", "Ở cùng gia đình", "Ở trọ", "Ký túc xá", "Ở trọ", "Ở trọ"]),
            &standards,
        );
        assert_eq!(profile.classify(), ColumnKind::Categorical);
    }
}
