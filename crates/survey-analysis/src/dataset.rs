//! Per-respondent scores derived once from the canonical dataset.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use survey_ingest::{column_f64_values, column_i64_values, column_string_values};
use survey_model::{Factor, FactorSet};
use survey_standards::SurveyStandards;

use crate::stats::mean_present;

/// Row-wise mean of `columns`; null where every column is null.
pub fn respondent_scores(df: &DataFrame, columns: &[String]) -> Vec<Option<f64>> {
    let values: Vec<Vec<Option<f64>>> = columns
        .iter()
        .filter_map(|name| column_f64_values(df, name))
        .collect();
    (0..df.height())
        .map(|idx| {
            let row: Vec<Option<f64>> = values.iter().map(|column| column[idx]).collect();
            mean_present(&row)
        })
        .collect()
}

/// The canonical dataset plus the derived per-respondent factor scores.
///
/// Built once per analysis run and shared by every stage.
#[derive(Debug)]
pub struct SurveyData<'a> {
    df: &'a DataFrame,
    standards: &'a SurveyStandards,
    factors: FactorSet,
    individual_ahs: Vec<Option<f64>>,
    scores: BTreeMap<Factor, Vec<Option<f64>>>,
}

impl<'a> SurveyData<'a> {
    pub fn new(df: &'a DataFrame, standards: &'a SurveyStandards) -> Self {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let factors = FactorSet::from_columns(&names, &[standards.worry_field.as_str()]);
        let scores: BTreeMap<Factor, Vec<Option<f64>>> = factors
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| (group.factor, respondent_scores(df, &group.columns)))
            .collect();
        let individual_ahs = scores
            .get(&Factor::Happiness)
            .cloned()
            .unwrap_or_else(|| vec![None; df.height()]);
        Self {
            df,
            standards,
            factors,
            individual_ahs,
            scores,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        self.df
    }

    pub fn standards(&self) -> &SurveyStandards {
        self.standards
    }

    pub fn factors(&self) -> &FactorSet {
        &self.factors
    }

    pub fn respondent_count(&self) -> usize {
        self.df.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// True when at least one happiness item is present.
    pub fn has_happiness(&self) -> bool {
        !self.factors.happiness().is_empty()
    }

    /// Per-respondent mean of the happiness items.
    pub fn individual_ahs(&self) -> &[Option<f64>] {
        &self.individual_ahs
    }

    /// Per-respondent factor score; `None` when the factor has no items.
    pub fn factor_scores(&self, factor: Factor) -> Option<&[Option<f64>]> {
        self.scores.get(&factor).map(Vec::as_slice)
    }

    pub fn f64_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        column_f64_values(self.df, name)
    }

    pub fn i64_column(&self, name: &str) -> Option<Vec<Option<i64>>> {
        column_i64_values(self.df, name)
    }

    pub fn text_column(&self, name: &str) -> Option<Vec<Option<String>>> {
        column_string_values(self.df, name)
    }
}
