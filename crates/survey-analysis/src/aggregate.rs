//! Factor Aggregator.

use survey_model::{Factor, Metric, MetricMap, ReportSection};

use crate::dataset::SurveyData;
use crate::stats::{mean_present, round2};

/// Population mean of per-respondent scores, rounded to two decimals.
pub fn population_score(scores: &[Option<f64>]) -> Option<f64> {
    mean_present(scores).map(round2)
}

/// `ahs_overall`: population mean of the individual happiness scores.
pub fn ahs_section(data: &SurveyData<'_>) -> ReportSection {
    let mut section = ReportSection::new();
    let metric = if data.has_happiness() {
        Metric::Value(population_score(data.individual_ahs()))
    } else {
        Metric::not_applicable("Missing 'hap_*' columns for analysis.")
    };
    section.insert("ahs_overall", metric);
    section
}

/// Population score of each predictor factor, keyed by its score label.
/// A factor without items reports null.
pub fn factor_score_map(data: &SurveyData<'_>) -> MetricMap {
    Factor::PREDICTORS
        .iter()
        .map(|&factor| {
            let value = data.factor_scores(factor).and_then(population_score);
            (factor.score_label(), Metric::Value(value))
        })
        .collect()
}

pub fn factor_scores_section(data: &SurveyData<'_>) -> ReportSection {
    let mut section = ReportSection::new();
    section.insert("factor_scores", factor_score_map(data).into());
    section
}
