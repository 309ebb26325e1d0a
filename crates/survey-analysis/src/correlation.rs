//! Correlation Engine.
//!
//! Pearson r between each predictor factor's per-respondent score and the
//! individual happiness score.

use tracing::debug;

use survey_model::{Factor, Metric, MetricMap, ReportSection};

use crate::dataset::SurveyData;
use crate::stats::{pearson, round2};

/// One computed factor correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorCorrelation {
    pub factor: Factor,
    pub r: f64,
}

/// Correlations in predictor order. Factors without items, or whose r is
/// undefined, are left out.
pub fn factor_correlations(data: &SurveyData<'_>) -> Vec<FactorCorrelation> {
    let target = data.individual_ahs();
    Factor::PREDICTORS
        .iter()
        .filter_map(|&factor| {
            let scores = data.factor_scores(factor)?;
            match pearson(scores, target) {
                Some(r) => Some(FactorCorrelation {
                    factor,
                    r: round2(r),
                }),
                None => {
                    debug!(factor = factor.label(), "correlation undefined, skipped");
                    None
                }
            }
        })
        .collect()
}

/// Factor with the largest r; the first one wins a tie.
pub fn top_correlated(correlations: &[FactorCorrelation]) -> Option<Factor> {
    let mut best: Option<&FactorCorrelation> = None;
    for candidate in correlations {
        if best.is_none_or(|current| candidate.r > current.r) {
            best = Some(candidate);
        }
    }
    best.map(|entry| entry.factor)
}

pub fn correlation_section(data: &SurveyData<'_>) -> ReportSection {
    let correlations = factor_correlations(data);
    let map: MetricMap = correlations
        .iter()
        .map(|entry| (entry.factor.label(), Metric::Value(Some(entry.r))))
        .collect();
    let mut section = ReportSection::new();
    section.insert("correlations", map.into());
    if let Some(factor) = top_correlated(&correlations) {
        section.insert("top_correlated_factor", Metric::Text(factor.label().to_string()));
    }
    section
}
