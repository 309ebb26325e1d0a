//! Index Calculator: NHS, retention risk and cohort breakdowns.

use std::collections::BTreeMap;

use survey_model::schema::{DEM_GPA, DEM_RESIDENCE, DEM_SEMESTER};
use survey_model::{Metric, MetricMap, ReportSection};
use tracing::warn;

use crate::dataset::SurveyData;
use crate::stats::{mean_present, round2};

/// Individual AHS at or above this is a promoter.
pub const PROMOTER_THRESHOLD: f64 = 4.0;
/// Individual AHS at or below this is a detractor.
pub const DETRACTOR_THRESHOLD: f64 = 2.0;
/// Loyalty answers at or below this flag a retention risk.
pub const RETENTION_RISK_THRESHOLD: f64 = 2.0;

/// Net Happiness Score in percent. Respondents without a score count in the
/// total but are neither promoters nor detractors. `None` for an empty population.
pub fn net_happiness_score(scores: &[Option<f64>]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let promoters = scores
        .iter()
        .flatten()
        .filter(|&&score| score >= PROMOTER_THRESHOLD)
        .count() as f64;
    let detractors = scores
        .iter()
        .flatten()
        .filter(|&&score| score <= DETRACTOR_THRESHOLD)
        .count() as f64;
    Some(round2((promoters - detractors) / scores.len() as f64 * 100.0))
}

/// Share of respondents whose loyalty answer is at or below the threshold.
pub fn retention_risk_rate(loyalty: &[Option<f64>]) -> f64 {
    if loyalty.is_empty() {
        return 0.0;
    }
    let at_risk = loyalty
        .iter()
        .flatten()
        .filter(|&&answer| answer <= RETENTION_RISK_THRESHOLD)
        .count() as f64;
    round2(at_risk / loyalty.len() as f64 * 100.0)
}

pub fn nhs_section(data: &SurveyData<'_>) -> ReportSection {
    let mut section = ReportSection::new();
    let metric = if data.has_happiness() {
        Metric::Value(net_happiness_score(data.individual_ahs()))
    } else {
        Metric::not_applicable("Missing 'hap_*' columns for analysis.")
    };
    section.insert("nhs_percentage", metric);
    section
}

pub fn retention_section(data: &SurveyData<'_>) -> ReportSection {
    let field = data.standards().loyalty_field.as_str();
    let rate = match data.f64_column(field) {
        Some(loyalty) => retention_risk_rate(&loyalty),
        None => {
            warn!(column = field, "loyalty column missing, retention risk reported as 0");
            0.0
        }
    };
    let mut section = ReportSection::new();
    section.insert("retention_risk_rate", Metric::Value(Some(rate)));
    section
}

fn group_means<K: Ord>(groups: BTreeMap<K, Vec<Option<f64>>>) -> BTreeMap<K, Option<f64>> {
    groups
        .into_iter()
        .map(|(key, values)| (key, mean_present(&values).map(round2)))
        .collect()
}

fn missing(columns: &str) -> Metric {
    Metric::not_applicable(format!("Missing {columns} column for analysis."))
}

/// Mean individual AHS per semester, ascending.
pub fn semester_curve(data: &SurveyData<'_>) -> Metric {
    let Some(semesters) = data.i64_column(DEM_SEMESTER).filter(|_| data.has_happiness()) else {
        return missing("'dem_semester' or 'individual_ahs'");
    };
    let mut groups: BTreeMap<i64, Vec<Option<f64>>> = BTreeMap::new();
    for (semester, score) in semesters.iter().zip(data.individual_ahs()) {
        if let Some(semester) = semester {
            groups.entry(*semester).or_default().push(*score);
        }
    }
    group_means(groups)
        .into_iter()
        .map(|(semester, value)| (semester.to_string(), Metric::Value(value)))
        .collect::<MetricMap>()
        .into()
}

/// Mean individual AHS per GPA band. Every band is reported; empty bands are null.
pub fn gpa_band_happiness(data: &SurveyData<'_>) -> Metric {
    let Some(gpas) = data.f64_column(DEM_GPA).filter(|_| data.has_happiness()) else {
        return missing("'dem_gpa' or 'individual_ahs'");
    };
    let bands = &data.standards().gpa_bands;
    let mut groups: Vec<Vec<Option<f64>>> = vec![Vec::new(); bands.len()];
    for (gpa, score) in gpas.iter().zip(data.individual_ahs()) {
        let Some(gpa) = gpa else { continue };
        if let Some(idx) = bands.iter().position(|band| band.contains(*gpa)) {
            groups[idx].push(*score);
        }
    }
    bands
        .iter()
        .zip(groups)
        .map(|(band, values)| {
            (
                band.label.as_str(),
                Metric::Value(mean_present(&values).map(round2)),
            )
        })
        .collect::<MetricMap>()
        .into()
}

/// Mean of the reverse-coded worry item per residence type, keys sorted.
pub fn residence_stress(data: &SurveyData<'_>) -> Metric {
    let worry_field = data.standards().worry_field.as_str();
    let (Some(residences), Some(worry)) =
        (data.text_column(DEM_RESIDENCE), data.f64_column(worry_field))
    else {
        return missing(&format!("'dem_residence' or '{worry_field}'"));
    };
    let mut groups: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for (residence, value) in residences.into_iter().zip(worry) {
        if let Some(residence) = residence {
            groups.entry(residence).or_default().push(value);
        }
    }
    group_means(groups)
        .into_iter()
        .map(|(residence, value)| (residence, Metric::Value(value)))
        .collect::<MetricMap>()
        .into()
}

/// Mean individual AHS per study stage (freshman, junior, senior).
pub fn semester_stage_happiness(data: &SurveyData<'_>) -> Metric {
    let Some(semesters) = data.i64_column(DEM_SEMESTER).filter(|_| data.has_happiness()) else {
        return missing("'dem_semester' or 'individual_ahs'");
    };
    let standards = data.standards();
    let mut groups: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for (semester, score) in semesters.iter().zip(data.individual_ahs()) {
        let Some(stage) = semester.and_then(|semester| standards.semester_stage_for(semester))
        else {
            continue;
        };
        groups.entry(stage.label.as_str()).or_default().push(*score);
    }
    standards
        .semester_stages
        .iter()
        .map(|stage| {
            let mean = groups
                .get(stage.label.as_str())
                .and_then(|values| mean_present(values));
            (stage.label.as_str(), Metric::Value(mean.map(round2)))
        })
        .collect::<MetricMap>()
        .into()
}

pub fn cohort_section(data: &SurveyData<'_>) -> ReportSection {
    let mut section = ReportSection::new();
    section.insert("semester_happiness_curve", semester_curve(data));
    section.insert("gpa_happiness_correlation", gpa_band_happiness(data));
    section.insert("residence_stress_index", residence_stress(data));
    section.insert("semester_stage_happiness", semester_stage_happiness(data));
    section
}
