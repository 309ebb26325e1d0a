//! Chart data: distributions and breakdowns a dashboard plots directly.

use std::collections::BTreeMap;

use survey_ingest::StopWords;
use survey_model::schema::{DEM_GPA, DEM_MAJOR, DEM_SEMESTER, LIKERT_RANGE, is_factor_field};
use survey_model::{Factor, Metric, MetricMap, ReportSection};

use crate::aggregate::population_score;
use crate::dataset::SurveyData;
use crate::keywords::{CHART_KEYWORDS, Tokenizer, wish_keywords};

/// Count of each scale point 1..5 for every factor item, in column order.
pub fn likert_distribution(data: &SurveyData<'_>) -> MetricMap {
    let names: Vec<String> = data
        .frame()
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| is_factor_field(name))
        .collect();
    let mut distribution = MetricMap::new();
    for name in names {
        let Some(values) = data.i64_column(&name) else {
            continue;
        };
        let counts: MetricMap = LIKERT_RANGE
            .map(|level| {
                let count = values.iter().filter(|value| **value == Some(level)).count();
                (level.to_string(), Metric::Count(count as u64))
            })
            .collect();
        distribution.insert(name, counts.into());
    }
    distribution
}

/// Population factor scores per major, majors sorted.
pub fn factor_by_major(data: &SurveyData<'_>) -> Metric {
    let Some(majors) = data.text_column(DEM_MAJOR) else {
        return Metric::not_applicable("Missing 'dem_major' column for analysis.");
    };
    let mut rows_by_major: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, major) in majors.into_iter().enumerate() {
        if let Some(major) = major {
            rows_by_major.entry(major).or_default().push(idx);
        }
    }
    let factors: Vec<Factor> = std::iter::once(Factor::Happiness)
        .chain(Factor::PREDICTORS)
        .collect();
    rows_by_major
        .into_iter()
        .map(|(major, rows)| {
            let scores: MetricMap = factors
                .iter()
                .map(|&factor| {
                    let value = data.factor_scores(factor).and_then(|scores| {
                        let subset: Vec<Option<f64>> = rows.iter().map(|&idx| scores[idx]).collect();
                        population_score(&subset)
                    });
                    (factor.score_label(), Metric::Value(value))
                })
                .collect();
            (major, Metric::from(scores))
        })
        .collect::<MetricMap>()
        .into()
}

/// Respondents per semester, ascending.
pub fn semester_distribution(data: &SurveyData<'_>) -> Metric {
    let Some(semesters) = data.i64_column(DEM_SEMESTER) else {
        return Metric::not_applicable("Missing 'dem_semester' column for analysis.");
    };
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
    for semester in semesters.into_iter().flatten() {
        *counts.entry(semester).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(semester, count)| (semester.to_string(), Metric::Count(count)))
        .collect::<MetricMap>()
        .into()
}

/// Respondents per GPA band; every band is listed.
pub fn gpa_distribution(data: &SurveyData<'_>) -> Metric {
    let Some(gpas) = data.f64_column(DEM_GPA) else {
        return Metric::not_applicable("Missing 'dem_gpa' column for analysis.");
    };
    data.standards()
        .gpa_bands
        .iter()
        .map(|band| {
            let count = gpas
                .iter()
                .flatten()
                .filter(|gpa| band.contains(**gpa))
                .count();
            (band.label.as_str(), Metric::Count(count as u64))
        })
        .collect::<MetricMap>()
        .into()
}

pub fn chart_section(
    data: &SurveyData<'_>,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWords,
) -> ReportSection {
    let mut section = ReportSection::new();
    section.insert("likert_distribution", likert_distribution(data).into());
    section.insert("factor_by_major", factor_by_major(data));
    section.insert("semester_distribution", semester_distribution(data));
    section.insert("gpa_distribution", gpa_distribution(data));
    section.insert(
        "wish_word_counts",
        wish_keywords(data, tokenizer, stop_words, CHART_KEYWORDS).into(),
    );
    section
}
