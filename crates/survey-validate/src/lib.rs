//! Canonical dataset conformance checks.
//!
//! Findings never stop the run: a missing column only degrades the metrics
//! that read it. The checks exist so the run summary can say why.
//!
//! | Code   | Severity | Finding                                   |
//! |--------|----------|-------------------------------------------|
//! | SV0001 | warning  | expected canonical column missing         |
//! | SV0002 | error    | no happiness items, AHS cannot be computed |
//! | SV0003 | warning  | factor item is not numeric                |
//! | SV0004 | error    | factor value outside 1..5                 |
//! | SV0005 | error    | semester outside 1..9 or missing          |
//! | SV0006 | error    | GPA outside 0..10                         |
//! | SV0007 | error    | duplicate rows                            |

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, info};

use survey_ingest::{any_to_f64, any_to_i64, any_to_string};
use survey_model::schema::{DEM_GPA, DEM_SEMESTER, GPA_RANGE, LIKERT_RANGE, SEMESTER_RANGE};
use survey_model::{ConformanceIssue, ConformanceReport, Factor, IssueSeverity, schema};
use survey_standards::SurveyStandards;

fn issue(
    code: &str,
    severity: IssueSeverity,
    column: Option<&str>,
    count: Option<u64>,
    message: String,
) -> ConformanceIssue {
    ConformanceIssue {
        code: code.to_string(),
        message,
        severity,
        column: column.map(str::to_string),
        count,
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Canonical columns the analysis expects after cleaning: every mapping
/// target except the identity and attention-check columns.
pub fn expected_columns(standards: &SurveyStandards) -> Vec<String> {
    standards
        .column_mapping
        .iter()
        .map(|entry| entry.canonical.clone())
        .filter(|name| !standards.pii_columns.contains(name))
        .filter(|name| *name != standards.attention.column)
        .collect()
}

fn check_expected_columns(
    df: &DataFrame,
    standards: &SurveyStandards,
    issues: &mut Vec<ConformanceIssue>,
) {
    let present: BTreeSet<String> = column_names(df).into_iter().collect();
    for name in expected_columns(standards) {
        if !present.contains(&name) {
            issues.push(issue(
                "SV0001",
                IssueSeverity::Warning,
                Some(&name),
                None,
                format!("expected column {name} is missing"),
            ));
        }
    }
    let prefix = Factor::Happiness.prefix();
    if !present.iter().any(|name| name.starts_with(prefix)) {
        issues.push(issue(
            "SV0002",
            IssueSeverity::Error,
            None,
            None,
            format!("no {prefix}* items, happiness scores are unavailable"),
        ));
    }
}

fn check_factor_values(df: &DataFrame, issues: &mut Vec<ConformanceIssue>) {
    for name in column_names(df) {
        if !schema::is_factor_field(&name) {
            continue;
        }
        let Ok(column) = df.column(&name) else {
            continue;
        };
        let mut non_numeric = 0u64;
        let mut out_of_range = 0u64;
        for idx in 0..df.height() {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            if matches!(value, AnyValue::Null) {
                continue;
            }
            match any_to_i64(value.clone()) {
                Some(code) if LIKERT_RANGE.contains(&code) => {}
                Some(_) => out_of_range += 1,
                None if any_to_string(value).trim().is_empty() => {}
                None => non_numeric += 1,
            }
        }
        if non_numeric > 0 {
            issues.push(issue(
                "SV0003",
                IssueSeverity::Warning,
                Some(&name),
                Some(non_numeric),
                format!("{name} has {non_numeric} non-numeric values"),
            ));
        }
        if out_of_range > 0 {
            issues.push(issue(
                "SV0004",
                IssueSeverity::Error,
                Some(&name),
                Some(out_of_range),
                format!("{name} has {out_of_range} values outside 1..5"),
            ));
        }
    }
}

fn check_semester(df: &DataFrame, issues: &mut Vec<ConformanceIssue>) {
    let Ok(column) = df.column(DEM_SEMESTER) else {
        return;
    };
    let invalid = (0..df.height())
        .filter(|&idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            !any_to_i64(value).is_some_and(|semester| SEMESTER_RANGE.contains(&semester))
        })
        .count() as u64;
    if invalid > 0 {
        issues.push(issue(
            "SV0005",
            IssueSeverity::Error,
            Some(DEM_SEMESTER),
            Some(invalid),
            format!("{invalid} rows have a semester outside 1..9"),
        ));
    }
}

fn check_gpa(df: &DataFrame, issues: &mut Vec<ConformanceIssue>) {
    let Ok(column) = df.column(DEM_GPA) else {
        return;
    };
    let invalid = (0..df.height())
        .filter_map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .filter(|gpa| !GPA_RANGE.contains(gpa))
        .count() as u64;
    if invalid > 0 {
        issues.push(issue(
            "SV0006",
            IssueSeverity::Error,
            Some(DEM_GPA),
            Some(invalid),
            format!("{invalid} rows have a GPA outside 0..10"),
        ));
    }
}

fn check_duplicates(df: &DataFrame, issues: &mut Vec<ConformanceIssue>) {
    let columns: Vec<_> = df.get_columns().iter().collect();
    if columns.is_empty() {
        return;
    }
    let mut seen = BTreeSet::new();
    let mut duplicates = 0u64;
    for idx in 0..df.height() {
        let key: Vec<Option<String>> = columns
            .iter()
            .map(|column| match column.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            })
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        issues.push(issue(
            "SV0007",
            IssueSeverity::Error,
            None,
            Some(duplicates),
            format!("{duplicates} rows duplicate an earlier row"),
        ));
    }
}

/// Check the canonical dataset against the invariants the analysis relies on.
pub fn validate_canonical(
    dataset: &str,
    df: &DataFrame,
    standards: &SurveyStandards,
) -> ConformanceReport {
    let mut report = ConformanceReport::new(dataset);
    check_expected_columns(df, standards, &mut report.issues);
    check_factor_values(df, &mut report.issues);
    check_semester(df, &mut report.issues);
    check_gpa(df, &mut report.issues);
    check_duplicates(df, &mut report.issues);
    for finding in &report.issues {
        debug!(code = %finding.code, message = %finding.message, "conformance finding");
    }
    info!(
        dataset,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "conformance check complete"
    );
    report
}
