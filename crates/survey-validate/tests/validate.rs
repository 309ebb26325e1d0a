use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use survey_model::IssueSeverity;
use survey_standards::{ColumnMapping, SurveyStandards};
use survey_validate::{expected_columns, validate_canonical};

fn small_standards() -> SurveyStandards {
    let mut standards = SurveyStandards::builtin();
    standards.column_mapping = ["dem_semester", "dem_gpa", "dem_residence"]
        .into_iter()
        .map(|canonical| ColumnMapping {
            raw: format!("raw {canonical}"),
            canonical: canonical.to_string(),
        })
        .collect();
    standards
}

fn broken_frame() -> DataFrame {
    let columns: Vec<Column> = vec![
        Series::new("hap_general_satisfaction".into(), vec![Some(4i64), Some(7)]).into_column(),
        Series::new("aca_fit".into(), vec!["x", "3"]).into_column(),
        Series::new("dem_semester".into(), vec![3i64, 12]).into_column(),
        Series::new("dem_gpa".into(), vec![6.5f64, 11.0]).into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

#[test]
fn identity_and_attention_columns_are_not_expected() {
    let expected = expected_columns(&SurveyStandards::builtin());
    assert!(!expected.iter().any(|name| name == "email"));
    assert!(!expected.iter().any(|name| name == "attention_check"));
    assert!(expected.iter().any(|name| name == "hap_loyalty_choice"));
    assert_eq!(expected.len(), 23);
}

#[test]
fn broken_dataset_findings_snapshot() {
    let report = validate_canonical("processed", &broken_frame(), &small_standards());
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.warning_count(), 2);
    insta::assert_json_snapshot!(report.issues, @r#"
    [
      {
        "code": "SV0001",
        "message": "expected column dem_residence is missing",
        "severity": "warning",
        "column": "dem_residence",
        "count": null
      },
      {
        "code": "SV0004",
        "message": "hap_general_satisfaction has 1 values outside 1..5",
        "severity": "error",
        "column": "hap_general_satisfaction",
        "count": 1
      },
      {
        "code": "SV0003",
        "message": "aca_fit has 1 non-numeric values",
        "severity": "warning",
        "column": "aca_fit",
        "count": 1
      },
      {
        "code": "SV0005",
        "message": "1 rows have a semester outside 1..9",
        "severity": "error",
        "column": "dem_semester",
        "count": 1
      },
      {
        "code": "SV0006",
        "message": "1 rows have a GPA outside 0..10",
        "severity": "error",
        "column": "dem_gpa",
        "count": 1
      }
    ]
    "#);
}

#[test]
fn duplicates_and_missing_happiness_are_errors() {
    let columns: Vec<Column> = vec![
        Series::new("dem_semester".into(), vec![3i64, 3]).into_column(),
        Series::new("dem_gpa".into(), vec![6.5f64, 6.5]).into_column(),
        Series::new("dem_residence".into(), vec!["Ở trọ", "Ở trọ"]).into_column(),
    ];
    let df = DataFrame::new(columns).unwrap();
    let report = validate_canonical("processed", &df, &small_standards());
    let codes: Vec<&str> = report.issues.iter().map(|issue| issue.code.as_str()).collect();
    assert_eq!(codes, vec!["SV0002", "SV0007"]);
    assert!(
        report
            .issues
            .iter()
            .all(|issue| issue.severity == IssueSeverity::Error)
    );
}
