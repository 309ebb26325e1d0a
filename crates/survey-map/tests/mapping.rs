use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use survey_map::{ColumnMapper, apply_column_mapping};
use survey_standards::SurveyStandards;

fn frame(headers: &[&str]) -> DataFrame {
    let columns: Vec<Column> = headers
        .iter()
        .map(|name| Series::new((*name).into(), vec!["x", "y"]).into_column())
        .collect();
    DataFrame::new(columns).unwrap()
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn known_headers_are_renamed_and_unknown_pass_through() {
    let mut df = frame(&[
        "Dấu thời gian",
        "Bạn đang học ở kỳ:",
        "Ghi chú của người nhập liệu",
    ]);
    let summary = apply_column_mapping(&mut df, &SurveyStandards::builtin()).unwrap();

    assert_eq!(
        names(&df),
        vec!["timestamp", "dem_semester", "Ghi chú của người nhập liệu"]
    );
    assert_eq!(summary.renamed_count(), 2);
    assert_eq!(summary.canonical_for("Bạn đang học ở kỳ:"), Some("dem_semester"));
    assert_eq!(summary.passed_through, vec!["Ghi chú của người nhập liệu"]);
    assert_eq!(df.height(), 2);
}

#[test]
fn header_matching_ignores_whitespace_runs() {
    let mapper = ColumnMapper::new(&SurveyStandards::builtin());
    assert_eq!(
        mapper.canonical_for("  GPA   hiện tại của bạn: "),
        Some("dem_gpa")
    );
}

#[test]
fn collision_with_existing_canonical_column_keeps_header() {
    let mut df = frame(&["dem_gpa", "GPA hiện tại của bạn:"]);
    let summary = apply_column_mapping(&mut df, &SurveyStandards::builtin()).unwrap();

    assert_eq!(names(&df), vec!["dem_gpa", "GPA hiện tại của bạn:"]);
    assert_eq!(summary.renamed_count(), 0);
    assert_eq!(summary.passed_through.len(), 2);
}
