use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use survey_ingest::read_csv_table;
use survey_model::{Metric, MetricMap, ReportBuilder, ReportSection};
use survey_report::{
    CHART_DATA_JSON, PROCESSED_CSV, REPORT_JSON, UTF8_BOM, write_canonical_csv,
    write_report_json, write_run_outputs,
};

fn canonical() -> DataFrame {
    DataFrame::new(vec![
        Series::new("dem_semester".into(), vec![Some(3i64), Some(5)]).into_column(),
        Series::new("dem_gpa".into(), vec![Some(7.5), Some(6.0)]).into_column(),
        Series::new("wish".into(), vec![Some("thêm cây, xanh"), None]).into_column(),
    ])
    .unwrap()
}

fn report() -> survey_model::Report {
    let mut section = ReportSection::new();
    section.insert("respondent_count", Metric::Count(2));
    section.insert("ahs_overall", Metric::Value(Some(3.25)));
    section.insert("nhs_percentage", Metric::Value(None));
    section.insert(
        "residence_stress_index",
        Metric::not_applicable("Missing 'dem_residence' or 'fin_living_cost_worry' column for analysis."),
    );
    let mut curve = MetricMap::new();
    curve.insert("1", Metric::Value(Some(4.5)));
    section.insert("semester_happiness_curve", curve.into());
    ReportBuilder::new().merge(section).build()
}

#[test]
fn canonical_csv_starts_with_bom_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("processed.csv");
    write_canonical_csv(&path, &canonical()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("dem_semester,dem_gpa,wish"));
    assert_eq!(lines.next(), Some("3,7.5,\"thêm cây, xanh\""));
    assert_eq!(lines.next(), Some("5,6,"));

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["dem_semester", "dem_gpa", "wish"]);
    assert_eq!(table.rows[0][2], "thêm cây, xanh");
}

#[test]
fn report_json_keeps_key_order_and_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report_json(&path, &report()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let keys: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("  \""))
        .filter_map(|line| line.trim().split('"').nth(1))
        .collect();
    assert_eq!(
        keys,
        vec![
            "respondent_count",
            "ahs_overall",
            "nhs_percentage",
            "residence_stress_index",
            "semester_happiness_curve",
        ]
    );
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["nhs_percentage"].is_null());
    assert_eq!(value["ahs_overall"], 3.25);
    assert!(value["residence_stress_index"].is_string());
    assert_eq!(value["semester_happiness_curve"]["1"], 4.5);
}

#[test]
fn run_outputs_land_in_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let outputs = write_run_outputs(&out, &canonical(), &report(), &report()).unwrap();
    assert_eq!(outputs.processed, out.join(PROCESSED_CSV));
    assert_eq!(outputs.report, out.join(REPORT_JSON));
    assert_eq!(outputs.chart_data, out.join(CHART_DATA_JSON));
    for path in [&outputs.processed, &outputs.report, &outputs.chart_data] {
        assert!(path.is_file(), "{} missing", path.display());
    }
}
