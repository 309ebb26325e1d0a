use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use survey_analysis::{SurveyAnalyzer, UnicodeWordTokenizer, extract_keywords};
use survey_ingest::StopWords;
use survey_model::Metric;
use survey_standards::SurveyStandards;

fn int(name: &str, values: &[i64]) -> Column {
    Series::new(name.into(), values.to_vec()).into_column()
}

fn canonical_frame() -> DataFrame {
    let columns = vec![
        Series::new(
            "dem_major".into(),
            vec!["IT", "IT", "Marketing", "Marketing", "IT", "Design"],
        )
        .into_column(),
        int("dem_semester", &[1, 2, 4, 4, 7, 2]),
        Series::new(
            "dem_gpa".into(),
            vec![Some(6.4), Some(6.5), Some(8.0), Some(4.0), Some(9.1), None],
        )
        .into_column(),
        Series::new(
            "dem_residence".into(),
            vec!["Ở trọ", "Ở trọ", "Gia đình", "Ký túc xá", "Gia đình", "Ở trọ"],
        )
        .into_column(),
        int("hap_general_satisfaction", &[5, 4, 3, 2, 4, 3]),
        int("hap_loyalty_choice", &[4, 4, 3, 2, 3, 2]),
        int("aca_curriculum_fit", &[4, 4, 3, 2, 4, 3]),
        int("aca_deadline_pressure", &[2, 3, 3, 1, 2, 2]),
        int("env_facilities", &[3, 3, 3, 3, 3, 3]),
        int("soc_friendship_support", &[5, 4, 2, 1, 4, 3]),
        int("fin_tuition_value", &[3, 4, 2, 2, 3, 3]),
        int("fin_living_cost_worry", &[2, 3, 4, 1, 5, 2]),
        Series::new(
            "wish".into(),
            vec![
                Some("thêm cây xanh"),
                None,
                Some("wifi mạnh hơn"),
                Some("thêm wifi"),
                Some(""),
                Some("giảm deadline"),
            ],
        )
        .into_column(),
    ];
    DataFrame::new(columns).unwrap()
}

fn analyzer(standards: &SurveyStandards) -> SurveyAnalyzer<'_> {
    SurveyAnalyzer::new(standards).with_stop_words(StopWords::vietnamese_defaults())
}

#[test]
fn summary_report_snapshot() {
    let standards = SurveyStandards::builtin();
    let report = analyzer(&standards).analyze_frame(&canonical_frame());
    let json = serde_json::to_string_pretty(&report).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "respondent_count": 6,
      "ahs_overall": 3.25,
      "factor_scores": {
        "Academic (X1)": 2.75,
        "Environment (X2)": 3.0,
        "Social (X3)": 3.17,
        "Finance (X4)": 2.83
      },
      "nhs_percentage": 16.67,
      "semester_happiness_curve": {
        "1": 4.5,
        "2": 3.25,
        "4": 2.5,
        "7": 3.5
      },
      "gpa_happiness_correlation": {
        "<5.0": 2.0,
        "5.0-6.5": 4.5,
        "6.5-8.0": 4.0,
        ">8.0": 3.25
      },
      "residence_stress_index": {
        "Gia đình": 4.5,
        "Ký túc xá": 1.0,
        "Ở trọ": 2.33
      },
      "semester_stage_happiness": {
        "freshman": 3.67,
        "junior": 2.5,
        "senior": 3.5
      },
      "correlations": {
        "Academic": 0.81,
        "Social": 0.91,
        "Finance": 0.64
      },
      "top_correlated_factor": "Social",
      "retention_risk_rate": 33.33,
      "wish_analysis": {
        "thêm": 2,
        "wifi": 2,
        "cây": 1,
        "xanh": 1,
        "mạnh": 1
      }
    }
    "#);
}

#[test]
fn gpa_band_edges_are_left_closed() {
    let standards = SurveyStandards::builtin();
    let columns = vec![
        Series::new("dem_gpa".into(), vec![6.4, 6.5]).into_column(),
        int("hap_general_satisfaction", &[2, 5]),
    ];
    let df = DataFrame::new(columns).unwrap();
    let report = analyzer(&standards).analyze_frame(&df);
    let bands = report.map("gpa_happiness_correlation").unwrap();
    assert_eq!(bands.get("5.0-6.5"), Some(&Metric::Value(Some(2.0))));
    assert_eq!(bands.get("6.5-8.0"), Some(&Metric::Value(Some(5.0))));
    assert_eq!(bands.get("<5.0"), Some(&Metric::Value(None)));
    assert_eq!(bands.get(">8.0"), Some(&Metric::Value(None)));
}

#[test]
fn empty_dataset_reports_empty_metrics() {
    let standards = SurveyStandards::builtin();
    let df = canonical_frame().head(Some(0));
    let report = analyzer(&standards).analyze_frame(&df);

    assert_eq!(report.get("respondent_count"), Some(&Metric::Count(0)));
    assert_eq!(report.get("ahs_overall"), Some(&Metric::Value(None)));
    assert_eq!(report.get("nhs_percentage"), Some(&Metric::Value(None)));
    assert_eq!(report.value("retention_risk_rate"), Some(0.0));
    assert!(report.map("correlations").unwrap().is_empty());
    assert!(report.get("top_correlated_factor").is_none());
    assert!(report.map("semester_happiness_curve").unwrap().is_empty());
    assert!(report.map("wish_analysis").unwrap().is_empty());
    let bands = report.map("gpa_happiness_correlation").unwrap();
    assert_eq!(bands.len(), 4);
    assert!(bands.iter().all(|(_, metric)| *metric == Metric::Value(None)));
}

#[test]
fn missing_columns_degrade_only_their_metrics() {
    let standards = SurveyStandards::builtin();
    let mut df = canonical_frame();
    df.drop_in_place("dem_residence").unwrap();
    df.drop_in_place("hap_loyalty_choice").unwrap();
    let report = analyzer(&standards).analyze_frame(&df);

    assert!(
        report
            .get("residence_stress_index")
            .is_some_and(Metric::is_not_applicable)
    );
    assert_eq!(report.value("retention_risk_rate"), Some(0.0));
    assert!(report.value("ahs_overall").is_some());
    assert!(report.map("semester_happiness_curve").is_some());
}

#[test]
fn without_happiness_items_placeholders_are_reported() {
    let standards = SurveyStandards::builtin();
    let df = DataFrame::new(vec![int("dem_semester", &[1, 2]), int("aca_fit", &[3, 4])]).unwrap();
    let report = analyzer(&standards).analyze_frame(&df);
    assert!(report.get("ahs_overall").is_some_and(Metric::is_not_applicable));
    assert!(report.get("nhs_percentage").is_some_and(Metric::is_not_applicable));
    assert!(
        report
            .get("semester_happiness_curve")
            .is_some_and(Metric::is_not_applicable)
    );
    assert!(report.map("correlations").unwrap().is_empty());
}

#[test]
fn factor_groups_without_items_are_left_out_of_correlations() {
    let standards = SurveyStandards::builtin();
    let df = DataFrame::new(vec![
        int("hap_general_satisfaction", &[5, 4, 3, 2, 4]),
        int("hap_loyalty_choice", &[4, 4, 2, 2, 3]),
        int("aca_curriculum_fit", &[4, 3, 3, 1, 4]),
        int("fin_tuition_value", &[2, 4, 3, 3, 5]),
    ])
    .unwrap();
    let report = analyzer(&standards).analyze_frame(&df);

    let correlations = report.map("correlations").unwrap();
    assert_eq!(correlations.keys().collect::<Vec<_>>(), vec!["Academic", "Finance"]);
    assert_eq!(correlations.get("Academic"), Some(&Metric::Value(Some(0.79))));
    assert_eq!(correlations.get("Finance"), Some(&Metric::Value(Some(-0.02))));
    assert_eq!(
        report.get("top_correlated_factor").and_then(Metric::as_text),
        Some("Academic")
    );
    let factors = report.map("factor_scores").unwrap();
    assert_eq!(factors.get("Social (X3)"), Some(&Metric::Value(None)));
    assert_eq!(factors.get("Environment (X2)"), Some(&Metric::Value(None)));
}

#[test]
fn keyword_counts_equal_literal_occurrences() {
    let wishes = ["học bổng học bổng", "học phí", "và học"];
    let keywords = extract_keywords(
        &wishes,
        &UnicodeWordTokenizer,
        &StopWords::vietnamese_defaults(),
        20,
    );
    assert_eq!(
        keywords,
        vec![
            ("học".to_string(), 4),
            ("bổng".to_string(), 2),
            ("phí".to_string(), 1),
        ]
    );
}

#[test]
fn chart_data_breaks_down_by_major_and_level() {
    let standards = SurveyStandards::builtin();
    let frame = survey_transform::CanonicalFrame::from_processed(canonical_frame(), &standards)
        .unwrap();
    let charts = analyzer(&standards)
        .with_source_sha256("abc123")
        .chart_data(&frame);

    let keys: Vec<&str> = charts.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            "source_sha256",
            "respondent_count",
            "likert_distribution",
            "factor_by_major",
            "semester_distribution",
            "gpa_distribution",
            "wish_word_counts",
        ]
    );

    let distribution = charts.map("likert_distribution").unwrap();
    let satisfaction = distribution
        .get("hap_general_satisfaction")
        .and_then(Metric::as_map)
        .unwrap();
    let counts: Vec<u64> = satisfaction
        .iter()
        .filter_map(|(_, metric)| metric.as_count())
        .collect();
    assert_eq!(counts, vec![0, 1, 2, 2, 1]);

    let by_major = charts.map("factor_by_major").unwrap();
    assert_eq!(by_major.keys().collect::<Vec<_>>(), vec!["Design", "IT", "Marketing"]);
    let it = by_major.get("IT").and_then(Metric::as_map).unwrap();
    assert_eq!(it.get("Happiness (Y)"), Some(&Metric::Value(Some(4.0))));

    let gpa = charts.map("gpa_distribution").unwrap();
    assert_eq!(gpa.get(">8.0"), Some(&Metric::Count(2)));
    assert_eq!(charts.map("wish_word_counts").unwrap().len(), 7);
}
