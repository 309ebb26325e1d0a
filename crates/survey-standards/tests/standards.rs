use std::fs;

use survey_standards::hash::{sha256_file, sha256_hex};
use survey_standards::{StandardsError, SurveyStandards, load_standards, resolve_standards};

#[test]
fn toml_overrides_only_the_fields_it_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("standards.toml");
    fs::write(
        &path,
        r#"
reverse_coded = ["aca_deadline_pressure"]

[attention]
column = "attention_check"
expected = "Đồng ý"
"#,
    )
    .unwrap();

    let standards = load_standards(&path).unwrap();
    let builtin = SurveyStandards::builtin();
    assert_eq!(standards.reverse_coded, vec!["aca_deadline_pressure"]);
    assert_eq!(standards.attention.expected, "Đồng ý");
    assert_eq!(standards.column_mapping, builtin.column_mapping);
    assert_eq!(standards.gpa_bands, builtin.gpa_bands);
}

#[test]
fn descending_gpa_bands_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("standards.toml");
    fs::write(
        &path,
        r#"
[[gpa_bands]]
label = "high"
lower = 8.0
upper = 10.0
closed_upper = true

[[gpa_bands]]
label = "low"
lower = 0.0
upper = 8.0
"#,
    )
    .unwrap();

    let err = load_standards(&path).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidGpaBand { .. }));
}

#[test]
fn malformed_toml_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "reverse_coded = [").unwrap();

    let err = load_standards(&path).unwrap_err();
    assert!(matches!(err, StandardsError::Toml { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn explicit_path_wins_over_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("standards.toml");
    fs::write(&path, "pii_columns = [\"email\"]\n").unwrap();

    let standards = resolve_standards(Some(&path)).unwrap();
    assert_eq!(standards.pii_columns, vec!["email"]);
}

#[test]
fn file_digest_matches_byte_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, b"a,b\n1,2\n").unwrap();

    assert_eq!(sha256_file(&path).unwrap(), sha256_hex(b"a,b\n1,2\n"));
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn builtin_likert_and_bands_snapshot() {
    let standards = SurveyStandards::builtin();
    let summary: Vec<String> = standards
        .likert_scale
        .iter()
        .map(|level| format!("{} => {}", level.label, level.code))
        .chain(standards.gpa_bands.iter().map(|band| {
            format!(
                "{}: [{}, {}{}",
                band.label,
                band.lower,
                band.upper,
                if band.closed_upper { "]" } else { ")" }
            )
        }))
        .collect();
    insta::assert_snapshot!(summary.join("\n"), @r"
    Hoàn toàn không đồng ý => 1
    Không đồng ý => 2
    Trung lập => 3
    Đồng ý => 4
    Hoàn toàn đồng ý => 5
    <5.0: [0, 5)
    5.0-6.5: [5, 6.5)
    6.5-8.0: [6.5, 8)
    >8.0: [8, 10]
    ");
}
