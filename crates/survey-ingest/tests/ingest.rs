use std::fs;

use survey_ingest::{column_string_values, load_stop_words, read_csv_table};

#[test]
fn reads_export_with_bom_and_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(
        &path,
        "\u{feff}Dấu thời gian,Bạn  đang học ở kỳ:,Wish\n\
         2024/03/01 9:15:00 SA GMT+7,Kỳ 3,\" thêm cây xanh \"\n\
         ,,\n\
         2024/03/02 1:00:00 CH GMT+7,5\n",
    )
    .unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["Dấu thời gian", "Bạn đang học ở kỳ:", "Wish"]
    );
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0][2], "thêm cây xanh");
    assert_eq!(table.rows[1], vec!["2024/03/02 1:00:00 CH GMT+7", "5", ""]);

    let df = table.to_dataframe().unwrap();
    assert_eq!(df.width(), 3);
    let wishes = column_string_values(&df, "Wish").unwrap();
    assert_eq!(wishes, vec![Some("thêm cây xanh".to_string()), None]);
}

#[test]
fn empty_file_yields_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert!(table.headers.is_empty());
    assert_eq!(table.to_dataframe().unwrap().height(), 0);
}

#[test]
fn missing_csv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_csv_table(&dir.path().join("absent.csv")).is_err());
}

#[test]
fn missing_stop_word_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let words = load_stop_words(&dir.path().join("absent.txt")).unwrap();
    assert!(words.is_empty());
}

#[test]
fn stop_word_file_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    fs::write(&path, "# fillers\nvà\nmình\n").unwrap();
    let words = load_stop_words(&path).unwrap();
    assert_eq!(words.len(), 2);
    assert!(words.contains("mình"));
}
