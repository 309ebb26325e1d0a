pub mod csv_table;
pub mod error;
pub mod polars_utils;
pub mod stopwords;

pub use csv_table::{CsvTable, normalize_cell, normalize_header, read_csv_table};
pub use error::IngestError;
pub use polars_utils::{
    any_to_f64, any_to_i64, any_to_string, column_f64_values, column_i64_values,
    column_string_values, format_numeric, parse_f64, parse_i64,
};
pub use stopwords::{StopWords, load_stop_words};
