//! Survey ETL.
//!
//! - **cleaner**: identity columns, attention gate, semester, duplicates
//! - **coerce**: timestamps to ISO-8601, GPA to float
//! - **likert**: column classification and agreement-label encoding
//! - **reverse**: reverse coding of negatively worded items
//! - **pipeline**: typed stages from raw export to canonical dataset

pub mod cleaner;
pub mod coerce;
mod frame;
pub mod likert;
pub mod pipeline;
pub mod reverse;

pub use cleaner::{CleanSummary, clean_responses, drop_duplicate_rows, extract_semester};
pub use coerce::{CoerceSummary, ISO_TIMESTAMP_FORMAT, parse_gpa, parse_timestamp};
pub use frame::{column_names, has_column};
pub use likert::{LikertSummary, classify_columns, encode_likert_columns};
pub use pipeline::{
    CanonicalFrame, CleanFrame, EncodedFrame, EtlOutput, EtlPipeline, EtlSummary, MappedFrame,
    process_survey,
};
pub use reverse::{ReverseSummary, reverse_score};
