use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("column {column} is not numeric")]
    NotNumeric { column: String },
    #[error("frame error: {0}")]
    Frame(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
