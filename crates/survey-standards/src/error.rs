#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML standards {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate canonical column in mapping: {canonical}")]
    DuplicateTarget { canonical: String },

    #[error("invalid Likert level {label:?}: code {code} is outside 1..5")]
    InvalidLikertCode { label: String, code: i64 },

    #[error("invalid GPA band {label:?}: {message}")]
    InvalidGpaBand { label: String, message: String },

    #[error("invalid standards: {message}")]
    Invalid { message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
