#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loader;
pub mod standards;

pub use crate::error::StandardsError;
pub use crate::loader::{load_standards, resolve_standards};
pub use crate::standards::{
    AttentionCheck, ColumnMapping, GpaBand, GpaLabel, LikertLevel, SemesterStage, SurveyStandards,
    normalize_label,
};
