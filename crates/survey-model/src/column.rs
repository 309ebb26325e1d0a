//! Column classification.
//!
//! The raw export carries no type schema, so every text column is profiled
//! once and tagged with a [`ColumnKind`]. Later stages consult the tag instead
//! of re-scanning values.

use serde::{Deserialize, Serialize};

/// Share of non-null values that must be recognized agreement labels for a
/// text column to be treated as a Likert item.
pub const LIKERT_DETECTION_THRESHOLD: f64 = 0.8;

/// Upper bound on distinct values for a text column to count as categorical.
pub const CATEGORICAL_MAX_DISTINCT: usize = 20;

/// Upper bound on distinct/non-null ratio for a text column to count as categorical.
pub const CATEGORICAL_MAX_UNIQUE_RATIO: f64 = 0.5;

/// How a column's values should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Agreement labels to be encoded as 1..5.
    Likert,
    /// A small closed set of text values (major, residence).
    Categorical,
    /// Open-ended text (wishes).
    FreeText,
    /// Every non-null value already parses as a number.
    Numeric,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Likert => "likert",
            Self::Categorical => "categorical",
            Self::FreeText => "free_text",
            Self::Numeric => "numeric",
        }
    }
}

/// Value counts gathered from one column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnProfile {
    pub total: usize,
    pub non_null: usize,
    pub numeric: usize,
    pub likert: usize,
    pub distinct: usize,
}

impl ColumnProfile {
    pub fn likert_ratio(&self) -> f64 {
        if self.non_null == 0 {
            0.0
        } else {
            self.likert as f64 / self.non_null as f64
        }
    }

    pub fn unique_ratio(&self) -> f64 {
        if self.non_null == 0 {
            0.0
        } else {
            self.distinct as f64 / self.non_null as f64
        }
    }

    /// Tag the column. An all-null column is free text: nothing justifies
    /// encoding it.
    pub fn classify(&self) -> ColumnKind {
        if self.non_null == 0 {
            return ColumnKind::FreeText;
        }
        if self.numeric == self.non_null {
            return ColumnKind::Numeric;
        }
        if self.likert_ratio() >= LIKERT_DETECTION_THRESHOLD {
            return ColumnKind::Likert;
        }
        if self.distinct <= CATEGORICAL_MAX_DISTINCT
            && self.unique_ratio() <= CATEGORICAL_MAX_UNIQUE_RATIO
        {
            return ColumnKind::Categorical;
        }
        ColumnKind::FreeText
    }
}
