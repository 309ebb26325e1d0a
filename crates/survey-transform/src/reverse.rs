//! Reverse Coder.
//!
//! Negatively worded items are flipped with `s -> 6 - s` so that every factor
//! item reads "higher is more positive". The flip is only reachable through
//! [`EncodedFrame::reverse_code`](crate::pipeline::EncodedFrame::reverse_code),
//! which consumes the encoded frame.

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use survey_ingest::column_i64_values;
use survey_model::Result;

use crate::frame::{is_numeric_column, set_i64_column};

/// Flip one score on the 1..5 scale.
pub fn reverse_score(score: i64) -> i64 {
    6 - score
}

/// Columns flipped and columns skipped by the reverse coder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseSummary {
    pub reversed: Vec<String>,
    pub skipped: Vec<String>,
}

pub(crate) fn reverse_code_columns(df: &mut DataFrame, columns: &[String]) -> Result<ReverseSummary> {
    let mut summary = ReverseSummary::default();
    for name in columns {
        if !is_numeric_column(df, name) {
            warn!(column = %name, "reverse-coded item missing or not numeric, skipped");
            summary.skipped.push(name.clone());
            continue;
        }
        let Some(values) = column_i64_values(df, name) else {
            summary.skipped.push(name.clone());
            continue;
        };
        let flipped: Vec<Option<i64>> = values
            .into_iter()
            .map(|value| value.map(reverse_score))
            .collect();
        set_i64_column(df, name, flipped)?;
        debug!(column = %name, "reverse coded");
        summary.reversed.push(name.clone());
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strongly_agree_becomes_strongly_disagree() {
        assert_eq!(reverse_score(5), 1);
        assert_eq!(reverse_score(3), 3);
        assert_eq!(reverse_score(1), 5);
    }

    proptest! {
        #[test]
        fn reversing_twice_is_identity(score in 1i64..=5) {
            prop_assert_eq!(reverse_score(reverse_score(score)), score);
            prop_assert!((1..=5).contains(&reverse_score(score)));
        }
    }
}
