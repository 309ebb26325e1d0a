//! Schema Mapper.
//!
//! Renames raw question headers to canonical field ids using the mapping table
//! from [`SurveyStandards`]. Unknown headers pass through untouched; row and
//! column counts never change.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use survey_ingest::normalize_header;
use survey_model::{MappingSummary, Result, SurveyError};
use survey_standards::SurveyStandards;

/// Lookup from whitespace-normalized raw header to canonical id.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    table: BTreeMap<String, String>,
}

impl ColumnMapper {
    pub fn new(standards: &SurveyStandards) -> Self {
        let table = standards
            .column_mapping
            .iter()
            .map(|entry| (normalize_header(&entry.raw), entry.canonical.clone()))
            .collect();
        Self { table }
    }

    pub fn canonical_for(&self, header: &str) -> Option<&str> {
        self.table
            .get(&normalize_header(header))
            .map(String::as_str)
    }

    /// Rename every known header in place.
    ///
    /// A header whose canonical id is already taken by another column is left
    /// as is, so the frame never ends up with two columns of the same name.
    pub fn apply(&self, df: &mut DataFrame) -> Result<MappingSummary> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mut summary = MappingSummary::default();
        for name in &names {
            let Some(canonical) = self.canonical_for(name) else {
                summary.passed_through.push(name.clone());
                continue;
            };
            if canonical == name {
                summary.renamed.push((name.clone(), canonical.to_string()));
                continue;
            }
            let taken = df
                .get_column_names()
                .iter()
                .any(|existing| existing.as_str() == canonical);
            if taken {
                warn!(
                    header = %name,
                    canonical,
                    "canonical column already present, header left unchanged"
                );
                summary.passed_through.push(name.clone());
                continue;
            }
            df.rename(name, canonical.into())
                .map_err(|err| SurveyError::Frame(err.to_string()))?;
            debug!(canonical, "renamed header");
            summary.renamed.push((name.clone(), canonical.to_string()));
        }
        Ok(summary)
    }
}

/// Rename the known headers of `df` using the questionnaire mapping table.
pub fn apply_column_mapping(
    df: &mut DataFrame,
    standards: &SurveyStandards,
) -> Result<MappingSummary> {
    let summary = ColumnMapper::new(standards).apply(df)?;
    info!(
        renamed = summary.renamed_count(),
        passed_through = summary.passed_through.len(),
        "schema mapping complete"
    );
    Ok(summary)
}
