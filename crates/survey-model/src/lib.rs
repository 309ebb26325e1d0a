//! Survey data model definitions.
//!
//! - **schema**: canonical field identifiers produced by the ETL stage
//! - **column**: explicit column classification used by the Likert encoder
//! - **factor**: factor groups built once from the canonical schema
//! - **report**: ordered metric report assembled from per-stage sections
//! - **conformance**: findings from checking the canonical dataset

pub mod column;
pub mod conformance;
pub mod error;
pub mod factor;
pub mod mapping;
pub mod report;
pub mod schema;

pub use column::{ColumnKind, ColumnProfile};
pub use conformance::{ConformanceIssue, ConformanceReport, IssueSeverity};
pub use error::{Result, SurveyError};
pub use factor::{Factor, FactorGroup, FactorSet};
pub use mapping::MappingSummary;
pub use report::{Metric, MetricMap, Report, ReportBuilder, ReportSection};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conformance_report_counts() {
        let report = ConformanceReport {
            dataset: "processed".to_string(),
            issues: vec![
                ConformanceIssue {
                    code: "SV0001".to_string(),
                    message: "required column missing".to_string(),
                    severity: IssueSeverity::Error,
                    column: Some("hap_loyalty_choice".to_string()),
                    count: Some(1),
                },
                ConformanceIssue {
                    code: "SV0004".to_string(),
                    message: "value out of range".to_string(),
                    severity: IssueSeverity::Warning,
                    column: Some("dem_gpa".to_string()),
                    count: Some(3),
                },
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn report_serializes_in_insertion_order() {
        let mut section = ReportSection::new();
        section.insert("nhs_percentage", Metric::Value(Some(16.67)));
        section.insert("ahs_overall", Metric::Value(None));
        let report = ReportBuilder::new().merge(section).build();
        let json = serde_json::to_string(&report).expect("serialize report");
        assert_eq!(json, r#"{"nhs_percentage":16.67,"ahs_overall":null}"#);
    }
}
