//! Canonical field identifiers.
//!
//! These are the column names the Schema Mapper produces and every later
//! stage reads. Factor items are not listed individually: they are discovered
//! by prefix when the [`FactorSet`](crate::FactorSet) is built.

pub const TIMESTAMP: &str = "timestamp";
pub const EMAIL: &str = "email";
pub const CONSENT: &str = "consent";
pub const ATTENTION_CHECK: &str = "attention_check";

pub const DEM_MAJOR: &str = "dem_major";
pub const DEM_SEMESTER: &str = "dem_semester";
pub const DEM_GPA: &str = "dem_gpa";
pub const DEM_RESIDENCE: &str = "dem_residence";

pub const HAP_LOYALTY_CHOICE: &str = "hap_loyalty_choice";
pub const ACA_DEADLINE_PRESSURE: &str = "aca_deadline_pressure";
pub const FIN_LIVING_COST_WORRY: &str = "fin_living_cost_worry";

pub const WISH: &str = "wish";

/// Derived per-respondent mean of the happiness items.
pub const INDIVIDUAL_AHS: &str = "individual_ahs";

/// Valid range for `dem_semester` after normalization.
pub const SEMESTER_RANGE: std::ops::RangeInclusive<i64> = 1..=9;

/// Valid range for `dem_gpa`.
pub const GPA_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Valid range for encoded Likert items.
pub const LIKERT_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Returns true if the column name carries one of the factor prefixes.
pub fn is_factor_field(name: &str) -> bool {
    crate::Factor::ALL
        .iter()
        .any(|factor| name.starts_with(factor.prefix()))
}
