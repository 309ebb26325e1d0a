//! Factor groups.
//!
//! A factor is a latent dimension measured by several questionnaire items that
//! share a column prefix. The [`FactorSet`] is built once from the canonical
//! column list and handed to every analysis stage, so the prefix scan and the
//! worry-item exclusion happen in exactly one place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    Happiness,
    Academic,
    Environment,
    Social,
    Finance,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Happiness,
        Factor::Academic,
        Factor::Environment,
        Factor::Social,
        Factor::Finance,
    ];

    /// Factors that explain happiness, in report order.
    pub const PREDICTORS: [Factor; 4] = [
        Factor::Academic,
        Factor::Environment,
        Factor::Social,
        Factor::Finance,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Happiness => "hap_",
            Self::Academic => "aca_",
            Self::Environment => "env_",
            Self::Social => "soc_",
            Self::Finance => "fin_",
        }
    }

    /// Short name used as the correlation key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Happiness => "Happiness",
            Self::Academic => "Academic",
            Self::Environment => "Environment",
            Self::Social => "Social",
            Self::Finance => "Finance",
        }
    }

    /// Name used as the factor score key.
    pub fn score_label(self) -> &'static str {
        match self {
            Self::Happiness => "Happiness (Y)",
            Self::Academic => "Academic (X1)",
            Self::Environment => "Environment (X2)",
            Self::Social => "Social (X3)",
            Self::Finance => "Finance (X4)",
        }
    }
}

/// The canonical columns that measure one factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorGroup {
    pub factor: Factor,
    pub columns: Vec<String>,
}

impl FactorGroup {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// All factor groups of one dataset, in [`Factor::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorSet {
    groups: Vec<FactorGroup>,
}

impl FactorSet {
    /// Build the satisfaction reading of the factors.
    ///
    /// Columns listed in `excluded` (the raw worry item) are left out of every
    /// group; the stress reading reads them directly.
    pub fn from_columns<I, S>(columns: I, excluded: &[&str]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let groups = Factor::ALL
            .iter()
            .map(|&factor| FactorGroup {
                factor,
                columns: columns
                    .iter()
                    .filter(|name| name.starts_with(factor.prefix()))
                    .filter(|name| !excluded.contains(&name.as_str()))
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    pub fn group(&self, factor: Factor) -> Option<&FactorGroup> {
        self.groups.iter().find(|group| group.factor == factor)
    }

    pub fn columns(&self, factor: Factor) -> &[String] {
        self.group(factor)
            .map(|group| group.columns.as_slice())
            .unwrap_or(&[])
    }

    pub fn happiness(&self) -> &[String] {
        self.columns(Factor::Happiness)
    }

    /// Predictor groups in report order, including empty ones.
    pub fn predictors(&self) -> impl Iterator<Item = &FactorGroup> {
        Factor::PREDICTORS
            .iter()
            .filter_map(move |&factor| self.group(factor))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorGroup> {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_prefix_and_excludes_worry_item() {
        let columns = [
            "dem_gpa",
            "hap_general_satisfaction",
            "aca_deadline_pressure",
            "fin_tuition_value",
            "fin_living_cost_worry",
        ];
        let set = FactorSet::from_columns(columns, &["fin_living_cost_worry"]);
        assert_eq!(set.happiness(), ["hap_general_satisfaction"]);
        assert_eq!(set.columns(Factor::Academic), ["aca_deadline_pressure"]);
        assert_eq!(set.columns(Factor::Finance), ["fin_tuition_value"]);
        assert!(set.columns(Factor::Social).is_empty());
    }

    #[test]
    fn predictors_keep_report_order() {
        let set = FactorSet::from_columns(["soc_friends", "aca_fit"], &[]);
        let order: Vec<Factor> = set.predictors().map(|group| group.factor).collect();
        assert_eq!(order, Factor::PREDICTORS.to_vec());
    }
}
