use serde::{Deserialize, Serialize};

/// Outcome of renaming raw question headers to canonical identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    /// `(raw header, canonical id)` pairs that were renamed.
    pub renamed: Vec<(String, String)>,
    /// Headers left unchanged because the mapping table does not know them.
    pub passed_through: Vec<String>,
}

impl MappingSummary {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.renamed
            .iter()
            .find(|(source, _)| source == raw)
            .map(|(_, target)| target.as_str())
    }
}
