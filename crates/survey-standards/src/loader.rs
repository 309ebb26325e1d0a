use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StandardsError;
use crate::standards::SurveyStandards;

const STANDARDS_ENV_VAR: &str = "SURVEY_STANDARDS_FILE";

/// Read a TOML standards file. Fields the file omits keep their builtin values.
pub fn load_standards(path: &Path) -> Result<SurveyStandards, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|err| StandardsError::io(path, err))?;
    let standards: SurveyStandards =
        toml::from_str(&text).map_err(|source| StandardsError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
    standards.validate()?;
    info!(
        path = %path.display(),
        mappings = standards.column_mapping.len(),
        "loaded survey standards"
    );
    Ok(standards)
}

/// Explicit path first, then `SURVEY_STANDARDS_FILE`, then the builtin questionnaire.
pub fn resolve_standards(path: Option<&Path>) -> Result<SurveyStandards, StandardsError> {
    if let Some(path) = path {
        return load_standards(path);
    }
    if let Ok(value) = std::env::var(STANDARDS_ENV_VAR)
        && !value.trim().is_empty()
    {
        return load_standards(&PathBuf::from(value));
    }
    debug!("using builtin survey standards");
    Ok(SurveyStandards::builtin())
}
