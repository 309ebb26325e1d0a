use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::error::IngestError;

/// Filler words the questionnaire's free-text answers are full of.
const VIETNAMESE_DEFAULTS: &[&str] = &[
    "và", "là", "có", "để", "cho", "hơn", "em", "mình", "của", "ạ", "rất", "mong", "trường",
];

/// Tokens excluded from keyword counts. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vietnamese_defaults() -> Self {
        VIETNAMESE_DEFAULTS.iter().copied().collect()
    }

    /// One token per line; blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(|line| line.trim().trim_matches('\u{feff}'))
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }
}

/// Load a stop-word file. A missing file yields an empty set.
pub fn load_stop_words(path: &Path) -> Result<StopWords, IngestError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let words = StopWords::parse(&text);
            info!(path = %path.display(), count = words.len(), "loaded stop words");
            Ok(words)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "stop-word file not found, using an empty set");
            Ok(StopWords::empty())
        }
        Err(source) => Err(IngestError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let words = StopWords::parse("# common fillers\nvà\n\n  Là \n#không\n");
        assert_eq!(words.len(), 2);
        assert!(words.contains("và"));
        assert!(words.contains("LÀ"));
        assert!(!words.contains("không"));
    }

    #[test]
    fn defaults_cover_the_fillers() {
        let words = StopWords::vietnamese_defaults();
        assert_eq!(words.len(), 13);
        assert!(words.contains("trường"));
    }
}
