//! Keyword Extractor.
//!
//! Wishes are joined, lower-cased and handed to a [`Tokenizer`]. Purely
//! alphabetic tokens outside the stop-word set are counted; the most frequent
//! come first and ties keep the order in which the words first appeared.

use std::collections::HashMap;

use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use survey_ingest::StopWords;
use survey_model::schema::WISH;
use survey_model::{Metric, MetricMap, ReportSection};

use crate::dataset::SurveyData;

/// Keywords reported in the summary report.
pub const SUMMARY_KEYWORDS: usize = 5;
/// Keywords reported in the chart data.
pub const CHART_KEYWORDS: usize = 20;

#[derive(Debug, thiserror::Error)]
#[error("tokenizer failed: {message}")]
pub struct TokenizeError {
    pub message: String,
}

/// Splits free text into word tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

/// Word boundaries per Unicode Standard Annex #29.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.unicode_words().map(str::to_string).collect())
    }
}

fn is_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Count keywords across `texts` and return the `limit` most frequent.
///
/// A tokenizer failure yields an empty result.
pub fn extract_keywords<S: AsRef<str>>(
    texts: &[S],
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWords,
    limit: usize,
) -> Vec<(String, u64)> {
    let joined = texts
        .iter()
        .map(|text| text.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase();
    if joined.trim().is_empty() {
        return Vec::new();
    }
    let tokens = match tokenizer.tokenize(&joined) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(error = %err, "keyword extraction skipped");
            return Vec::new();
        }
    };
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        if !is_alphabetic_token(&token) || stop_words.contains(&token) {
            continue;
        }
        match positions.get(&token) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }
    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    debug!(keywords = counts.len(), "keywords extracted");
    counts
}

/// Top keywords of the `wish` column as an ordered map.
pub fn wish_keywords(
    data: &SurveyData<'_>,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWords,
    limit: usize,
) -> MetricMap {
    let wishes: Vec<String> = data
        .text_column(WISH)
        .map(|values| values.into_iter().flatten().collect())
        .unwrap_or_default();
    extract_keywords(&wishes, tokenizer, stop_words, limit)
        .into_iter()
        .map(|(word, count)| (word, Metric::Count(count)))
        .collect()
}

pub fn wish_section(
    data: &SurveyData<'_>,
    tokenizer: &dyn Tokenizer,
    stop_words: &StopWords,
) -> ReportSection {
    let mut section = ReportSection::new();
    section.insert(
        "wish_analysis",
        wish_keywords(data, tokenizer, stop_words, SUMMARY_KEYWORDS).into(),
    );
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingTokenizer;

    impl Tokenizer for FailingTokenizer {
        fn tokenize(&self, _text: &str) -> Result<Vec<String>, TokenizeError> {
            Err(TokenizeError {
                message: "model not loaded".to_string(),
            })
        }
    }

    #[test]
    fn counts_match_literal_occurrences() {
        let wishes = [
            "Mong trường có thêm cây xanh",
            "thêm wifi, thêm cây",
            "wifi 24/7 và wifi mạnh",
        ];
        let stop_words = StopWords::vietnamese_defaults();
        let keywords = extract_keywords(&wishes, &UnicodeWordTokenizer, &stop_words, 4);
        assert_eq!(
            keywords,
            vec![
                ("thêm".to_string(), 3),
                ("wifi".to_string(), 3),
                ("cây".to_string(), 2),
                ("xanh".to_string(), 1),
            ]
        );
    }

    #[test]
    fn digits_and_stop_words_are_dropped() {
        let stop_words: StopWords = ["deadline"].into_iter().collect();
        let keywords = extract_keywords(
            &["Deadline 2 lần deadline"],
            &UnicodeWordTokenizer,
            &stop_words,
            10,
        );
        assert_eq!(keywords, vec![("lần".to_string(), 1)]);
    }

    #[test]
    fn tokenizer_failure_yields_nothing() {
        let keywords = extract_keywords(
            &["thêm cây xanh"],
            &FailingTokenizer,
            &StopWords::empty(),
            5,
        );
        assert!(keywords.is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        let empty: [&str; 0] = [];
        assert!(extract_keywords(&empty, &UnicodeWordTokenizer, &StopWords::empty(), 5).is_empty());
    }
}
