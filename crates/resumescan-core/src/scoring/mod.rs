//! Keyword match scoring.
//!
//! A resume's score is the share of policy keywords that occur anywhere in
//! its text, compared as raw substrings after Unicode case folding. There is
//! no word boundary check: `"java"` matches `"javascript"`.

mod keywords;

pub use keywords::KeywordSet;
use keywords::fold_case;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ScoringError;

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Percentage of keywords found, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct MatchScore(u8);

impl MatchScore {
    /// Score for `matched` out of `total` keywords, rounded half up.
    fn from_counts(matched: usize, total: usize) -> Self {
        debug_assert!(total > 0 && matched <= total);
        let percent = (200 * matched + total) / (2 * total);
        Self(percent as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MatchScore> for u8 {
    fn from(score: MatchScore) -> Self {
        score.0
    }
}

impl TryFrom<u8> for MatchScore {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self> {
        if value > 100 {
            return Err(ScoringError::ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }
}

/// Score plus the keywords behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Overall percentage.
    pub score: MatchScore,
    /// Keywords found in the text, in policy order.
    pub matched: Vec<String>,
    /// Keywords not found, in policy order.
    pub missing: Vec<String>,
    /// Number of keyword entries scored against.
    pub total: usize,
}

/// Score `text` against `keywords` and report which keywords matched.
pub fn score_document(text: &str, keywords: &KeywordSet) -> Result<MatchReport> {
    if keywords.is_empty() {
        return Err(ScoringError::EmptyKeywordSet);
    }

    let haystack = fold_case(text);
    let (matched, missing): (Vec<&str>, Vec<&str>) =
        keywords.iter().partition(|keyword| haystack.contains(keyword));

    let score = MatchScore::from_counts(matched.len(), keywords.len());
    trace!(
        "Matched {}/{} keywords -> {}",
        matched.len(),
        keywords.len(),
        score
    );

    Ok(MatchReport {
        score,
        matched: matched.into_iter().map(str::to_string).collect(),
        missing: missing.into_iter().map(str::to_string).collect(),
        total: keywords.len(),
    })
}

/// Percentage of `keywords` occurring in `text`.
pub fn compute_score(text: &str, keywords: &KeywordSet) -> Result<MatchScore> {
    score_document(text, keywords).map(|report| report.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn web_stack() -> KeywordSet {
        KeywordSet::new(["react", "node", "javascript", "mysql", "html", "css", "api"])
    }

    fn score(text: &str, keywords: &KeywordSet) -> u8 {
        compute_score(text, keywords).unwrap().value()
    }

    #[test]
    fn test_resume_against_web_stack() {
        let text = "Experienced React and Node developer, skilled in MySQL and REST APIs";
        let report = score_document(text, &web_stack()).unwrap();

        // "api" is a substring of "apis"
        assert_eq!(report.matched, vec!["react", "node", "mysql", "api"]);
        assert_eq!(report.missing, vec!["javascript", "html", "css"]);
        assert_eq!(report.total, 7);
        assert_eq!(report.score.value(), 57);
    }

    #[test]
    fn test_three_of_seven_rounds_to_43() {
        let text = "Experienced React and Node developer, skilled in MySQL";
        assert_eq!(score(text, &web_stack()), 43);
    }

    #[test]
    fn test_all_and_none() {
        let keywords = KeywordSet::new(["rust", "tokio"]);
        assert_eq!(score("Rust services on Tokio", &keywords), 100);
        assert_eq!(score("Cobol mainframes", &keywords), 0);
        assert_eq!(score("", &keywords), 0);
    }

    #[test]
    fn test_case_insensitive() {
        let keywords = web_stack();
        let text = "Built html/css dashboards with React";
        assert_eq!(score(text, &keywords), score(&text.to_uppercase(), &keywords));
        assert_eq!(score("REACT", &KeywordSet::new(["React"])), 100);
    }

    #[test]
    fn test_case_folding_beyond_ascii() {
        let keywords = KeywordSet::new(["straße"]);
        assert_eq!(score("Straße", &keywords), 100);
        assert_eq!(score(&"Straße".to_uppercase(), &keywords), 100);
        assert_eq!(score("STRASSE", &keywords), 100);
    }

    #[test]
    fn test_substring_match_without_word_boundaries() {
        assert_eq!(score("javascript", &KeywordSet::new(["java"])), 100);
        assert_eq!(score("sqlite", &KeywordSet::new(["sql"])), 100);
    }

    #[test]
    fn test_repeated_occurrences_count_once() {
        let keywords = KeywordSet::new(["go", "rust"]);
        assert_eq!(score("go go go go", &keywords), 50);
    }

    #[test]
    fn test_duplicate_entries_count_separately() {
        let keywords = KeywordSet::new(["rust", "rust", "zig"]);
        let report = score_document("rust", &keywords).unwrap();
        assert_eq!(report.matched.len(), 2);
        assert_eq!(report.score.value(), 67);
    }

    #[test]
    fn test_rounding_half_up() {
        // 1/8 = 12.5%
        let keywords = KeywordSet::new(["a1", "b2", "c3", "d4", "e5", "f6", "g7", "h8"]);
        assert_eq!(score("a1", &keywords), 13);
        // 1/3 = 33.3%, 2/3 = 66.7%
        let keywords = KeywordSet::new(["x", "y", "z"]);
        assert_eq!(score("x", &keywords), 33);
        assert_eq!(score("xy", &keywords), 67);
    }

    #[test]
    fn test_empty_keyword_set() {
        let empty = KeywordSet::default();
        assert_eq!(
            compute_score("anything", &empty),
            Err(ScoringError::EmptyKeywordSet)
        );
        assert_eq!(
            score_document("", &empty),
            Err(ScoringError::EmptyKeywordSet)
        );
    }

    #[test]
    fn test_score_always_in_range() {
        let keywords = web_stack();
        let texts = [
            "",
            "react",
            "react node javascript mysql html css api",
            "REACT NODE",
            "completely unrelated prose about gardening",
        ];
        for text in texts {
            let s = score(text, &keywords);
            assert!(s <= 100, "{text:?} scored {s}");
        }
    }

    #[test]
    fn test_score_serde_rejects_out_of_range() {
        let score: MatchScore = serde_json::from_str("43").unwrap();
        assert_eq!(score.value(), 43);
        assert_eq!(serde_json::to_string(&score).unwrap(), "43");

        assert!(serde_json::from_str::<MatchScore>("101").is_err());
        assert!(serde_json::from_str::<MatchScore>("255").is_err());
        assert_eq!(MatchScore::try_from(200), Err(ScoringError::ScoreOutOfRange(200)));
    }

    #[test]
    fn test_deterministic() {
        let keywords = web_stack();
        let text = "Node and CSS";
        let first = score_document(text, &keywords).unwrap();
        for _ in 0..10 {
            assert_eq!(score_document(text, &keywords).unwrap(), first);
        }
    }
}
