//! Pre-compiled extraction vocabulary
//!
//! All regexes are compiled once when the pipeline starts and the lexicon is
//! immutable afterwards, so it can be shared by reference across any number
//! of concurrent questions.

use crate::entities::{GenerationCohort, PassengerClass, SortAttribute};
use crate::error::{Result, SkyragError};
use ahash::AHashSet;
use regex::Regex;

/// Common three-letter words and domain abbreviations that collide with the
/// airport code pattern. Stoplist membership always wins over code detection.
const CODE_STOPLIST: &[&str] = &[
    "ALL", "AND", "ANY", "ARE", "BUT", "CAN", "DAY", "DID", "FEW", "FLY", "FOR", "GET", "HAD",
    "HAS", "HER", "HIM", "HIS", "HOW", "ITS", "LET", "LOW", "MAN", "NEW", "NOT", "NOW", "OLD",
    "ONE", "OUR", "OUT", "SAY", "SEE", "SHE", "SIX", "TEN", "THE", "TOO", "TOP", "TWO", "USE",
    "WAS", "WAY", "WHO", "WHY", "YOU",
    // cohort and cabin abbreviations
    "GEN", "ECO", "BIZ", "MIN", "MAX", "AIR", "LEG",
];

const DESCENDING_CUES: &[&str] = &[
    "longest", "worst", "most", "highest", "maximum", "biggest", "top",
];

const ASCENDING_CUES: &[&str] = &[
    "shortest", "best", "least", "lowest", "minimum", "smallest", "bottom",
];

/// Ordered limit cue patterns; the first matching pattern wins.
const LIMIT_CUES: &[&str] = &[
    r"(?i)\btop\s+(\d+)\b",
    r"(?i)\bfirst\s+(\d+)\b",
    r"(?i)\bthe\s+(\d+)\b",
    r"(?i)\b(\d+)\s+(?:flights?|journeys?|trips?|results?|records?|rows?)\b",
    r"(?i)\blimit\s+(\d+)\b",
];

/// Keyword rule mapping word-boundary patterns onto a typed value
pub(crate) struct KeywordRule<T> {
    pub value: T,
    pub patterns: Vec<Regex>,
}

/// Compiled extraction vocabulary shared by all questions
pub struct Lexicon {
    pub(crate) code: Regex,
    pub(crate) route: Regex,
    pub(crate) stoplist: AHashSet<&'static str>,
    pub(crate) descending: Regex,
    pub(crate) ascending: Regex,
    pub(crate) attributes: Vec<(SortAttribute, Regex)>,
    pub(crate) limit_cues: Vec<Regex>,
    pub(crate) classes: Vec<KeywordRule<PassengerClass>>,
    pub(crate) cohorts: Vec<KeywordRule<GenerationCohort>>,
}

impl Lexicon {
    /// Compile the full vocabulary
    pub fn new() -> Result<Self> {
        let attributes = vec![
            (SortAttribute::Delay, compile(r"(?i)\b(?:delays?|delayed|late)\b")?),
            (SortAttribute::Miles, compile(r"(?i)\b(?:miles?|distance)\b")?),
            (SortAttribute::FoodScore, compile(r"(?i)\b(?:food|meals?)\b")?),
            (
                SortAttribute::Legs,
                compile(r"(?i)\b(?:legs?|stops?|stopovers?|connections?)\b")?,
            ),
        ];

        let classes = vec![
            KeywordRule {
                value: PassengerClass::Economy,
                patterns: word_patterns(&["economy", "coach", "eco"])?,
            },
            KeywordRule {
                value: PassengerClass::Business,
                patterns: word_patterns(&["business", "biz"])?,
            },
            KeywordRule {
                value: PassengerClass::First,
                patterns: word_patterns(&["first class", "first"])?,
            },
        ];

        let cohorts = vec![
            KeywordRule {
                value: GenerationCohort::GenZ,
                patterns: word_patterns(&["gen z", "gen-z", "genz", "generation z"])?,
            },
            KeywordRule {
                value: GenerationCohort::Millennial,
                patterns: word_patterns(&["millennials", "millennial"])?,
            },
            KeywordRule {
                value: GenerationCohort::Boomer,
                patterns: word_patterns(&["baby boomers", "baby boomer", "boomers", "boomer"])?,
            },
        ];

        Ok(Self {
            code: compile(r"\b[A-Z]{3}\b")?,
            route: compile(r"\b([A-Z]{3})-([A-Z]{3})\b")?,
            stoplist: CODE_STOPLIST.iter().copied().collect(),
            descending: alternation(DESCENDING_CUES)?,
            ascending: alternation(ASCENDING_CUES)?,
            attributes,
            limit_cues: LIMIT_CUES
                .iter()
                .map(|p| compile(p))
                .collect::<Result<Vec<_>>>()?,
            classes,
            cohorts,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| SkyragError::Config(format!("Invalid lexicon pattern '{}': {}", pattern, e)))
}

/// Case-insensitive word-boundary alternation over a cue list
fn alternation(cues: &[&str]) -> Result<Regex> {
    let body = cues
        .iter()
        .map(|c| regex::escape(c))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(r"(?i)\b(?:{})\b", body))
}

fn word_patterns(keywords: &[&str]) -> Result<Vec<Regex>> {
    keywords
        .iter()
        .map(|kw| compile(&format!(r"(?i)\b{}\b", regex::escape(kw))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_compiles() {
        let lexicon = Lexicon::new().unwrap();
        assert_eq!(lexicon.limit_cues.len(), 5);
        assert_eq!(lexicon.attributes.len(), 4);
    }

    #[test]
    fn test_stoplist_contains_cohort_abbreviations() {
        let lexicon = Lexicon::new().unwrap();
        assert!(lexicon.stoplist.contains("GEN"));
        assert!(lexicon.stoplist.contains("ECO"));
        assert!(lexicon.stoplist.contains("BIZ"));
    }

    #[test]
    fn test_superlative_cues_are_word_bounded() {
        let lexicon = Lexicon::new().unwrap();
        assert!(lexicon.descending.is_match("the longest delays"));
        assert!(!lexicon.descending.is_match("prolongest"));
        assert!(lexicon.ascending.is_match("Shortest journeys"));
    }
}
