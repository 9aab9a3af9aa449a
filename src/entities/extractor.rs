//! Entity extraction from question text
//!
//! Precedence rules, in the order they are applied:
//! - stoplist membership beats the code pattern, always
//! - an explicit `XXX-YYY` route token beats loose code scanning
//! - descending superlatives are checked before ascending ones
//! - limit cues are tried in declared order, first match wins
//! - a class keyword directly followed by a number is read as a count cue
//!   ("first 5"), not as a cabin class

use crate::entities::{
    ExtractedEntities, GenerationCohort, Lexicon, PassengerClass, SortAttribute, SortOrder,
};
use std::sync::Arc;

enum Direction {
    From,
    To,
}

/// Extractor over the shared lexicon; total over all inputs
pub struct EntityExtractor {
    lexicon: Arc<Lexicon>,
}

impl EntityExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Extract all entities from a question. Never fails; missing signals
    /// are `None`.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let (departure_code, arrival_code) = self.extract_codes(text);
        let (sort_order, sort_attribute) = self.extract_sort(text);

        ExtractedEntities {
            departure_code,
            arrival_code,
            passenger_class: self.extract_class(text),
            generation_cohort: self.extract_cohort(text),
            sort_order,
            sort_attribute,
            limit: self.extract_limit(text),
        }
    }

    /// Code-like token detection with stoplist precedence and directional
    /// from/to disambiguation.
    fn extract_codes(&self, text: &str) -> (Option<String>, Option<String>) {
        let upper = text.to_uppercase();

        // Explicit route token first
        if let Some(caps) = self.lexicon.route.captures(&upper) {
            let dep = &caps[1];
            let arr = &caps[2];
            if !self.lexicon.stoplist.contains(dep) && !self.lexicon.stoplist.contains(arr) {
                return (Some(dep.to_string()), Some(arr.to_string()));
            }
        }

        // Loose scan: distinct non-stoplisted codes with first positions
        let mut codes: Vec<(&str, usize)> = Vec::new();
        for m in self.lexicon.code.find_iter(&upper) {
            let token = m.as_str();
            if self.lexicon.stoplist.contains(token) {
                continue;
            }
            if !codes.iter().any(|(c, _)| *c == token) {
                codes.push((token, m.start()));
            }
        }

        match codes.as_slice() {
            [(code, pos)] => match preceding_direction(&upper, *pos) {
                Some(Direction::To) => (None, Some(code.to_string())),
                _ => (Some(code.to_string()), None),
            },
            [(first, first_pos), (second, second_pos)] => {
                // Default is order of appearance; a preposition on either
                // code can flip the pair.
                let flipped = matches!(preceding_direction(&upper, *first_pos), Some(Direction::To))
                    || matches!(preceding_direction(&upper, *second_pos), Some(Direction::From));
                if flipped {
                    (Some(second.to_string()), Some(first.to_string()))
                } else {
                    (Some(first.to_string()), Some(second.to_string()))
                }
            }
            // Zero or more than two candidates: too ambiguous to bind
            _ => (None, None),
        }
    }

    fn extract_sort(&self, text: &str) -> (Option<SortOrder>, Option<SortAttribute>) {
        let order = if self.lexicon.descending.is_match(text) {
            Some(SortOrder::Desc)
        } else if self.lexicon.ascending.is_match(text) {
            Some(SortOrder::Asc)
        } else {
            None
        };

        // The attribute is only meaningful next to a direction cue; when the
        // question names no domain noun the intent default fills it in later.
        let attribute = if order.is_some() {
            self.lexicon
                .attributes
                .iter()
                .find(|(_, re)| re.is_match(text))
                .map(|(attr, _)| *attr)
        } else {
            None
        };

        (order, attribute)
    }

    fn extract_limit(&self, text: &str) -> Option<usize> {
        for cue in &self.lexicon.limit_cues {
            if let Some(caps) = cue.captures(text) {
                if let Ok(n) = caps[1].parse::<usize>() {
                    if n > 0 {
                        return Some(n);
                    }
                }
            }
        }
        None
    }

    fn extract_class(&self, text: &str) -> Option<PassengerClass> {
        for rule in &self.lexicon.classes {
            for re in &rule.patterns {
                if let Some(m) = re.find(text) {
                    if !followed_by_count(text, m.end()) {
                        return Some(rule.value);
                    }
                }
            }
        }
        None
    }

    fn extract_cohort(&self, text: &str) -> Option<GenerationCohort> {
        for rule in &self.lexicon.cohorts {
            if rule.patterns.iter().any(|re| re.is_match(text)) {
                return Some(rule.value);
            }
        }
        None
    }
}

/// Word immediately before `pos`, if it is a from/to preposition
fn preceding_direction(upper: &str, pos: usize) -> Option<Direction> {
    match upper[..pos].split_whitespace().last() {
        Some("FROM") => Some(Direction::From),
        Some("TO") => Some(Direction::To),
        _ => None,
    }
}

/// True when the match is trailed by a number ("first 5", "top 10")
fn followed_by_count(text: &str, end: usize) -> bool {
    text[end..]
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}
