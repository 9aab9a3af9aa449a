//! Question understanding: typed entities pulled out of free text
//!
//! Extraction never fails; a signal that is absent from the question is
//! simply `None`. Ambiguous cues are resolved by fixed precedence rules
//! documented on the extractor, never surfaced to callers.

mod extractor;
mod lexicon;

pub use extractor::EntityExtractor;
pub use lexicon::Lexicon;

use serde::{Deserialize, Serialize};

/// Sort direction requested by a superlative cue ("longest" vs "shortest")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Journey attribute a superlative cue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAttribute {
    Delay,
    Miles,
    FoodScore,
    Legs,
}

impl SortAttribute {
    /// Property reference used in query statements
    pub fn property(self) -> &'static str {
        match self {
            SortAttribute::Delay => "j.arrival_delay_minutes",
            SortAttribute::Miles => "j.actual_flown_miles",
            SortAttribute::FoodScore => "j.food_satisfaction_score",
            SortAttribute::Legs => "j.number_of_legs",
        }
    }
}

/// Cabin class mentioned in a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerClass {
    Economy,
    Business,
    First,
}

impl PassengerClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PassengerClass::Economy => "economy",
            PassengerClass::Business => "business",
            PassengerClass::First => "first",
        }
    }
}

/// Passenger generation cohort mentioned in a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationCohort {
    #[serde(rename = "gen z")]
    GenZ,
    #[serde(rename = "millennial")]
    Millennial,
    #[serde(rename = "boomer")]
    Boomer,
}

impl GenerationCohort {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationCohort::GenZ => "gen z",
            GenerationCohort::Millennial => "millennial",
            GenerationCohort::Boomer => "boomer",
        }
    }
}

/// Entities extracted from one question, immutable once built.
///
/// `sort_order` and `sort_attribute` are set together, except that the
/// attribute may stay `None` when the question names a direction but no
/// domain noun; the classified intent supplies the default attribute at
/// bind time. `limit`, when present, is always positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub departure_code: Option<String>,
    pub arrival_code: Option<String>,
    pub passenger_class: Option<PassengerClass>,
    pub generation_cohort: Option<GenerationCohort>,
    pub sort_order: Option<SortOrder>,
    pub sort_attribute: Option<SortAttribute>,
    pub limit: Option<usize>,
}

impl ExtractedEntities {
    /// True when no signal at all was found in the question
    pub fn is_empty(&self) -> bool {
        self.departure_code.is_none()
            && self.arrival_code.is_none()
            && self.passenger_class.is_none()
            && self.generation_cohort.is_none()
            && self.sort_order.is_none()
            && self.limit.is_none()
    }
}
