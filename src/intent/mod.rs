//! Rule-based intent classification
//!
//! A question maps to exactly one [`Intent`] from a closed catalog. The
//! classifier walks an ordered rule table and returns the first intent with
//! a matching trigger phrase; nothing matching falls through to
//! [`Intent::GeneralQuery`], so classification is total. Rule order is a
//! correctness requirement: narrower intents (superlative delay queries)
//! are listed before the broader ones (generic delay analysis) that would
//! otherwise shadow them.

use crate::entities::SortAttribute;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed catalog of analytic intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CalculateStatistic,
    MostDelayedFlights,
    LongestJourneys,
    ShortestJourneys,
    MultiLegFlights,
    LoyaltyAnalysis,
    DelayAnalysis,
    FindFlights,
    AirportInfo,
    PassengerExperience,
    RouteRecommendation,
    GeneralQuery,
}

impl Intent {
    /// Every member of the catalog; used to validate registry coverage
    pub const ALL: [Intent; 12] = [
        Intent::CalculateStatistic,
        Intent::MostDelayedFlights,
        Intent::LongestJourneys,
        Intent::ShortestJourneys,
        Intent::MultiLegFlights,
        Intent::LoyaltyAnalysis,
        Intent::DelayAnalysis,
        Intent::FindFlights,
        Intent::AirportInfo,
        Intent::PassengerExperience,
        Intent::RouteRecommendation,
        Intent::GeneralQuery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CalculateStatistic => "calculate_statistic",
            Intent::MostDelayedFlights => "most_delayed_flights",
            Intent::LongestJourneys => "longest_journeys",
            Intent::ShortestJourneys => "shortest_journeys",
            Intent::MultiLegFlights => "multi_leg_flights",
            Intent::LoyaltyAnalysis => "loyalty_analysis",
            Intent::DelayAnalysis => "delay_analysis",
            Intent::FindFlights => "find_flights",
            Intent::AirportInfo => "airport_info",
            Intent::PassengerExperience => "passenger_experience",
            Intent::RouteRecommendation => "route_recommendation",
            Intent::GeneralQuery => "general_query",
        }
    }

    /// Attribute a bare superlative sorts by when the question names none
    pub fn default_sort_attribute(self) -> Option<SortAttribute> {
        match self {
            Intent::MostDelayedFlights | Intent::DelayAnalysis => Some(SortAttribute::Delay),
            Intent::LongestJourneys | Intent::ShortestJourneys => Some(SortAttribute::Miles),
            Intent::MultiLegFlights => Some(SortAttribute::Legs),
            Intent::PassengerExperience => Some(SortAttribute::FoodScore),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: an intent and the phrases that trigger it
struct IntentRule {
    intent: Intent,
    triggers: &'static [&'static str],
}

/// Precedence is the table order, most specific first. Matching is plain
/// substring containment over the lowercased question, so "longest delay"
/// also fires on "longest delays".
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::CalculateStatistic,
        triggers: &[
            "average",
            "mean",
            "count",
            "how many",
            "total",
            "percentage",
            "statistics",
            "stats",
        ],
    },
    IntentRule {
        intent: Intent::MostDelayedFlights,
        triggers: &[
            "most delayed",
            "longest delay",
            "worst delay",
            "maximum delay",
            "biggest delay",
        ],
    },
    IntentRule {
        intent: Intent::LongestJourneys,
        triggers: &[
            "longest journey",
            "longest flight",
            "longest route",
            "longest distance",
            "farthest",
        ],
    },
    IntentRule {
        intent: Intent::ShortestJourneys,
        triggers: &["shortest", "fastest", "quickest", "nearest"],
    },
    IntentRule {
        intent: Intent::MultiLegFlights,
        triggers: &[
            "multi-leg",
            "multi leg",
            "connection",
            "stopover",
            "layover",
            "indirect",
        ],
    },
    IntentRule {
        intent: Intent::LoyaltyAnalysis,
        triggers: &["loyalty", "frequent flyer", "member", "tier"],
    },
    IntentRule {
        intent: Intent::DelayAnalysis,
        triggers: &["delay", "late", "on time", "punctual", "arrival time"],
    },
    IntentRule {
        intent: Intent::FindFlights,
        triggers: &[
            "flights from",
            "flight from",
            "flights to",
            "flight to",
            "flying from",
            "depart",
            "arrive",
        ],
    },
    IntentRule {
        intent: Intent::AirportInfo,
        triggers: &["airport", "terminal", "gate", "station"],
    },
    IntentRule {
        intent: Intent::PassengerExperience,
        triggers: &[
            "rating",
            "satisfaction",
            "feedback",
            "experience",
            "service quality",
            "food",
            "meal",
        ],
    },
    IntentRule {
        intent: Intent::RouteRecommendation,
        triggers: &["recommend", "best route", "optimal"],
    },
];

/// First-match classifier over the static rule table
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question; total over all inputs
    pub fn classify(&self, text: &str) -> Intent {
        let t = text.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.triggers.iter().any(|kw| t.contains(kw)))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::GeneralQuery)
    }
}
