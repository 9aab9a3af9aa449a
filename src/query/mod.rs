//! Query templates and parameter binding
//!
//! One immutable template per intent, built once at process start. Every
//! template shares the same flattened return shape, which is what makes
//! symbolic rows and semantic hits losslessly mergeable downstream. The
//! binder turns a template plus extracted entities into a [`BoundQuery`]
//! whose filter slots are always present: a slot the question did not
//! constrain is bound to an explicit null, so the store-side predicate
//! `$slot IS NULL OR ...` degenerates to match-all.

mod binder;

pub use binder::{BoundQuery, ParameterBinder, QueryParameters};

use crate::entities::{SortAttribute, SortOrder};
use crate::error::{Result, SkyragError};
use crate::intent::Intent;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Default ordering declared by a template; the binder may replace it with
/// an extracted superlative cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingClause {
    pub attribute: SortAttribute,
    pub order: SortOrder,
}

impl OrderingClause {
    pub fn new(attribute: SortAttribute, order: SortOrder) -> Self {
        Self { attribute, order }
    }
}

/// Immutable query pattern for one intent
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    pub intent: Intent,
    /// Pattern-match statement without ordering or limit; the binder
    /// appends both when it renders the final statement
    pub statement_base: String,
    pub ordering: Option<OrderingClause>,
    pub default_limit: usize,
}

const MATCH_BLOCK: &str = "\
MATCH (p:Passenger)-[:TOOK]->(j:Journey)-[:ON]->(f:Flight)
MATCH (f)-[:DEPARTS_FROM]->(dep:Airport)
MATCH (f)-[:ARRIVES_AT]->(arr:Airport)";

/// Optional-filter block shared by almost every template
const STANDARD_FILTERS: &str = "\
($departure_code IS NULL OR dep.station_code = $departure_code)
  AND ($arrival_code IS NULL OR arr.station_code = $arrival_code)
  AND ($passenger_class IS NULL OR toLower(j.passenger_class) = $passenger_class)
  AND ($generation_cohort IS NULL OR toLower(p.generation) = $generation_cohort)";

/// Airport questions match a station on either end of the flight
const AIRPORT_FILTERS: &str = "\
($departure_code IS NULL OR dep.station_code = $departure_code OR arr.station_code = $departure_code)
  AND ($arrival_code IS NULL OR arr.station_code = $arrival_code)
  AND ($passenger_class IS NULL OR toLower(j.passenger_class) = $passenger_class)
  AND ($generation_cohort IS NULL OR toLower(p.generation) = $generation_cohort)";

/// The uniform flattened return shape, identical across all templates
const RETURN_BLOCK: &str = "\
RETURN j.feedback_ID AS feedback_id,
       j.passenger_class AS passenger_class,
       j.food_satisfaction_score AS food_satisfaction_score,
       j.arrival_delay_minutes AS arrival_delay_minutes,
       j.actual_flown_miles AS actual_flown_miles,
       j.number_of_legs AS number_of_legs,
       f.flight_number AS flight_number,
       f.fleet_type_description AS fleet_type,
       dep.station_code AS departure_airport,
       arr.station_code AS arrival_airport,
       p.generation AS generation,
       p.loyalty_program_level AS loyalty_level,
       p.record_locator AS record_locator";

/// Process-wide, read-only registry mapping each intent to its template.
/// Built once at startup; construction fails with
/// [`SkyragError::MalformedTemplate`] if any intent lacks a template, so a
/// classified intent can never miss at question time.
pub struct TemplateRegistry {
    templates: AHashMap<Intent, QueryTemplate>,
}

impl TemplateRegistry {
    pub fn new(default_limit: usize) -> Result<Self> {
        let mut templates = AHashMap::with_capacity(Intent::ALL.len());
        for intent in Intent::ALL {
            templates.insert(intent, template_for(intent, default_limit));
        }

        let registry = Self { templates };
        registry.validate()?;
        Ok(registry)
    }

    /// Integrity check over the full intent catalog
    fn validate(&self) -> Result<()> {
        for intent in Intent::ALL {
            if !self.templates.contains_key(&intent) {
                return Err(SkyragError::MalformedTemplate { intent });
            }
        }
        Ok(())
    }

    pub fn get(&self, intent: Intent) -> Result<&QueryTemplate> {
        self.templates
            .get(&intent)
            .ok_or(SkyragError::MalformedTemplate { intent })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn template_for(intent: Intent, default_limit: usize) -> QueryTemplate {
    use Intent::*;
    use SortAttribute::*;
    use SortOrder::*;

    // Structural predicates narrowing what the intent is about
    let extra = match intent {
        MostDelayedFlights => "j.arrival_delay_minutes > 0\n  AND ",
        MultiLegFlights => "j.number_of_legs > 1\n  AND ",
        _ => "",
    };

    let filters = match intent {
        AirportInfo => AIRPORT_FILTERS,
        _ => STANDARD_FILTERS,
    };

    let ordering = match intent {
        MostDelayedFlights | DelayAnalysis => Some(OrderingClause::new(Delay, Desc)),
        LongestJourneys => Some(OrderingClause::new(Miles, Desc)),
        ShortestJourneys => Some(OrderingClause::new(Miles, Asc)),
        MultiLegFlights => Some(OrderingClause::new(Legs, Desc)),
        PassengerExperience => Some(OrderingClause::new(FoodScore, Asc)),
        RouteRecommendation => Some(OrderingClause::new(Delay, Asc)),
        _ => None,
    };

    QueryTemplate {
        intent,
        statement_base: format!("{MATCH_BLOCK}\nWHERE {extra}{filters}\n{RETURN_BLOCK}"),
        ordering,
        default_limit,
    }
}
