//! Binding extracted entities onto a query template

use crate::entities::{ExtractedEntities, GenerationCohort, PassengerClass};
use crate::error::Result;
use crate::intent::Intent;
use crate::query::{OrderingClause, TemplateRegistry};
use serde::Serialize;
use serde_json::{Map, Value};

/// Concrete parameter set for one bound query.
///
/// Every filter slot is present; `None` means "unconstrained" and is
/// serialized as an explicit null, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameters {
    pub departure_code: Option<String>,
    pub arrival_code: Option<String>,
    pub passenger_class: Option<PassengerClass>,
    pub generation_cohort: Option<GenerationCohort>,
    pub limit: usize,
}

impl QueryParameters {
    /// Flat parameter map for the graph store, with explicit nulls for
    /// unconstrained slots
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("departure_code".into(), opt_string(&self.departure_code));
        map.insert("arrival_code".into(), opt_string(&self.arrival_code));
        map.insert(
            "passenger_class".into(),
            self.passenger_class
                .map_or(Value::Null, |c| Value::String(c.as_str().into())),
        );
        map.insert(
            "generation_cohort".into(),
            self.generation_cohort
                .map_or(Value::Null, |g| Value::String(g.as_str().into())),
        );
        map.insert("limit".into(), Value::from(self.limit));
        map
    }
}

fn opt_string(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map_or(Value::Null, |s| Value::String(s.clone()))
}

/// A template with all parameters resolved, ready for execution.
/// Created per question and consumed once.
#[derive(Debug, Clone)]
pub struct BoundQuery {
    pub intent: Intent,
    /// Final statement including ordering and limit clauses
    pub statement: String,
    pub ordering: Option<OrderingClause>,
    pub params: QueryParameters,
}

impl BoundQuery {
    pub fn limit(&self) -> usize {
        self.params.limit
    }
}

/// Maps extracted entities onto template slots
pub struct ParameterBinder {
    /// Result-cap ceiling; an extracted limit never exceeds it
    max_limit: usize,
}

impl ParameterBinder {
    pub fn new(max_limit: usize) -> Self {
        Self { max_limit }
    }

    /// Bind a question's entities to the template registered for its intent.
    ///
    /// The effective limit is the extracted one when present, else the
    /// template default, clamped to the ceiling. An extracted superlative
    /// replaces the template's ordering clause when its attribute is known
    /// (directly or via the intent default).
    pub fn bind(
        &self,
        registry: &TemplateRegistry,
        intent: Intent,
        entities: &ExtractedEntities,
    ) -> Result<BoundQuery> {
        let template = registry.get(intent)?;

        let limit = entities
            .limit
            .unwrap_or(template.default_limit)
            .min(self.max_limit);

        let ordering = match entities.sort_order {
            Some(order) => entities
                .sort_attribute
                .or_else(|| intent.default_sort_attribute())
                .map(|attribute| OrderingClause { attribute, order })
                .or(template.ordering),
            None => template.ordering,
        };

        let order_clause = match &ordering {
            Some(c) => format!(
                "ORDER BY {} {}, j.feedback_ID ASC",
                c.attribute.property(),
                c.order.keyword()
            ),
            // Stable natural-key order keeps unordered templates reproducible
            None => "ORDER BY j.feedback_ID ASC".to_string(),
        };

        let statement = format!(
            "{}\n{}\nLIMIT $limit",
            template.statement_base, order_clause
        );

        Ok(BoundQuery {
            intent,
            statement,
            ordering,
            params: QueryParameters {
                departure_code: entities.departure_code.clone(),
                arrival_code: entities.arrival_code.clone(),
                passenger_class: entities.passenger_class,
                generation_cohort: entities.generation_cohort,
                limit,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{SortAttribute, SortOrder};

    fn registry() -> TemplateRegistry {
        TemplateRegistry::new(10).unwrap()
    }

    fn binder() -> ParameterBinder {
        ParameterBinder::new(100)
    }

    #[test]
    fn test_default_limit_applies() {
        let bound = binder()
            .bind(
                &registry(),
                Intent::MostDelayedFlights,
                &ExtractedEntities::default(),
            )
            .unwrap();
        assert_eq!(bound.limit(), 10);
    }

    #[test]
    fn test_extracted_limit_wins() {
        let entities = ExtractedEntities {
            limit: Some(5),
            ..Default::default()
        };
        let bound = binder()
            .bind(&registry(), Intent::ShortestJourneys, &entities)
            .unwrap();
        assert_eq!(bound.limit(), 5);
    }

    #[test]
    fn test_limit_clamped_to_ceiling() {
        let entities = ExtractedEntities {
            limit: Some(5000),
            ..Default::default()
        };
        let bound = binder()
            .bind(&registry(), Intent::GeneralQuery, &entities)
            .unwrap();
        assert_eq!(bound.limit(), 100);
    }

    #[test]
    fn test_unconstrained_slots_bound_as_null() {
        let bound = binder()
            .bind(&registry(), Intent::GeneralQuery, &ExtractedEntities::default())
            .unwrap();
        let map = bound.params.to_map();

        assert_eq!(map.len(), 5);
        assert!(map["departure_code"].is_null());
        assert!(map["arrival_code"].is_null());
        assert!(map["passenger_class"].is_null());
        assert!(map["generation_cohort"].is_null());
        assert_eq!(map["limit"], serde_json::json!(10));
    }

    #[test]
    fn test_constrained_slots_serialized() {
        let entities = ExtractedEntities {
            departure_code: Some("JFK".into()),
            arrival_code: Some("LAX".into()),
            passenger_class: Some(crate::entities::PassengerClass::Economy),
            ..Default::default()
        };
        let bound = binder()
            .bind(&registry(), Intent::FindFlights, &entities)
            .unwrap();
        let map = bound.params.to_map();

        assert_eq!(map["departure_code"], serde_json::json!("JFK"));
        assert_eq!(map["arrival_code"], serde_json::json!("LAX"));
        assert_eq!(map["passenger_class"], serde_json::json!("economy"));
        assert!(map["generation_cohort"].is_null());
    }

    #[test]
    fn test_intent_defaults_sort_attribute() {
        // "Show me the 5 shortest journeys": direction without a noun
        let entities = ExtractedEntities {
            sort_order: Some(SortOrder::Asc),
            limit: Some(5),
            ..Default::default()
        };
        let bound = binder()
            .bind(&registry(), Intent::ShortestJourneys, &entities)
            .unwrap();
        assert_eq!(
            bound.ordering,
            Some(OrderingClause::new(SortAttribute::Miles, SortOrder::Asc))
        );
        assert_eq!(bound.limit(), 5);
    }

    #[test]
    fn test_extracted_sort_overrides_template() {
        // "journeys with the least delay" under the generic delay intent
        let entities = ExtractedEntities {
            sort_order: Some(SortOrder::Asc),
            sort_attribute: Some(SortAttribute::Delay),
            ..Default::default()
        };
        let bound = binder()
            .bind(&registry(), Intent::DelayAnalysis, &entities)
            .unwrap();
        assert_eq!(
            bound.ordering,
            Some(OrderingClause::new(SortAttribute::Delay, SortOrder::Asc))
        );
    }

    #[test]
    fn test_statement_renders_ordering_and_limit() {
        let bound = binder()
            .bind(
                &registry(),
                Intent::MostDelayedFlights,
                &ExtractedEntities::default(),
            )
            .unwrap();
        assert!(bound
            .statement
            .contains("ORDER BY j.arrival_delay_minutes DESC, j.feedback_ID ASC"));
        assert!(bound.statement.ends_with("LIMIT $limit"));
    }
}
