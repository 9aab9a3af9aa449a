//! Question-understanding integration: extraction, classification, binding

use skyrag::entities::{
    EntityExtractor, ExtractedEntities, Lexicon, PassengerClass, SortAttribute, SortOrder,
};
use skyrag::intent::{Intent, IntentClassifier};
use skyrag::query::{ParameterBinder, TemplateRegistry};
use std::sync::Arc;

fn extractor() -> EntityExtractor {
    EntityExtractor::new(Arc::new(Lexicon::new().unwrap()))
}

fn understand(question: &str) -> (Intent, ExtractedEntities) {
    (
        IntentClassifier::new().classify(question),
        extractor().extract(question),
    )
}

#[test]
fn test_longest_delays_scenario() {
    let (intent, entities) = understand("Which flights had the longest delays?");

    assert_eq!(intent, Intent::MostDelayedFlights);
    assert_eq!(entities.sort_order, Some(SortOrder::Desc));
    assert_eq!(entities.sort_attribute, Some(SortAttribute::Delay));
    assert_eq!(entities.limit, None);

    let registry = TemplateRegistry::new(10).unwrap();
    let bound = ParameterBinder::new(100)
        .bind(&registry, intent, &entities)
        .unwrap();

    assert_eq!(bound.limit(), 10);
    assert!(bound
        .statement
        .contains("ORDER BY j.arrival_delay_minutes DESC"));
}

#[test]
fn test_five_shortest_journeys_scenario() {
    let (intent, entities) = understand("Show me the 5 shortest journeys");

    assert_eq!(intent, Intent::ShortestJourneys);
    assert_eq!(entities.sort_order, Some(SortOrder::Asc));
    assert_eq!(entities.limit, Some(5));

    let registry = TemplateRegistry::new(10).unwrap();
    let bound = ParameterBinder::new(100)
        .bind(&registry, intent, &entities)
        .unwrap();

    assert_eq!(bound.limit(), 5);
    // the intent supplies the miles attribute the question left implicit
    assert!(bound
        .statement
        .contains("ORDER BY j.actual_flown_miles ASC"));
}

#[test]
fn test_route_with_class_scenario() {
    let (intent, entities) = understand("economy class flights from JFK to LAX");

    assert_eq!(intent, Intent::FindFlights);
    assert_eq!(entities.departure_code.as_deref(), Some("JFK"));
    assert_eq!(entities.arrival_code.as_deref(), Some("LAX"));
    assert_eq!(entities.passenger_class, Some(PassengerClass::Economy));

    let registry = TemplateRegistry::new(10).unwrap();
    let bound = ParameterBinder::new(100)
        .bind(&registry, intent, &entities)
        .unwrap();
    let map = bound.params.to_map();

    assert_eq!(map["departure_code"], serde_json::json!("JFK"));
    assert_eq!(map["arrival_code"], serde_json::json!("LAX"));
    assert_eq!(map["passenger_class"], serde_json::json!("economy"));
    assert!(map["generation_cohort"].is_null());
}

#[test]
fn test_stoplisted_abbreviation_never_a_code() {
    let entities = extractor().extract("Do GEN Z flyers in ECO complain about BIZ seats?");
    assert_eq!(entities.departure_code, None);
    assert_eq!(entities.arrival_code, None);
}

#[test]
fn test_classification_is_total_and_unique() {
    let classifier = IntentClassifier::new();
    let questions = [
        "",
        "hello",
        "Which flights had the longest delays?",
        "average food score for millennials",
        "anything about airports?",
        "???",
        "12345",
    ];
    for q in questions {
        // classify returns exactly one intent for any input
        let _ = classifier.classify(q);
    }
}

#[test]
fn test_extracted_limit_is_always_positive() {
    let e = extractor();
    for q in ["top 0 flights", "the 0 journeys", "limit 0"] {
        assert_eq!(e.extract(q).limit, None);
    }
    for q in ["top 3 flights", "first 12 journeys", "limit 40"] {
        let limit = e.extract(q).limit.unwrap();
        assert!(limit > 0);
    }
}

#[test]
fn test_overlapping_limit_cues_first_declared_wins() {
    let e = extractor().extract("show the top 5 out of the 10 delayed journeys");
    assert_eq!(e.limit, Some(5));
}

#[test]
fn test_binding_covers_every_intent() {
    let registry = TemplateRegistry::new(10).unwrap();
    let binder = ParameterBinder::new(100);
    for intent in Intent::ALL {
        let bound = binder
            .bind(&registry, intent, &ExtractedEntities::default())
            .unwrap();
        assert_eq!(bound.limit(), 10);
        assert_eq!(bound.params.to_map().len(), 5);
    }
}
