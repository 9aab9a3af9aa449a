//! Merging symbolic rows and semantic hits into one evidence set

use crate::graph::JourneyRow;
use crate::retrieval::{CombinedEvidenceSet, EvidenceRecord, Origin};
use crate::semantic::SemanticHit;
use ahash::AHashMap;

/// Merge the two result lists, deduplicating by record identifier.
///
/// Symbolic rows are inserted first: exact structural matches are the
/// stronger evidence, so when an identifier appears on both sides the
/// symbolic attribute values are kept, the origin is upgraded to `Both`,
/// and the best similarity seen is attached. Empty inputs merge to an
/// empty set; that is a valid "no information found" outcome.
pub fn combine(symbolic: Vec<JourneyRow>, semantic: Vec<SemanticHit>) -> CombinedEvidenceSet {
    let symbolic_count = symbolic.len();
    let semantic_count = semantic.len();

    let mut records: Vec<EvidenceRecord> = Vec::with_capacity(symbolic_count + semantic_count);
    let mut slots: AHashMap<String, usize> = AHashMap::with_capacity(symbolic_count + semantic_count);

    for row in symbolic {
        if slots.contains_key(&row.feedback_id) {
            continue;
        }
        slots.insert(row.feedback_id.clone(), records.len());
        records.push(EvidenceRecord {
            row,
            origin: Origin::Symbolic,
            similarity: None,
        });
    }

    for hit in semantic {
        match slots.get(&hit.id) {
            Some(&slot) => {
                let record = &mut records[slot];
                if record.origin == Origin::Symbolic {
                    record.origin = Origin::Both;
                }
                record.similarity = Some(match record.similarity {
                    Some(existing) => existing.max(hit.similarity),
                    None => hit.similarity,
                });
            }
            None => {
                slots.insert(hit.id.clone(), records.len());
                records.push(EvidenceRecord {
                    row: hit.row,
                    origin: Origin::Semantic,
                    similarity: Some(hit.similarity),
                });
            }
        }
    }

    let combined_unique_count = records.len();
    CombinedEvidenceSet {
        records,
        symbolic_count,
        semantic_count,
        combined_unique_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, delay: i64) -> JourneyRow {
        JourneyRow {
            feedback_id: id.to_string(),
            passenger_class: "Economy".to_string(),
            food_satisfaction_score: 2,
            arrival_delay_minutes: delay,
            actual_flown_miles: 1400,
            number_of_legs: 1,
            flight_number: "MS985".to_string(),
            fleet_type: "A320".to_string(),
            departure_airport: "CAI".to_string(),
            arrival_airport: "DXB".to_string(),
            generation: "Gen Z".to_string(),
            loyalty_level: "Silver".to_string(),
            record_locator: "LOC".to_string(),
        }
    }

    fn hit(id: &str, similarity: f32, delay: i64) -> SemanticHit {
        SemanticHit {
            id: id.to_string(),
            similarity,
            row: row(id, delay),
        }
    }

    #[test]
    fn test_empty_inputs_merge_to_empty_set() {
        let combined = combine(vec![], vec![]);
        assert!(combined.is_empty());
        assert_eq!(combined.symbolic_count, 0);
        assert_eq!(combined.semantic_count, 0);
        assert_eq!(combined.combined_unique_count, 0);
    }

    #[test]
    fn test_symbolic_comes_first() {
        let combined = combine(vec![row("J_1", 10)], vec![hit("J_2", 0.8, 20)]);
        assert_eq!(combined.records.len(), 2);
        assert_eq!(combined.records[0].id(), "J_1");
        assert_eq!(combined.records[0].origin, Origin::Symbolic);
        assert_eq!(combined.records[1].id(), "J_2");
        assert_eq!(combined.records[1].origin, Origin::Semantic);
        assert_eq!(combined.records[1].similarity, Some(0.8));
    }

    #[test]
    fn test_overlap_upgrades_to_both_and_keeps_symbolic_values() {
        // symbolic and semantic disagree on the delay for J_1
        let combined = combine(vec![row("J_1", 104)], vec![hit("J_1", 0.83, 999)]);

        assert_eq!(combined.combined_unique_count, 1);
        let record = &combined.records[0];
        assert_eq!(record.origin, Origin::Both);
        assert_eq!(record.row.arrival_delay_minutes, 104);
        assert_eq!(record.similarity, Some(0.83));
    }

    #[test]
    fn test_best_similarity_wins() {
        let combined = combine(
            vec![row("J_1", 10)],
            vec![hit("J_1", 0.61, 10), hit("J_1", 0.92, 10)],
        );
        assert_eq!(combined.combined_unique_count, 1);
        assert_eq!(combined.records[0].similarity, Some(0.92));
    }

    #[test]
    fn test_no_duplicate_identifiers() {
        let combined = combine(
            vec![row("J_1", 10), row("J_1", 10), row("J_2", 5)],
            vec![hit("J_2", 0.7, 5), hit("J_3", 0.6, 1)],
        );

        let mut ids: Vec<&str> = combined.records.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), combined.records.len());
        assert_eq!(combined.combined_unique_count, 3);
    }

    #[test]
    fn test_counts_report_raw_sizes() {
        let combined = combine(
            vec![row("J_1", 10), row("J_2", 5)],
            vec![hit("J_1", 0.9, 10)],
        );
        assert_eq!(combined.symbolic_count, 2);
        assert_eq!(combined.semantic_count, 1);
        assert_eq!(combined.combined_unique_count, 2);
    }
}
