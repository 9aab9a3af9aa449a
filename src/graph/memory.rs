//! In-memory graph store
//!
//! Evaluates the closed template catalog's filter, ordering and limit
//! semantics over a fixture row set. Useful for tests and offline runs;
//! a networked store implements the same [`GraphStore`] trait.

use crate::entities::SortOrder;
use crate::graph::{GraphStore, GraphStoreError, JourneyRow};
use crate::intent::Intent;
use crate::query::{BoundQuery, OrderingClause, QueryParameters};

pub struct MemoryGraphStore {
    rows: Vec<JourneyRow>,
}

impl MemoryGraphStore {
    pub fn new(rows: Vec<JourneyRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, for feeding an index builder
    pub fn rows(&self) -> &[JourneyRow] {
        &self.rows
    }
}

impl GraphStore for MemoryGraphStore {
    fn execute(&self, query: &BoundQuery) -> Result<Vec<JourneyRow>, GraphStoreError> {
        let mut out: Vec<JourneyRow> = self
            .rows
            .iter()
            .filter(|row| row_matches(query.intent, &query.params, row))
            .cloned()
            .collect();

        sort_rows(&mut out, query.ordering.as_ref());
        out.truncate(query.limit());
        Ok(out)
    }
}

/// Conjunction of the optional filter slots plus the intent's structural
/// predicate. An unconstrained slot matches every row.
fn row_matches(intent: Intent, params: &QueryParameters, row: &JourneyRow) -> bool {
    let departure_ok = match &params.departure_code {
        None => true,
        // Airport questions match a station on either end
        Some(code) if intent == Intent::AirportInfo => {
            row.departure_airport.eq_ignore_ascii_case(code)
                || row.arrival_airport.eq_ignore_ascii_case(code)
        }
        Some(code) => row.departure_airport.eq_ignore_ascii_case(code),
    };

    let arrival_ok = params
        .arrival_code
        .as_ref()
        .is_none_or(|code| row.arrival_airport.eq_ignore_ascii_case(code));

    let class_ok = params
        .passenger_class
        .is_none_or(|c| row.passenger_class.eq_ignore_ascii_case(c.as_str()));

    let cohort_ok = params
        .generation_cohort
        .is_none_or(|g| row.generation.eq_ignore_ascii_case(g.as_str()));

    let structural_ok = match intent {
        Intent::MostDelayedFlights => row.arrival_delay_minutes > 0,
        Intent::MultiLegFlights => row.number_of_legs > 1,
        _ => true,
    };

    departure_ok && arrival_ok && class_ok && cohort_ok && structural_ok
}

/// Ordering clause with the ascending-identifier tie-break; rows without a
/// clause fall back to identifier order so results stay reproducible.
fn sort_rows(rows: &mut [JourneyRow], ordering: Option<&OrderingClause>) {
    match ordering {
        Some(clause) => rows.sort_by(|a, b| {
            let ka = a.sort_value(clause.attribute);
            let kb = b.sort_value(clause.attribute);
            let primary = match clause.order {
                SortOrder::Asc => ka.cmp(&kb),
                SortOrder::Desc => kb.cmp(&ka),
            };
            primary.then_with(|| a.feedback_id.cmp(&b.feedback_id))
        }),
        None => rows.sort_by(|a, b| a.feedback_id.cmp(&b.feedback_id)),
    }
}
