//! Deterministic pattern-matching retrieval against the graph store

use crate::graph::{GraphStore, JourneyRow};
use crate::query::BoundQuery;
use crate::retrieval::RetrieveError;
use std::sync::Arc;
use tracing::debug;

/// Executes bound queries and enforces the determinism contract
pub struct SymbolicRetriever {
    store: Arc<dyn GraphStore>,
}

impl SymbolicRetriever {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Run a bound query. At most `limit` rows come back, ordered by the
    /// effective clause with identifier-ascending tie-breaks regardless of
    /// what order the store returned. An empty result is a valid
    /// "no structural match", not an error.
    pub async fn retrieve(&self, query: &BoundQuery) -> Result<Vec<JourneyRow>, RetrieveError> {
        let mut rows = self.store.execute(query)?;

        enforce_order(&mut rows, query);
        rows.truncate(query.limit());

        debug!(
            intent = query.intent.as_str(),
            rows = rows.len(),
            "symbolic retrieval complete"
        );
        Ok(rows)
    }
}

/// Stable re-sort by the effective ordering and natural key. A well-behaved
/// store already returns this order; re-applying it keeps results identical
/// across store implementations.
fn enforce_order(rows: &mut [JourneyRow], query: &BoundQuery) {
    use crate::entities::SortOrder;

    match &query.ordering {
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
