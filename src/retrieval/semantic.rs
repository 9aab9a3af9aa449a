//! Approximate similarity retrieval over journey embeddings

use crate::retrieval::RetrieveError;
use crate::semantic::{EmbeddingProvider, JourneyIndex, RecordScope, SemanticHit};
use std::sync::Arc;
use tracing::debug;

/// Embeds the raw question and queries the journey-scoped index.
///
/// `top_k` is the semantic recall width, a system constant configured at
/// startup. It is deliberately independent of any limit extracted from the
/// question; only the symbolic cap is user-controlled.
pub struct SemanticRetriever {
    provider: Arc<dyn EmbeddingProvider>,
    index: Arc<JourneyIndex>,
    top_k: usize,
    ef_search: usize,
}

impl SemanticRetriever {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<JourneyIndex>,
        top_k: usize,
        ef_search: usize,
    ) -> Self {
        Self {
            provider,
            index,
            top_k,
            ef_search,
        }
    }

    /// Top-K nearest journeys for a question, similarity descending.
    /// Hits come back already normalized to the symbolic row shape.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SemanticHit>, RetrieveError> {
        let vector = self.provider.embed(question)?;
        let hits = self
            .index
            .search(RecordScope::Journey, &vector, self.top_k, self.ef_search)?;

        debug!(hits = hits.len(), k = self.top_k, "semantic retrieval complete");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::JourneyRow;
    use crate::semantic::EmbeddingError;

    struct FixedProvider {
        dimension: usize,
    }

    impl EmbeddingProvider for FixedProvider {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if text.is_empty() {
                return Err(EmbeddingError::EmptyInput);
            }
            let mut v = vec![0.0f32; self.dimension];
            for (i, b) in text.bytes().enumerate() {
                v[i % self.dimension] += f32::from(b) / 255.0;
            }
            Ok(v)
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn row(id: &str) -> JourneyRow {
        JourneyRow {
            feedback_id: id.to_string(),
            passenger_class: "Economy".to_string(),
            food_satisfaction_score: 3,
            arrival_delay_minutes: 15,
            actual_flown_miles: 900,
            number_of_legs: 1,
            flight_number: "BA250".to_string(),
            fleet_type: "B777".to_string(),
            departure_airport: "LHR".to_string(),
            arrival_airport: "JFK".to_string(),
            generation: "Boomer".to_string(),
            loyalty_level: "Gold".to_string(),
            record_locator: "XYZ789".to_string(),
        }
    }

    #[tokio::test]
    async fn test_top_k_is_fixed() {
        let provider = Arc::new(FixedProvider { dimension: 16 });
        let index = Arc::new(JourneyIndex::new(16, 200, 16));
        for i in 0..6 {
            let vector = provider.embed(&format!("journey number {i}")).unwrap();
            index
                .insert(RecordScope::Journey, row(&format!("J_{i}")), &vector)
                .unwrap();
        }

        let retriever = SemanticRetriever::new(provider, index, 3, 50);
        let hits = retriever.retrieve("a delayed journey").await.unwrap();
        assert_eq!(hits.len(), 3);
        // similarity descending
        assert!(hits[0].similarity >= hits[1].similarity);
        assert!(hits[1].similarity >= hits[2].similarity);
    }

    #[tokio::test]
    async fn test_empty_index_yields_no_hits() {
        let provider = Arc::new(FixedProvider { dimension: 16 });
        let index = Arc::new(JourneyIndex::new(16, 200, 16));
        let retriever = SemanticRetriever::new(provider, index, 5, 50);

        let hits = retriever.retrieve("anything at all").await.unwrap();
        assert!(hits.is_empty());
    }
}
