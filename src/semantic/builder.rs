//! Batch construction of the journey vector index

use crate::error::Result;
use crate::graph::JourneyRow;
use crate::semantic::{EmbeddingProvider, JourneyIndex, RecordScope};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one index build
#[derive(Debug)]
pub struct BuildReport {
    pub indexed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Embeds journey summaries in batches and fills a [`JourneyIndex`]
pub struct IndexBuilder {
    provider: Arc<dyn EmbeddingProvider>,
    index: Arc<JourneyIndex>,
    batch_size: usize,
}

impl IndexBuilder {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<JourneyIndex>,
        batch_size: usize,
    ) -> Self {
        Self {
            provider,
            index,
            batch_size: batch_size.max(1),
        }
    }

    /// Embed and index every row. A failing batch is logged and skipped;
    /// the rest of the build continues.
    pub async fn build(&self, rows: Vec<JourneyRow>) -> Result<BuildReport> {
        let start = std::time::Instant::now();
        let total = rows.len();
        info!("Indexing {} journeys with {}", total, self.provider.model_name());

        let mut indexed = 0;
        let mut failed = 0;

        for chunk in rows.chunks(self.batch_size) {
            let summaries: Vec<String> = chunk.iter().map(describe_journey).collect();

            match self.provider.embed_batch(&summaries) {
                Ok(vectors) => {
                    for (row, vector) in chunk.iter().zip(vectors.iter()) {
                        self.index
                            .insert(RecordScope::Journey, row.clone(), vector)?;
                        indexed += 1;
                    }
                    debug!("Indexed batch of {} journeys", chunk.len());
                }
                Err(e) => {
                    warn!("Failed to embed batch of {}: {}", chunk.len(), e);
                    failed += chunk.len();
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Index build complete: {} indexed, {} failed, {}ms",
            indexed, failed, duration_ms
        );

        Ok(BuildReport {
            indexed,
            failed,
            duration_ms,
        })
    }
}

/// Natural-language summary of a journey; this is the text that gets
/// embedded, and it never leaves the index.
pub fn describe_journey(row: &JourneyRow) -> String {
    format!(
        "Journey from {} to {}. Passenger class: {}. Generation: {}. \
         Fleet type: {}. Arrival delay: {} minutes. Flown miles: {}. \
         Number of legs: {}. Food satisfaction score: {}.",
        row.departure_airport,
        row.arrival_airport,
        row.passenger_class,
        row.generation,
        row.fleet_type,
        row.arrival_delay_minutes,
        row.actual_flown_miles,
        row.number_of_legs,
        row.food_satisfaction_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::EmbeddingError;

    /// Deterministic provider: spreads text bytes over the vector
    struct StubProvider {
        dimension: usize,
    }

    impl EmbeddingProvider for StubProvider {
        fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError> {
            if text.is_empty() {
                return Err(EmbeddingError::EmptyInput);
            }
            let mut v = vec![0.0f32; self.dimension];
            for (i, b) in text.bytes().enumerate() {
                v[i % self.dimension] += f32::from(b) / 255.0;
            }
            Ok(v)
        }

        fn embed_batch(
            &self,
            texts: &[String],
        ) -> std::result::Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn test_row(id: &str, delay: i64) -> JourneyRow {
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
            generation: "Millennial".to_string(),
            loyalty_level: "Silver".to_string(),
            record_locator: "LOC-1".to_string(),
        }
    }

    #[test]
    fn test_describe_journey() {
        let text = describe_journey(&test_row("J_1", 45));
        assert!(text.starts_with("Journey from CAI to DXB."));
        assert!(text.contains("Arrival delay: 45 minutes."));
        assert!(text.contains("Passenger class: Economy."));
    }

    #[tokio::test]
    async fn test_build_indexes_all_rows() {
        let provider = Arc::new(StubProvider { dimension: 16 });
        let index = Arc::new(JourneyIndex::new(16, 200, 16));
        let builder = IndexBuilder::new(provider, index.clone(), 2);

        let rows = vec![
            test_row("J_1", 10),
            test_row("J_2", 20),
            test_row("J_3", 30),
        ];
        let report = builder.build(rows).await.unwrap();

        assert_eq!(report.indexed, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(index.len(RecordScope::Journey), 3);
    }
}
