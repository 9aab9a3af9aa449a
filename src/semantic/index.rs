//! HNSW vector index scoped by record type
//!
//! Cosine similarity over precomputed journey embeddings. Payloads are
//! stored in the symbolic row shape; embedding text and raw vectors are
//! retrieval-internal and never appear in a returned hit.

use crate::graph::JourneyRow;
use ahash::AHashMap;
use hnsw_rs::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;

/// Index capacity hint and layer cap for HNSW graph construction
const MAX_ELEMENTS: usize = 10_000;
const MAX_LAYER: usize = 16;

#[derive(Error, Debug)]
pub enum IndexError {
    /// The index cannot be reached or is not built; recovered upstream as
    /// an empty semantic result
    #[error("vector index unavailable: {0}")]
    Unavailable(String),

    #[error("invalid dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}

/// Record type a nearest-neighbor search is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordScope {
    Journey,
    Flight,
    Airport,
    Passenger,
}

impl RecordScope {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordScope::Journey => "journey",
            RecordScope::Flight => "flight",
            RecordScope::Airport => "airport",
            RecordScope::Passenger => "passenger",
        }
    }
}

/// One nearest-neighbor match, already normalized to the symbolic shape
#[derive(Debug, Clone)]
pub struct SemanticHit {
    pub id: String,
    /// Cosine similarity in [0, 1], higher is more similar
    pub similarity: f32,
    pub row: JourneyRow,
}

struct ScopeIndex {
    hnsw: Hnsw<'static, f32, DistCosine>,
    payloads: Vec<JourneyRow>,
}

/// Scope-partitioned HNSW index over journey embeddings
pub struct JourneyIndex {
    dimension: usize,
    ef_construction: usize,
    m: usize,
    scopes: RwLock<AHashMap<RecordScope, ScopeIndex>>,
}

impl JourneyIndex {
    /// # Arguments
    /// * `dimension` - vector dimension, must match the embedding model
    /// * `ef_construction` - HNSW build parameter (higher = better recall)
    /// * `m` - HNSW connections per layer
    pub fn new(dimension: usize, ef_construction: usize, m: usize) -> Self {
        Self {
            dimension,
            ef_construction,
            m,
            scopes: RwLock::new(AHashMap::new()),
        }
    }

    /// Insert a record with its embedding vector under a scope
    pub fn insert(
        &self,
        scope: RecordScope,
        row: JourneyRow,
        vector: &[f32],
    ) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::InvalidDimension {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let mut scopes = self.scopes.write().unwrap();
        let entry = scopes.entry(scope).or_insert_with(|| ScopeIndex {
            hnsw: Hnsw::<f32, DistCosine>::new(
                self.m,
                MAX_ELEMENTS,
                MAX_LAYER,
                self.ef_construction,
                DistCosine,
            ),
            payloads: Vec::new(),
        });

        let data = vector.to_vec();
        let slot = entry.payloads.len();
        entry.hnsw.insert((&data, slot));
        entry.payloads.push(row);
        Ok(())
    }

    /// Search the k nearest neighbors within a scope, similarity descending.
    ///
    /// A scope with no indexed records yields an empty result, not an error.
    pub fn search(
        &self,
        scope: RecordScope,
        query: &[f32],
        k: usize,
        ef_search: usize,
    ) -> Result<Vec<SemanticHit>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::InvalidDimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let scopes = self.scopes.read().unwrap();
        let entry = match scopes.get(&scope) {
            Some(entry) => entry,
            None => return Ok(Vec::new()),
        };

        let neighbours = entry.hnsw.search(query, k, ef_search);
        let hits = neighbours
            .into_iter()
            .filter_map(|n| {
                entry.payloads.get(n.d_id).map(|row| SemanticHit {
                    id: row.feedback_id.clone(),
                    similarity: (1.0 - n.distance).clamp(0.0, 1.0),
                    row: row.clone(),
                })
            })
            .collect();

        Ok(hits)
    }

    /// Number of records indexed under a scope
    pub fn len(&self, scope: RecordScope) -> usize {
        self.scopes
            .read()
            .unwrap()
            .get(&scope)
            .map_or(0, |entry| entry.payloads.len())
    }

    pub fn is_empty(&self, scope: RecordScope) -> bool {
        self.len(scope) == 0
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
