//! Hybrid retrieval: symbolic + semantic execution and evidence merging
//!
//! The two retrievers are mutually independent and dispatched together;
//! one failing degrades the answer to the other's results instead of
//! failing the question. Their outputs merge into a single deduplicated,
//! provenance-tagged evidence set.

mod combiner;
mod pipeline;
mod semantic;
mod symbolic;

pub use combiner::combine;
pub use pipeline::RetrievalPipeline;
pub use semantic::SemanticRetriever;
pub use symbolic::SymbolicRetriever;

use crate::graph::{GraphStoreError, JourneyRow};
use crate::intent::Intent;
use crate::semantic::{EmbeddingError, IndexError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error("symbolic retrieval failed: {0}")]
    Store(#[from] GraphStoreError),

    #[error("question embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("semantic retrieval failed: {0}")]
    Index(#[from] IndexError),

    /// Both retrievers failed; there is no evidence to merge
    #[error("all retrieval failed - symbolic: {symbolic}; semantic: {semantic}")]
    TotalRetrievalFailure { symbolic: String, semantic: String },
}

/// Which retriever(s) produced an evidence record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Symbolic,
    Semantic,
    Both,
}

/// One deduplicated evidence item: a flattened journey row tagged with its
/// provenance and, for semantic matches, the best similarity seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(flatten)]
    pub row: JourneyRow,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl EvidenceRecord {
    /// Stable record identifier; unique within a combined set
    pub fn id(&self) -> &str {
        &self.row.feedback_id
    }
}

/// Ordered, duplicate-free evidence with summary counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedEvidenceSet {
    pub records: Vec<EvidenceRecord>,
    /// Raw result count from the symbolic retriever
    pub symbolic_count: usize,
    /// Raw result count from the semantic retriever
    pub semantic_count: usize,
    /// Records surviving deduplication
    pub combined_unique_count: usize,
}

impl CombinedEvidenceSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The full handoff to the generation collaborator: the original question,
/// its classified intent, and the combined evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub question: String,
    pub intent: Intent,
    pub evidence: CombinedEvidenceSet,
}
