//! Semantic retrieval support: embeddings and the vector index
//!
//! Architecture:
//! - [`EmbeddingProvider`] trait abstracting the text → vector map
//! - [`FastEmbedProvider`] for local embedding generation
//! - [`JourneyIndex`]: HNSW cosine index scoped by record type, storing
//!   payloads already normalized to the symbolic row shape
//! - [`IndexBuilder`]: batch embedding of journey summaries

mod builder;
mod index;
mod provider;

pub use builder::{describe_journey, BuildReport, IndexBuilder};
pub use index::{IndexError, JourneyIndex, RecordScope, SemanticHit};
pub use provider::{EmbeddingError, EmbeddingProvider, FastEmbedProvider};
