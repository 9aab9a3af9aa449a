//! End-to-end question pipeline
//!
//! Per-question flow: entity extraction and intent classification (pure,
//! no I/O), parameter binding, concurrent dispatch of the two retrievers,
//! then combination. All shared state — lexicon, rule table, template
//! registry — is immutable after construction, so one pipeline serves any
//! number of concurrent questions. Callers wanting a deadline wrap `run`
//! in their own timeout; a single slow or failing retriever only narrows
//! the evidence, it never corrupts the other side's results.

use crate::config::RetrievalConfig;
use crate::entities::{EntityExtractor, Lexicon};
use crate::error::Result;
use crate::graph::GraphStore;
use crate::intent::IntentClassifier;
use crate::query::{ParameterBinder, TemplateRegistry};
use crate::retrieval::{
    combine, EvidenceBundle, RetrieveError, SemanticRetriever, SymbolicRetriever,
};
use crate::semantic::{EmbeddingProvider, JourneyIndex};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RetrievalPipeline {
    extractor: EntityExtractor,
    classifier: IntentClassifier,
    registry: Arc<TemplateRegistry>,
    binder: ParameterBinder,
    symbolic: SymbolicRetriever,
    semantic: SemanticRetriever,
}

impl RetrievalPipeline {
    /// Build the pipeline. The template registry is validated here over the
    /// full intent catalog, so a missing template is a startup failure and
    /// can never surface per question.
    pub fn new(
        config: &RetrievalConfig,
        store: Arc<dyn GraphStore>,
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<JourneyIndex>,
    ) -> Result<Self> {
        let registry = Arc::new(TemplateRegistry::new(config.default_limit)?);
        info!(
            templates = registry.len(),
            top_k = config.semantic_top_k,
            "retrieval pipeline ready"
        );

        Ok(Self {
            extractor: EntityExtractor::new(Arc::new(Lexicon::new()?)),
            classifier: IntentClassifier::new(),
            registry,
            binder: ParameterBinder::new(config.max_limit),
            symbolic: SymbolicRetriever::new(store),
            semantic: SemanticRetriever::new(
                provider,
                index,
                config.semantic_top_k,
                config.hnsw_ef_search,
            ),
        })
    }

    /// Answer one question with a combined evidence bundle.
    ///
    /// A single failing retriever is logged and recovered as an empty
    /// result; only both failing is an error. An empty evidence set is a
    /// valid "no information found" outcome, not a failure.
    pub async fn run(&self, question: &str) -> Result<EvidenceBundle> {
        let entities = self.extractor.extract(question);
        let intent = self.classifier.classify(question);
        debug!(intent = intent.as_str(), ?entities, "question understood");

        let bound = self.binder.bind(&self.registry, intent, &entities)?;

        let (symbolic, semantic) = tokio::join!(
            self.symbolic.retrieve(&bound),
            self.semantic.retrieve(question),
        );

        let (symbolic_rows, symbolic_failure) = recover("symbolic", symbolic);
        let (semantic_hits, semantic_failure) = recover("semantic", semantic);

        if let (Some(sym), Some(sem)) = (&symbolic_failure, &semantic_failure) {
            return Err(RetrieveError::TotalRetrievalFailure {
                symbolic: sym.to_string(),
                semantic: sem.to_string(),
            }
            .into());
        }

        let evidence = combine(symbolic_rows, semantic_hits);
        debug!(
            symbolic = evidence.symbolic_count,
            semantic = evidence.semantic_count,
            unique = evidence.combined_unique_count,
            "evidence combined"
        );

        Ok(EvidenceBundle {
            question: question.to_string(),
            intent,
            evidence,
        })
    }
}

/// Degrade a failed retriever to an empty result, remembering the error so
/// the caller can detect the both-failed case
fn recover<T>(
    side: &str,
    result: std::result::Result<Vec<T>, RetrieveError>,
) -> (Vec<T>, Option<RetrieveError>) {
    match result {
        Ok(items) => (items, None),
        Err(e) => {
            warn!("{} retrieval degraded to empty result: {}", side, e);
            (Vec::new(), Some(e))
        }
    }
}
