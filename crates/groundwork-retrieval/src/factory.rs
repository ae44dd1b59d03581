//! Per-request retriever construction and strategy selection.

use std::sync::Arc;

use groundwork_core::constants::ENSEMBLE_WEIGHTS;
use groundwork_core::models::{KnowledgeBaseId, RetrieverType};
use groundwork_core::traits::IRetriever;

use crate::context::BackendContext;
use crate::retrievers::{DenseRetriever, EnsembleRetriever, SparseRetriever};

/// What to do when the primary attempt reports the backend unavailable.
#[derive(Clone)]
pub enum FallbackRoute {
    /// Try this retriever, bound to the secondary store, exactly once.
    Secondary(Arc<dyn IRetriever>),
    /// The strategy has a single backing index.
    Unavailable,
}

/// The retriever pair chosen for one request.
#[derive(Clone)]
pub struct RetrievalPlan {
    pub strategy: RetrieverType,
    pub primary: Arc<dyn IRetriever>,
    pub fallback: FallbackRoute,
}

/// Every retrieval handle for one knowledge base.
pub struct RetrieverSet {
    pub sparse: Arc<dyn IRetriever>,
    pub primary_dense: Arc<dyn IRetriever>,
    pub secondary_dense: Arc<dyn IRetriever>,
    pub primary_ensemble: Arc<dyn IRetriever>,
    pub secondary_ensemble: Arc<dyn IRetriever>,
}

impl RetrieverSet {
    pub fn select(self, strategy: RetrieverType) -> RetrievalPlan {
        let (primary, fallback) = match strategy {
            RetrieverType::Dense => (
                self.primary_dense,
                FallbackRoute::Secondary(self.secondary_dense),
            ),
            RetrieverType::Sparse => (self.sparse, FallbackRoute::Unavailable),
            RetrieverType::Ensemble => (
                self.primary_ensemble,
                FallbackRoute::Secondary(self.secondary_ensemble),
            ),
        };
        RetrievalPlan {
            strategy,
            primary,
            fallback,
        }
    }
}

pub struct RetrieverFactory<'a> {
    context: &'a BackendContext,
    rrf_c: u32,
}

impl<'a> RetrieverFactory<'a> {
    pub fn new(context: &'a BackendContext, rrf_c: u32) -> Self {
        Self { context, rrf_c }
    }

    /// Both ensembles share the one sparse index; each pairs it with its own
    /// store's dense retriever, sparse first.
    pub fn build(&self, kb: &KnowledgeBaseId) -> RetrieverSet {
        let ctx = self.context;
        let sparse: Arc<dyn IRetriever> = Arc::new(SparseRetriever::new(
            kb.clone(),
            ctx.sparse_encoder.clone(),
            ctx.sparse_index.clone(),
        ));
        let primary_dense: Arc<dyn IRetriever> = Arc::new(DenseRetriever::new(
            "primary-dense",
            kb.clone(),
            ctx.embedder.clone(),
            ctx.primary.clone(),
        ));
        let secondary_dense: Arc<dyn IRetriever> = Arc::new(DenseRetriever::new(
            "secondary-dense",
            kb.clone(),
            ctx.embedder.clone(),
            ctx.secondary.clone(),
        ));

        let [sparse_weight, dense_weight] = ENSEMBLE_WEIGHTS;
        let ensemble = |name: &str, dense: &Arc<dyn IRetriever>| -> Arc<dyn IRetriever> {
            Arc::new(EnsembleRetriever::new(
                name,
                vec![(sparse.clone(), sparse_weight), (dense.clone(), dense_weight)],
                self.rrf_c,
            ))
        };
        let primary_ensemble = ensemble("primary-ensemble", &primary_dense);
        let secondary_ensemble = ensemble("secondary-ensemble", &secondary_dense);

        RetrieverSet {
            sparse,
            primary_dense,
            secondary_dense,
            primary_ensemble,
            secondary_ensemble,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_fixtures::{MockChunkStore, MockEmbedder, MockSparseEncoder, MockSparseIndex};

    use super::*;

    fn context() -> BackendContext {
        BackendContext::new(
            Arc::new(MockEmbedder::default()),
            Arc::new(MockSparseEncoder::new()),
            Arc::new(MockSparseIndex::new(Vec::new())),
            Arc::new(MockChunkStore::new("primary")),
            Arc::new(MockChunkStore::new("secondary")),
        )
    }

    fn plan(strategy: RetrieverType) -> RetrievalPlan {
        let ctx = context();
        let kb = KnowledgeBaseId::new("kb").unwrap();
        RetrieverFactory::new(&ctx, 60).build(&kb).select(strategy)
    }

    #[test]
    fn dense_pairs_both_dense_retrievers() {
        let plan = plan(RetrieverType::Dense);
        assert_eq!(plan.primary.name(), "primary-dense");
        assert!(matches!(plan.fallback, FallbackRoute::Secondary(ref r) if r.name() == "secondary-dense"));
    }

    #[test]
    fn sparse_has_no_fallback() {
        let plan = plan(RetrieverType::Sparse);
        assert_eq!(plan.primary.name(), "sparse");
        assert!(matches!(plan.fallback, FallbackRoute::Unavailable));
    }

    #[test]
    fn ensemble_pairs_both_ensembles() {
        let plan = plan(RetrieverType::Ensemble);
        assert_eq!(plan.primary.name(), "primary-ensemble");
        assert!(matches!(plan.fallback, FallbackRoute::Secondary(ref r) if r.name() == "secondary-ensemble"));
    }
}
