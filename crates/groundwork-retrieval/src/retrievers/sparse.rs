use std::sync::Arc;

use groundwork_core::errors::GroundResult;
use groundwork_core::models::{FilterSet, KnowledgeBaseId, ScoredChunk};
use groundwork_core::traits::{IRetriever, ISparseEncoder, ISparseIndex};
use tracing::debug;

use super::enforce_filter;

/// Encodes the query into term weights, then searches the sparse index.
/// The query is re-encoded on every call.
pub struct SparseRetriever {
    kb: KnowledgeBaseId,
    encoder: Arc<dyn ISparseEncoder>,
    index: Arc<dyn ISparseIndex>,
}

impl SparseRetriever {
    pub fn new(
        kb: KnowledgeBaseId,
        encoder: Arc<dyn ISparseEncoder>,
        index: Arc<dyn ISparseIndex>,
    ) -> Self {
        Self { kb, encoder, index }
    }
}

impl IRetriever for SparseRetriever {
    fn retrieve(&self, query: &str, filter: &FilterSet, k: usize) -> GroundResult<Vec<ScoredChunk>> {
        let vector = self.encoder.encode(query)?;
        if vector.is_empty() {
            debug!(kb = %self.kb, "empty sparse encoding, skipping index");
            return Ok(Vec::new());
        }
        let hits = self.index.sparse_search(&self.kb, &vector, filter, k)?;
        Ok(enforce_filter(self.name(), hits, filter))
    }

    fn name(&self) -> &str {
        "sparse"
    }
}
