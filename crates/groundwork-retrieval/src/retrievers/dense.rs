use std::sync::Arc;

use groundwork_core::errors::GroundResult;
use groundwork_core::models::{FilterSet, KnowledgeBaseId, ScoredChunk};
use groundwork_core::traits::{IChunkStore, IEmbedder, IRetriever};

use super::enforce_filter;

/// Embeds the query, then runs a similarity search on one store.
pub struct DenseRetriever {
    name: String,
    kb: KnowledgeBaseId,
    embedder: Arc<dyn IEmbedder>,
    store: Arc<dyn IChunkStore>,
}

impl DenseRetriever {
    pub fn new(
        name: impl Into<String>,
        kb: KnowledgeBaseId,
        embedder: Arc<dyn IEmbedder>,
        store: Arc<dyn IChunkStore>,
    ) -> Self {
        Self {
            name: name.into(),
            kb,
            embedder,
            store,
        }
    }
}

impl IRetriever for DenseRetriever {
    fn retrieve(&self, query: &str, filter: &FilterSet, k: usize) -> GroundResult<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(query)?;
        let hits = self.store.dense_search(&self.kb, &embedding, filter, k)?;
        Ok(enforce_filter(&self.name, hits, filter))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
