use crate::errors::GroundResult;
use crate::models::{Chunk, FilterSet, KnowledgeBaseId, ScoredChunk, SparseVector};

/// Neighbor scan parameters: every chunk of `doc_id` whose sequence number
/// lies in `[chunk_num - window, chunk_num + window]`, excluding `chunk_num`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborQuery {
    pub doc_id: String,
    pub chunk_num: i64,
    pub window: usize,
}

impl NeighborQuery {
    pub fn new(doc_id: impl Into<String>, chunk_num: i64, window: usize) -> Self {
        Self {
            doc_id: doc_id.into(),
            chunk_num,
            window,
        }
    }

    /// Inclusive sequence-number bounds of the scan.
    pub fn range(&self) -> (i64, i64) {
        let w = i64::try_from(self.window).unwrap_or(i64::MAX);
        (
            self.chunk_num.saturating_sub(w),
            self.chunk_num.saturating_add(w),
        )
    }
}

/// A backing store holding dense chunk embeddings.
pub trait IChunkStore: Send + Sync {
    /// Similarity search: top `k` chunks of the knowledge base passing `filter`,
    /// sorted by descending backend score.
    fn dense_search(
        &self,
        kb: &KnowledgeBaseId,
        embedding: &[f32],
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>>;

    /// Range scan by document id and sequence number. Order is not guaranteed.
    fn neighbor_scan(&self, kb: &KnowledgeBaseId, query: &NeighborQuery)
        -> GroundResult<Vec<Chunk>>;

    fn name(&self) -> &str;
}

/// A term-weighted sparse index. Only the primary store provides one.
pub trait ISparseIndex: Send + Sync {
    fn sparse_search(
        &self,
        kb: &KnowledgeBaseId,
        vector: &SparseVector,
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>>;

    fn name(&self) -> &str;
}
