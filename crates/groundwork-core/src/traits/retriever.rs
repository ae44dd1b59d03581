use crate::errors::GroundResult;
use crate::models::{FilterSet, ScoredChunk};

/// One retrieval strategy bound to one backing store.
pub trait IRetriever: Send + Sync {
    /// Retrieve chunks for `query`, most relevant first. Single-store
    /// retrievers return at most `k`; ensembles return the fused union of
    /// their members' `k`-sized lists.
    fn retrieve(&self, query: &str, filter: &FilterSet, k: usize)
        -> GroundResult<Vec<ScoredChunk>>;

    /// Name used in logs and error context.
    fn name(&self) -> &str;
}
