//! [`IRetriever`](groundwork_core::traits::IRetriever) adapters, one per
//! strategy and store.

mod dense;
mod ensemble;
mod sparse;

pub use dense::DenseRetriever;
pub use ensemble::{weighted_rrf, EnsembleRetriever};
pub use sparse::SparseRetriever;

use groundwork_core::models::{FilterSet, ScoredChunk};
use tracing::debug;

/// Drop hits the backend returned despite the filter.
fn enforce_filter(name: &str, hits: Vec<ScoredChunk>, filter: &FilterSet) -> Vec<ScoredChunk> {
    let before = hits.len();
    let kept: Vec<ScoredChunk> = hits
        .into_iter()
        .filter(|h| filter.admits(&h.chunk, h.score))
        .collect();
    if kept.len() < before {
        debug!(retriever = name, dropped = before - kept.len(), "out-of-filter hits dropped");
    }
    kept
}
