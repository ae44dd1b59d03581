//! Weighted Reciprocal Rank Fusion: score = Σ weight_i / (c + rank_i)
//!
//! Members are queried in order and each fetches `k` candidates. Scores
//! from different members are never compared directly, only their ranks.

use std::collections::HashMap;
use std::sync::Arc;

use groundwork_core::errors::GroundResult;
use groundwork_core::models::{ChunkKey, FilterSet, ScoredChunk};
use groundwork_core::traits::IRetriever;
use tracing::debug;

/// Fuse ranked lists, each paired with its weight.
///
/// Chunks are identified by `(doc_id, chunk_num)`; the first list to contain
/// a chunk supplies its payload. The fused score replaces the member score.
/// Ties keep first-seen order.
pub fn weighted_rrf(lists: &[(Vec<ScoredChunk>, f64)], c: u32) -> Vec<ScoredChunk> {
    let mut slots: HashMap<ChunkKey, usize> = HashMap::new();
    let mut fused: Vec<ScoredChunk> = Vec::new();

    for (hits, weight) in lists {
        for (rank, hit) in hits.iter().enumerate() {
            let contribution = weight / (f64::from(c) + (rank + 1) as f64);
            match slots.get(&hit.chunk.key()) {
                Some(&slot) => fused[slot].score += contribution,
                None => {
                    slots.insert(hit.chunk.key(), fused.len());
                    fused.push(ScoredChunk::new(hit.chunk.clone(), contribution));
                }
            }
        }
    }

    // Stable sort: equal scores stay in first-seen order.
    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

/// Runs every member and fuses their rankings. Any member failure fails the
/// whole ensemble with that member's error.
pub struct EnsembleRetriever {
    name: String,
    members: Vec<(Arc<dyn IRetriever>, f64)>,
    rrf_c: u32,
}

impl EnsembleRetriever {
    pub fn new(name: impl Into<String>, members: Vec<(Arc<dyn IRetriever>, f64)>, rrf_c: u32) -> Self {
        Self {
            name: name.into(),
            members,
            rrf_c,
        }
    }
}

impl IRetriever for EnsembleRetriever {
    fn retrieve(&self, query: &str, filter: &FilterSet, k: usize) -> GroundResult<Vec<ScoredChunk>> {
        let mut lists = Vec::with_capacity(self.members.len());
        for (member, weight) in &self.members {
            let hits = member.retrieve(query, filter, k)?;
            debug!(ensemble = %self.name, member = member.name(), hits = hits.len(), "member answered");
            lists.push((hits, *weight));
        }
        Ok(weighted_rrf(&lists, self.rrf_c))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
