//! Surrounding-chunk lookup for each result.
//!
//! Lookups for different results are independent and run in parallel on the
//! rayon pool. A failed lookup leaves that result's lists empty and marks it
//! degraded; it never fails the request.

use std::collections::BTreeMap;

use groundwork_core::models::{Chunk, EnrichedResult, KnowledgeBaseId, ScoredChunk};
use groundwork_core::traits::{IChunkStore, NeighborQuery};
use rayon::prelude::*;
use tracing::warn;

/// Texts before and after a target chunk, both ascending by sequence number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Vec<String>,
    pub next: Vec<String>,
}

/// Split fetched chunks around `chunk_num`.
///
/// Chunks outside `[chunk_num - window, chunk_num + window]` are ignored,
/// duplicates of a sequence number keep the first one seen, and missing
/// sequence numbers are simply skipped.
pub fn partition(chunks: Vec<Chunk>, chunk_num: i64, window: usize) -> Neighbors {
    let w = i64::try_from(window).unwrap_or(i64::MAX);
    let (lo, hi) = (chunk_num.saturating_sub(w), chunk_num.saturating_add(w));

    let mut by_num: BTreeMap<i64, String> = BTreeMap::new();
    for chunk in chunks {
        if (lo..=hi).contains(&chunk.chunk_num) && chunk.chunk_num != chunk_num {
            by_num.entry(chunk.chunk_num).or_insert(chunk.text);
        }
    }

    let mut previous = Vec::new();
    let mut next = Vec::new();
    for (num, text) in by_num {
        if num < chunk_num {
            previous.push(text);
        } else {
            next.push(text);
        }
    }
    previous.truncate(window);
    next.truncate(window);
    Neighbors { previous, next }
}

fn enrich(store: &dyn IChunkStore, kb: &KnowledgeBaseId, chunk: ScoredChunk, window: usize) -> EnrichedResult {
    if window == 0 {
        return EnrichedResult {
            chunk,
            previous_texts: Vec::new(),
            next_texts: Vec::new(),
            neighbors_degraded: false,
        };
    }

    let query = NeighborQuery::new(chunk.chunk.doc_id.clone(), chunk.chunk.chunk_num, window);
    match store.neighbor_scan(kb, &query) {
        Ok(fetched) => {
            let neighbors = partition(fetched, query.chunk_num, window);
            EnrichedResult {
                chunk,
                previous_texts: neighbors.previous,
                next_texts: neighbors.next,
                neighbors_degraded: false,
            }
        }
        Err(e) => {
            warn!(
                store = store.name(),
                doc_id = %query.doc_id,
                chunk_num = query.chunk_num,
                error = %e,
                "neighbor lookup failed, returning result without context"
            );
            EnrichedResult {
                chunk,
                previous_texts: Vec::new(),
                next_texts: Vec::new(),
                neighbors_degraded: true,
            }
        }
    }
}

/// Attach neighbor texts to every result, preserving input order.
pub fn resolve(
    store: &dyn IChunkStore,
    kb: &KnowledgeBaseId,
    results: Vec<ScoredChunk>,
    window: usize,
) -> Vec<EnrichedResult> {
    results
        .into_par_iter()
        .map(|chunk| enrich(store, kb, chunk, window))
        .collect()
}
