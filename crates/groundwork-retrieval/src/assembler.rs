//! Final packaging of enriched results.

use groundwork_core::models::{ContextChunk, ContextChunksResponse, EnrichedResult};

/// Keep at most `limit` results, in their current order.
pub fn cap(mut results: Vec<EnrichedResult>, limit: usize) -> Vec<EnrichedResult> {
    results.truncate(limit);
    results
}

/// Wire response for an ordered result list.
pub fn to_response(results: Vec<EnrichedResult>) -> ContextChunksResponse {
    ContextChunksResponse {
        data: results.into_iter().map(ContextChunk::from).collect(),
        ..ContextChunksResponse::default()
    }
}
