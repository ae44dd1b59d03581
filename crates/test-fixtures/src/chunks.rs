//! Chunk builders.

use groundwork_core::models::{Chunk, ScoredChunk};
use serde_json::{json, Map, Value};

/// A chunk whose text is `"<doc_id>#<chunk_num>"` and whose metadata carries
/// both keys.
pub fn chunk(doc_id: &str, chunk_num: i64) -> Chunk {
    let mut metadata = Map::new();
    metadata.insert("doc_id".into(), Value::String(doc_id.to_string()));
    metadata.insert("chunk_num".into(), json!(chunk_num));
    Chunk {
        id: format!("{doc_id}-{chunk_num}"),
        doc_id: doc_id.to_string(),
        chunk_num,
        text: format!("{doc_id}#{chunk_num}"),
        metadata,
    }
}

pub fn scored(doc_id: &str, chunk_num: i64, score: f64) -> ScoredChunk {
    ScoredChunk::new(chunk(doc_id, chunk_num), score)
}

/// Every chunk of a document for the given sequence numbers.
pub fn document(doc_id: &str, chunk_nums: impl IntoIterator<Item = i64>) -> Vec<Chunk> {
    chunk_nums.into_iter().map(|n| chunk(doc_id, n)).collect()
}
