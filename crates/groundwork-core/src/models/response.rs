//! Wire shape of a retrieval response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EnrichedResult;

/// The document a chunk belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(default)]
    pub object: Map<String, Value>,
    pub doc_id: String,
    pub doc_metadata: Map<String, Value>,
}

/// One entry of the response list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextChunk {
    #[serde(default)]
    pub object: Map<String, Value>,
    pub document: DocumentRef,
    pub text: String,
    pub previous_texts: Vec<String>,
    pub next_texts: Vec<String>,
}

impl From<EnrichedResult> for ContextChunk {
    fn from(result: EnrichedResult) -> Self {
        let chunk = result.chunk.chunk;
        Self {
            object: Map::new(),
            document: DocumentRef {
                object: Map::new(),
                doc_id: chunk.doc_id,
                doc_metadata: chunk.metadata,
            },
            text: chunk.text,
            previous_texts: result.previous_texts,
            next_texts: result.next_texts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextChunksResponse {
    #[serde(default)]
    pub object: Map<String, Value>,
    #[serde(default)]
    pub model: Map<String, Value>,
    pub data: Vec<ContextChunk>,
}
