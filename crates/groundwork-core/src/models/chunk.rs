use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{META_CHUNK_NUM, META_DOC_ID};

/// Name of a logical collection spanning both backing stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBaseId(String);

impl KnowledgeBaseId {
    /// Returns `None` for a blank id.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KnowledgeBaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a chunk across backends: (document, sequence number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    pub doc_id: String,
    pub chunk_num: i64,
}

/// A contiguous slice of a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Backend-local point / row id.
    pub id: String,
    pub doc_id: String,
    /// Sequence number, unique within (document, knowledge base).
    pub chunk_num: i64,
    pub text: String,
    /// Free-form metadata as stored, including `doc_id` and `chunk_num`.
    pub metadata: Map<String, Value>,
}

impl Chunk {
    /// Build a chunk from a stored payload, pulling `doc_id` and `chunk_num`
    /// out of its metadata.
    ///
    /// Returns a description of the problem when either key is missing or
    /// has an unusable type.
    pub fn from_metadata(
        id: impl Into<String>,
        text: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Result<Self, String> {
        let doc_id = match metadata.get(META_DOC_ID) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(format!("{META_DOC_ID} has unexpected type: {other}")),
            None => return Err(format!("metadata has no {META_DOC_ID}")),
        };
        let chunk_num = match metadata.get(META_CHUNK_NUM) {
            Some(value) => parse_chunk_num(value)
                .ok_or_else(|| format!("{META_CHUNK_NUM} is not an integer: {value}"))?,
            None => return Err(format!("metadata has no {META_CHUNK_NUM}")),
        };
        Ok(Self {
            id: id.into(),
            doc_id,
            chunk_num,
            text: text.into(),
            metadata,
        })
    }

    pub fn key(&self) -> ChunkKey {
        ChunkKey {
            doc_id: self.doc_id.clone(),
            chunk_num: self.chunk_num,
        }
    }
}

/// Sequence numbers arrive as JSON integers, integral floats, or digit strings
/// depending on which store wrote them.
pub fn parse_chunk_num(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A chunk plus the relevance score the answering backend assigned.
///
/// Scores are backend-local: never compare scores from different stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f64,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f64) -> Self {
        Self { chunk, score }
    }
}

/// A result with the text of its neighboring chunks attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedResult {
    pub chunk: ScoredChunk,
    /// Texts of chunks before the target, ascending by sequence number.
    pub previous_texts: Vec<String>,
    /// Texts of chunks after the target, ascending by sequence number.
    pub next_texts: Vec<String>,
    /// Set when the neighbor lookup failed and the lists were left empty.
    #[serde(skip)]
    pub neighbors_degraded: bool,
}
