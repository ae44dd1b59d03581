use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{KnowledgeBaseId, RetrieverType};
use crate::constants::{DEFAULT_LIMIT, DEFAULT_MIN_SCORE, DEFAULT_PREV_NEXT_CHUNKS};
use crate::errors::{GroundError, GroundResult};

/// Document restriction as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextFilter {
    #[serde(default)]
    pub doc_ids: Option<Vec<String>>,
}

/// Wire shape of a retrieval request. Every field but `text` is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextChunksRequest {
    pub text: String,
    #[serde(default)]
    pub knowledge_base_id: Option<String>,
    #[serde(default)]
    pub context_filter: Option<ContextFilter>,
    /// Flat form of `context_filter.doc_ids`; both are unioned.
    #[serde(default)]
    pub doc_ids: Option<Vec<String>>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub prev_next_chunks: Option<i64>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub retriever_type: Option<String>,
}

impl ContextChunksRequest {
    pub fn from_json(json: &str) -> GroundResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GroundError::invalid_request(format!("malformed request body: {e}")))
    }
}

/// A validated retrieval request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    pub text: String,
    pub knowledge_base_id: KnowledgeBaseId,
    /// `None` means no document restriction.
    pub doc_ids: Option<BTreeSet<String>>,
    /// Maximum number of results, at least 1.
    pub limit: usize,
    /// Neighbor window on each side.
    pub prev_next_chunks: usize,
    pub min_score: f64,
    pub retriever_type: RetrieverType,
}

impl RetrievalRequest {
    /// A request with every optional field at its default.
    pub fn new(text: impl Into<String>, knowledge_base_id: KnowledgeBaseId) -> Self {
        Self {
            text: text.into(),
            knowledge_base_id,
            doc_ids: None,
            limit: DEFAULT_LIMIT,
            prev_next_chunks: DEFAULT_PREV_NEXT_CHUNKS,
            min_score: DEFAULT_MIN_SCORE,
            retriever_type: RetrieverType::default(),
        }
    }

    pub fn with_doc_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doc_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_window(mut self, prev_next_chunks: usize) -> Self {
        self.prev_next_chunks = prev_next_chunks;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_retriever(mut self, retriever_type: RetrieverType) -> Self {
        self.retriever_type = retriever_type;
        self
    }

    /// Check the invariants a request must satisfy before any backend call.
    pub fn validate(&self) -> GroundResult<()> {
        if self.text.trim().is_empty() {
            return Err(GroundError::invalid_request("text must not be empty"));
        }
        if self.limit == 0 {
            return Err(GroundError::invalid_request("limit must be at least 1"));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(GroundError::invalid_request(format!(
                "min_score must be a non-negative number, got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

impl TryFrom<ContextChunksRequest> for RetrievalRequest {
    type Error = GroundError;

    fn try_from(wire: ContextChunksRequest) -> GroundResult<Self> {
        let knowledge_base_id = wire
            .knowledge_base_id
            .and_then(KnowledgeBaseId::new)
            .ok_or_else(|| GroundError::invalid_request("knowledge_base_id is required"))?;

        let retriever_type = match wire.retriever_type.as_deref() {
            Some(raw) => raw.parse().map_err(GroundError::invalid_request)?,
            None => RetrieverType::default(),
        };

        let limit = match wire.limit {
            Some(n) if n < 1 => {
                return Err(GroundError::invalid_request(format!(
                    "limit must be at least 1, got {n}"
                )))
            }
            Some(n) => n as usize,
            None => DEFAULT_LIMIT,
        };

        let prev_next_chunks = match wire.prev_next_chunks {
            Some(n) if n < 0 => {
                return Err(GroundError::invalid_request(format!(
                    "prev_next_chunks must not be negative, got {n}"
                )))
            }
            Some(n) => n as usize,
            None => DEFAULT_PREV_NEXT_CHUNKS,
        };

        let nested = wire.context_filter.and_then(|f| f.doc_ids);
        let doc_ids = match (nested, wire.doc_ids) {
            (None, None) => None,
            (a, b) => Some(
                a.into_iter()
                    .flatten()
                    .chain(b.into_iter().flatten())
                    .collect::<BTreeSet<String>>(),
            ),
        };

        let request = Self {
            text: wire.text,
            knowledge_base_id,
            doc_ids,
            limit,
            prev_next_chunks,
            min_score: wire.min_score.unwrap_or(DEFAULT_MIN_SCORE),
            retriever_type,
        };
        request.validate()?;
        Ok(request)
    }
}
