//! Response shapes of the Qdrant points API.

use groundwork_core::errors::{BackendError, GroundResult};
use groundwork_core::models::{Chunk, ScoredChunk};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
pub struct ScrollResponse {
    pub result: ScrollResult,
}

#[derive(Debug, Deserialize)]
pub struct ScrollResult {
    pub points: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct ScoredPoint {
    pub id: Value,
    pub score: f64,
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct Record {
    pub id: Value,
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

/// Payload keys the ingestion pipeline writes.
#[derive(Debug, Clone)]
pub struct PayloadKeys {
    pub content: String,
    pub metadata: String,
}

impl PayloadKeys {
    pub fn to_chunk(&self, id: &Value, payload: Option<&Map<String, Value>>) -> GroundResult<Chunk> {
        let payload = payload.ok_or_else(|| malformed(format!("point {id} has no payload")))?;
        let text = payload
            .get(&self.content)
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(format!("point {id} has no {} string", self.content)))?;
        let metadata = match payload.get(&self.metadata) {
            Some(Value::Object(map)) => map.clone(),
            _ => return Err(malformed(format!("point {id} has no {} object", self.metadata)).into()),
        };
        Chunk::from_metadata(point_id(id), text, metadata)
            .map_err(|reason| malformed(format!("point {id}: {reason}")).into())
    }

    pub fn to_scored(&self, point: &ScoredPoint) -> GroundResult<ScoredChunk> {
        let chunk = self.to_chunk(&point.id, point.payload.as_ref())?;
        Ok(ScoredChunk::new(chunk, point.score))
    }
}

/// Point ids are either unsigned integers or UUID strings.
fn point_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn malformed(reason: String) -> BackendError {
    BackendError::MalformedResponse {
        backend: super::BACKEND.to_string(),
        reason,
    }
}
