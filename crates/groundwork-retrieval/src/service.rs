//! JSON boundary: request body in, response body out.

use groundwork_core::errors::{GroundError, GroundResult};
use groundwork_core::models::{ContextChunksRequest, RetrievalRequest};

use crate::assembler;
use crate::engine::RetrievalEngine;

/// Parse a context-chunks request, run it, and serialize the response.
pub fn search_documents(engine: &RetrievalEngine, json_input: &str) -> GroundResult<String> {
    let request = RetrievalRequest::try_from(ContextChunksRequest::from_json(json_input)?)?;
    let outcome = engine.retrieve(&request)?;
    let response = assembler::to_response(outcome.results);
    serde_json::to_string(&response)
        .map_err(|e| GroundError::internal(format!("failed to serialize response: {e}")))
}
