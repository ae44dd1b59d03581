//! Sparse (SPLADE-style) encoding service client.

use std::time::Duration;

use groundwork_core::errors::GroundResult;
use groundwork_core::models::SparseVector;
use groundwork_core::traits::ISparseEncoder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::HttpTransport;

const BACKEND: &str = "sparse-encoder";

#[derive(Serialize)]
struct EncodeRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct SparseEntry {
    index: u32,
    value: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EncodeResponse {
    Batch(Vec<Vec<SparseEntry>>),
    Single(Vec<SparseEntry>),
}

/// Encodes query text into index / weight pairs.
#[derive(Debug, Clone)]
pub struct HttpSparseEncoder {
    url: String,
    transport: HttpTransport,
}

impl HttpSparseEncoder {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> GroundResult<Self> {
        Ok(Self {
            url: url.into(),
            transport: HttpTransport::new(BACKEND, timeout)?.with_bearer_token(api_key),
        })
    }
}

impl ISparseEncoder for HttpSparseEncoder {
    fn encode(&self, text: &str) -> GroundResult<SparseVector> {
        let response: EncodeResponse = self
            .transport
            .post_json(&self.url, &EncodeRequest { inputs: text })?;

        // `[]` and `[[]]` are valid: the query had no weighted terms.
        let entries = match response {
            EncodeResponse::Single(entries) => entries,
            EncodeResponse::Batch(rows) => rows.into_iter().next().unwrap_or_default(),
        };

        let (indices, values): (Vec<u32>, Vec<f32>) =
            entries.into_iter().map(|e| (e.index, e.value)).unzip();
        let vector = SparseVector { indices, values };
        debug!(terms = vector.len(), "query sparse-encoded");
        Ok(vector)
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
