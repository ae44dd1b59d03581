//! Dense embedding service client.

use std::time::Duration;

use groundwork_core::errors::{BackendError, GroundResult};
use groundwork_core::traits::IEmbedder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transport::HttpTransport;

const BACKEND: &str = "embeddings";

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a str,
}

/// Text-embedding servers answer either with one vector or with one
/// vector per input.
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    Batch(Vec<Vec<f32>>),
    Single(Vec<f32>),
}

/// Embeds query text by POSTing `{"inputs": text}` to a text-embedding server.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    url: String,
    transport: HttpTransport,
}

impl HttpEmbedder {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> GroundResult<Self> {
        Ok(Self {
            url: url.into(),
            transport: HttpTransport::new(BACKEND, timeout)?.with_bearer_token(api_key),
        })
    }

    fn malformed(reason: impl Into<String>) -> BackendError {
        BackendError::MalformedResponse {
            backend: BACKEND.to_string(),
            reason: reason.into(),
        }
    }
}

impl IEmbedder for HttpEmbedder {
    fn embed(&self, text: &str) -> GroundResult<Vec<f32>> {
        let response: EmbedResponse = self
            .transport
            .post_json(&self.url, &EmbedRequest { inputs: text })?;

        let vector = match response {
            EmbedResponse::Single(v) => v,
            EmbedResponse::Batch(rows) => rows
                .into_iter()
                .next()
                .ok_or_else(|| Self::malformed("no embedding returned"))?,
        };
        if vector.is_empty() {
            return Err(Self::malformed("embedding has zero dimensions").into());
        }

        debug!(dims = vector.len(), "query embedded");
        Ok(vector)
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
