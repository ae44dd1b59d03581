use serde::{Deserialize, Serialize};

/// Endpoints of the dense embedding and sparse encoding services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Dense embedding endpoint (`EMBEDDINGS_URL`).
    pub embeddings_url: String,
    pub embeddings_api_key: Option<String>,
    /// Sparse encoding endpoint (`SPLADE_EMBEDDINGS_URL`).
    pub sparse_url: String,
    pub sparse_api_key: Option<String>,
}
