use serde::{Deserialize, Serialize};

use super::defaults;

/// Primary vector index store (Qdrant REST API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryStoreConfig {
    /// Base URL (`QDRANT_SERVER`).
    pub url: String,
    pub api_key: Option<String>,
    /// Name of the sparse vector inside the sparse collection.
    pub sparse_vector_name: String,
    /// Sparse collection is `<knowledge base><suffix>`.
    pub sparse_collection_suffix: String,
    /// Payload key holding the chunk text.
    pub payload_content_key: String,
    /// Payload key holding the chunk metadata object.
    pub payload_metadata_key: String,
}

impl Default for PrimaryStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            sparse_vector_name: defaults::DEFAULT_SPARSE_VECTOR_NAME.to_string(),
            sparse_collection_suffix: defaults::DEFAULT_SPARSE_COLLECTION_SUFFIX.to_string(),
            payload_content_key: defaults::DEFAULT_PAYLOAD_CONTENT_KEY.to_string(),
            payload_metadata_key: defaults::DEFAULT_PAYLOAD_METADATA_KEY.to_string(),
        }
    }
}

/// Secondary relational vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryStoreConfig {
    /// Database file (`CONNECTION_STRING`).
    pub db_path: String,
    pub read_pool_size: usize,
    pub busy_timeout_ms: u32,
}

impl Default for SecondaryStoreConfig {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
