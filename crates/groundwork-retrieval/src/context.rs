//! Process-wide backend handles.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use groundwork_core::config::GroundworkConfig;
use groundwork_core::errors::GroundResult;
use groundwork_core::models::StoreTag;
use groundwork_core::traits::{IChunkStore, IEmbedder, ISparseEncoder, ISparseIndex};
use groundwork_encoders::{HttpEmbedder, HttpSparseEncoder};
use groundwork_stores::{QdrantStore, SqliteVectorStore};
use tracing::info;

/// Immutable set of backend clients, built once and shared by every request.
/// Clients carry no per-request state.
#[derive(Clone)]
pub struct BackendContext {
    pub embedder: Arc<dyn IEmbedder>,
    pub sparse_encoder: Arc<dyn ISparseEncoder>,
    pub sparse_index: Arc<dyn ISparseIndex>,
    pub primary: Arc<dyn IChunkStore>,
    pub secondary: Arc<dyn IChunkStore>,
}

impl BackendContext {
    pub fn new(
        embedder: Arc<dyn IEmbedder>,
        sparse_encoder: Arc<dyn ISparseEncoder>,
        sparse_index: Arc<dyn ISparseIndex>,
        primary: Arc<dyn IChunkStore>,
        secondary: Arc<dyn IChunkStore>,
    ) -> Self {
        Self {
            embedder,
            sparse_encoder,
            sparse_index,
            primary,
            secondary,
        }
    }

    /// Build the HTTP encoders, the Qdrant store (dense and sparse) and the
    /// SQLite store from a validated configuration.
    pub fn from_config(config: &GroundworkConfig) -> GroundResult<Self> {
        let timeout = Duration::from_millis(config.retrieval.request_timeout_ms);

        let embedder = HttpEmbedder::new(
            config.encoders.embeddings_url.clone(),
            config.encoders.embeddings_api_key.clone(),
            timeout,
        )?;
        let sparse_encoder = HttpSparseEncoder::new(
            config.encoders.sparse_url.clone(),
            config.encoders.sparse_api_key.clone(),
            timeout,
        )?;
        let qdrant = Arc::new(QdrantStore::new(&config.primary, timeout)?);
        let sqlite = SqliteVectorStore::from_config(&config.secondary)?;

        info!(
            primary = %config.primary.url,
            secondary = %Path::new(&config.secondary.db_path).display(),
            timeout_ms = config.retrieval.request_timeout_ms,
            "backend context ready"
        );

        Ok(Self::new(
            Arc::new(embedder),
            Arc::new(sparse_encoder),
            qdrant.clone(),
            qdrant,
            Arc::new(sqlite),
        ))
    }

    /// The dense store behind a tag.
    pub fn store(&self, tag: StoreTag) -> &Arc<dyn IChunkStore> {
        match tag {
            StoreTag::Primary => &self.primary,
            StoreTag::Secondary => &self.secondary,
        }
    }
}
