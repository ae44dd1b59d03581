//! Primary store: Qdrant over its REST API.

mod payload;
mod query;

use std::time::Duration;

use groundwork_core::config::PrimaryStoreConfig;
use groundwork_core::errors::{ConfigError, GroundError, GroundResult};
use groundwork_core::models::{Chunk, FilterSet, KnowledgeBaseId, ScoredChunk, SparseVector};
use groundwork_core::traits::{IChunkStore, ISparseIndex, NeighborQuery};
use groundwork_encoders::HttpTransport;
use reqwest::Url;
use tracing::debug;

use payload::{PayloadKeys, ScrollResponse, SearchResponse};
pub use query::{render_filter, RenderedFilter};
use query::{neighbor_scroll_body, NamedSparseVector, SearchRequest};

const BACKEND: &str = "qdrant";

/// Header carrying the Qdrant API key.
const API_KEY_HEADER: &str = "api-key";

/// Chunk store and sparse index backed by a Qdrant server.
#[derive(Debug, Clone)]
pub struct QdrantStore {
    base_url: Url,
    transport: HttpTransport,
    keys: PayloadKeys,
    sparse_vector_name: String,
    sparse_collection_suffix: String,
}

impl QdrantStore {
    pub fn new(config: &PrimaryStoreConfig, timeout: Duration) -> GroundResult<Self> {
        let base_url = Url::parse(config.url.trim()).map_err(|e| invalid_url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid_url("not a base URL".to_string()));
        }

        let transport = HttpTransport::new(BACKEND, timeout)?
            .with_api_key_header(API_KEY_HEADER, config.api_key.clone());

        Ok(Self {
            base_url,
            transport,
            keys: PayloadKeys {
                content: config.payload_content_key.clone(),
                metadata: config.payload_metadata_key.clone(),
            },
            sparse_vector_name: config.sparse_vector_name.clone(),
            sparse_collection_suffix: config.sparse_collection_suffix.clone(),
        })
    }

    /// `<base>/collections/<collection>/points/<action>`, with the collection
    /// name percent-encoded.
    fn points_url(&self, collection: &str, action: &str) -> GroundResult<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| invalid_url("not a base URL".to_string()))?
            .pop_if_empty()
            .extend(["collections", collection, "points", action]);
        Ok(url.to_string())
    }

    fn search<V: serde::Serialize>(
        &self,
        collection: &str,
        body: &SearchRequest<V>,
    ) -> GroundResult<Vec<ScoredChunk>> {
        let url = self.points_url(collection, "search")?;
        let response: SearchResponse = self.transport.post_json(&url, body)?;
        let hits = response
            .result
            .iter()
            .map(|point| self.keys.to_scored(point))
            .collect::<GroundResult<Vec<_>>>()?;
        debug!(collection, hits = hits.len(), "qdrant search");
        Ok(hits)
    }
}

impl IChunkStore for QdrantStore {
    fn dense_search(
        &self,
        kb: &KnowledgeBaseId,
        embedding: &[f32],
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>> {
        let rendered = render_filter(filter, &self.keys.metadata);
        self.search(kb.as_str(), &SearchRequest::new(embedding, k, rendered))
    }

    fn neighbor_scan(&self, kb: &KnowledgeBaseId, query: &NeighborQuery) -> GroundResult<Vec<Chunk>> {
        if query.window == 0 {
            return Ok(Vec::new());
        }
        let url = self.points_url(kb.as_str(), "scroll")?;
        let body = neighbor_scroll_body(query, &self.keys.metadata);
        let response: ScrollResponse = self.transport.post_json(&url, &body)?;
        response
            .result
            .points
            .iter()
            .map(|record| self.keys.to_chunk(&record.id, record.payload.as_ref()))
            .collect()
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

impl ISparseIndex for QdrantStore {
    fn sparse_search(
        &self,
        kb: &KnowledgeBaseId,
        vector: &SparseVector,
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>> {
        let collection = format!("{}{}", kb.as_str(), self.sparse_collection_suffix);
        let named = NamedSparseVector {
            name: &self.sparse_vector_name,
            vector,
        };
        let rendered = render_filter(filter, &self.keys.metadata);
        self.search(&collection, &SearchRequest::new(named, k, rendered))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

fn invalid_url(message: String) -> GroundError {
    ConfigError::ValidationFailed {
        field: "primary.url".to_string(),
        message,
    }
    .into()
}
