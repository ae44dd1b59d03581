//! Secondary store: the relational vector store, read through SQLite.

mod queries;
mod read_pool;
pub mod similarity;

use std::fmt::Display;
use std::path::Path;

use groundwork_core::config::SecondaryStoreConfig;
use groundwork_core::errors::{BackendError, GroundError, GroundResult};
use groundwork_core::models::{Chunk, FilterSet, KnowledgeBaseId, ScoredChunk};
use groundwork_core::traits::{IChunkStore, NeighborQuery};
use tracing::debug;

pub use read_pool::ReadPool;

const BACKEND: &str = "sqlite";

fn to_storage_err(e: impl Display) -> GroundError {
    BackendError::Storage {
        backend: BACKEND.to_string(),
        reason: e.to_string(),
    }
    .into()
}

/// Chunk store over the ingestion database. Read-only: the schema and rows
/// belong to the ingestion pipeline.
pub struct SqliteVectorStore {
    readers: ReadPool,
}

impl SqliteVectorStore {
    pub fn open(path: &Path, pool_size: usize, busy_timeout_ms: u32) -> GroundResult<Self> {
        let readers = ReadPool::open(path, pool_size, busy_timeout_ms)?;
        debug!(path = %path.display(), readers = readers.size(), "secondary store opened");
        Ok(Self { readers })
    }

    pub fn from_config(config: &SecondaryStoreConfig) -> GroundResult<Self> {
        Self::open(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    pub fn readers(&self) -> &ReadPool {
        &self.readers
    }
}

impl IChunkStore for SqliteVectorStore {
    fn dense_search(
        &self,
        kb: &KnowledgeBaseId,
        embedding: &[f32],
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>> {
        self.readers
            .with_conn(|conn| queries::dense_search(conn, kb.as_str(), embedding, filter, k))
    }

    fn neighbor_scan(&self, kb: &KnowledgeBaseId, query: &NeighborQuery) -> GroundResult<Vec<Chunk>> {
        if query.window == 0 {
            return Ok(Vec::new());
        }
        self.readers
            .with_conn(|conn| queries::neighbor_scan(conn, kb.as_str(), query))
    }

    fn name(&self) -> &str {
        BACKEND
    }
}
