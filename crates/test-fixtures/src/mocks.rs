//! In-memory backends with call counters and injectable failures.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use groundwork_core::errors::{BackendError, GroundError, GroundResult};
use groundwork_core::models::{Chunk, FilterSet, KnowledgeBaseId, ScoredChunk, SparseVector};
use groundwork_core::traits::{IChunkStore, IEmbedder, ISparseEncoder, ISparseIndex, NeighborQuery};

/// Failure a mock raises instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Connection refused.
    Unreachable,
    Timeout,
    /// Backend answered with something unusable.
    Malformed,
    /// A bug on our side, not a backend outage.
    Internal,
}

impl Failure {
    pub fn to_error(self, backend: &str) -> GroundError {
        let backend = backend.to_string();
        match self {
            Self::Unreachable => BackendError::Unreachable {
                backend,
                reason: "connection refused".into(),
            }
            .into(),
            Self::Timeout => BackendError::Timeout {
                backend,
                timeout_ms: 10,
            }
            .into(),
            Self::Malformed => BackendError::MalformedResponse {
                backend,
                reason: "unexpected payload".into(),
            }
            .into(),
            Self::Internal => GroundError::internal(format!("{backend} exploded")),
        }
    }
}

fn sort_and_cut(mut hits: Vec<ScoredChunk>, filter: &FilterSet, k: usize) -> Vec<ScoredChunk> {
    hits.retain(|h| filter.admits(&h.chunk, h.score));
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(k);
    hits
}

// --- Encoders ---

pub struct MockEmbedder {
    vector: Vec<f32>,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(vec![1.0])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(vec![1.0, 0.0, 0.0])
    }
}

impl IEmbedder for MockEmbedder {
    fn embed(&self, _text: &str) -> GroundResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(f) => Err(f.to_error("mock-embedder")),
            None => Ok(self.vector.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock-embedder"
    }
}

pub struct MockSparseEncoder {
    vector: SparseVector,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

impl MockSparseEncoder {
    pub fn new() -> Self {
        Self {
            vector: SparseVector {
                indices: vec![1, 2],
                values: vec![0.5, 0.5],
            },
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Encodes every query to no terms at all.
    pub fn empty() -> Self {
        Self {
            vector: SparseVector::default(),
            ..Self::new()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSparseEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ISparseEncoder for MockSparseEncoder {
    fn encode(&self, _text: &str) -> GroundResult<SparseVector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(f) => Err(f.to_error("mock-sparse-encoder")),
            None => Ok(self.vector.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock-sparse-encoder"
    }
}

// --- Stores ---

/// Dense store returning canned hits and scanning neighbors out of a corpus.
pub struct MockChunkStore {
    name: String,
    hits: Vec<ScoredChunk>,
    corpus: Vec<Chunk>,
    search_failure: Option<Failure>,
    /// Documents whose neighbor scans fail.
    neighbor_failure: Option<(BTreeSet<String>, Failure)>,
    search_calls: AtomicUsize,
    neighbor_calls: AtomicUsize,
    requested_k: Mutex<Vec<usize>>,
}

impl MockChunkStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hits: Vec::new(),
            corpus: Vec::new(),
            search_failure: None,
            neighbor_failure: None,
            search_calls: AtomicUsize::new(0),
            neighbor_calls: AtomicUsize::new(0),
            requested_k: Mutex::new(Vec::new()),
        }
    }

    /// Hits returned by `dense_search` (filtered, sorted, cut to k).
    pub fn with_hits(mut self, hits: Vec<ScoredChunk>) -> Self {
        self.hits = hits;
        self
    }

    /// Chunks visible to `neighbor_scan`.
    pub fn with_corpus(mut self, corpus: Vec<Chunk>) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn failing_search(mut self, failure: Failure) -> Self {
        self.search_failure = Some(failure);
        self
    }

    pub fn failing_neighbors_for(mut self, doc_ids: &[&str], failure: Failure) -> Self {
        let docs = doc_ids.iter().map(|d| d.to_string()).collect();
        self.neighbor_failure = Some((docs, failure));
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn neighbor_calls(&self) -> usize {
        self.neighbor_calls.load(Ordering::SeqCst)
    }

    /// `k` of every `dense_search` call, in call order.
    pub fn requested_k(&self) -> Vec<usize> {
        self.requested_k
            .lock()
            .map(|k| k.clone())
            .unwrap_or_default()
    }
}

impl IChunkStore for MockChunkStore {
    fn dense_search(
        &self,
        _kb: &KnowledgeBaseId,
        _embedding: &[f32],
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested_k.lock() {
            requested.push(k);
        }
        if let Some(f) = self.search_failure {
            return Err(f.to_error(&self.name));
        }
        Ok(sort_and_cut(self.hits.clone(), filter, k))
    }

    fn neighbor_scan(&self, _kb: &KnowledgeBaseId, query: &NeighborQuery) -> GroundResult<Vec<Chunk>> {
        self.neighbor_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((docs, f)) = &self.neighbor_failure {
            if docs.contains(&query.doc_id) {
                return Err(f.to_error(&self.name));
            }
        }
        let (lo, hi) = query.range();
        // Reverse corpus order: callers must not rely on store ordering.
        Ok(self
            .corpus
            .iter()
            .rev()
            .filter(|c| c.doc_id == query.doc_id)
            .filter(|c| (lo..=hi).contains(&c.chunk_num) && c.chunk_num != query.chunk_num)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Sparse index returning canned hits.
pub struct MockSparseIndex {
    hits: Vec<ScoredChunk>,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

impl MockSparseIndex {
    pub fn new(hits: Vec<ScoredChunk>) -> Self {
        Self {
            hits,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ISparseIndex for MockSparseIndex {
    fn sparse_search(
        &self,
        _kb: &KnowledgeBaseId,
        _vector: &SparseVector,
        filter: &FilterSet,
        k: usize,
    ) -> GroundResult<Vec<ScoredChunk>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(f) = self.failure {
            return Err(f.to_error("mock-sparse-index"));
        }
        Ok(sort_and_cut(self.hits.clone(), filter, k))
    }

    fn name(&self) -> &str {
        "mock-sparse-index"
    }
}
