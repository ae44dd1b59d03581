use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Extra candidates each retriever fetches beyond the request limit
    /// (`EXTRA_RETRIVED`).
    pub candidate_pad: usize,
    /// Reciprocal-rank smoothing constant for ensemble fusion.
    pub rrf_c: u32,
    /// Per-call timeout for every HTTP backend.
    pub request_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidate_pad: defaults::DEFAULT_CANDIDATE_PAD,
            rrf_c: defaults::DEFAULT_RRF_C,
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
