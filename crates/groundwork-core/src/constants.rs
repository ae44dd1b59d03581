/// Ensemble member weights: sparse first, dense second.
pub const ENSEMBLE_WEIGHTS: [f64; 2] = [0.5, 0.5];

/// Metadata key holding a chunk's owning document id.
pub const META_DOC_ID: &str = "doc_id";

/// Metadata key holding a chunk's per-document sequence number.
pub const META_CHUNK_NUM: &str = "chunk_num";

/// Request defaults applied when a field is absent.
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_PREV_NEXT_CHUNKS: usize = 2;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;
