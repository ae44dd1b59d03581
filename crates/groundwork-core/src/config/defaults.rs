// Single source of truth for all default values.

// --- Primary store ---
pub const DEFAULT_SPARSE_VECTOR_NAME: &str = "sparse_vector";
pub const DEFAULT_SPARSE_COLLECTION_SUFFIX: &str = "_sparse";
pub const DEFAULT_PAYLOAD_CONTENT_KEY: &str = "page_content";
pub const DEFAULT_PAYLOAD_METADATA_KEY: &str = "metadata";

// --- Secondary store ---
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const MAX_READ_POOL_SIZE: usize = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Retrieval ---
pub const DEFAULT_CANDIDATE_PAD: usize = 0;
pub const DEFAULT_RRF_C: u32 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
