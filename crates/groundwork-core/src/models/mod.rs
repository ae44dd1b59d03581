mod chunk;
mod fallback_event;
mod filter;
mod request;
mod response;
mod sparse;
mod store_tag;
mod strategy;

pub use chunk::{parse_chunk_num, Chunk, ChunkKey, EnrichedResult, KnowledgeBaseId, ScoredChunk};
pub use fallback_event::FallbackEvent;
pub use filter::{FilterClause, FilterSet};
pub use request::{ContextChunksRequest, ContextFilter, RetrievalRequest};
pub use response::{ContextChunk, ContextChunksResponse, DocumentRef};
pub use sparse::SparseVector;
pub use store_tag::StoreTag;
pub use strategy::RetrieverType;
