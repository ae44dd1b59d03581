//! # groundwork-core
//!
//! Foundation crate for the groundwork retrieval engine.
//! Defines the chunk data model, the backend-agnostic filter expression,
//! collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GroundworkConfig;
pub use errors::{BackendError, GroundError, GroundResult};
pub use models::{
    Chunk, EnrichedResult, FilterClause, FilterSet, KnowledgeBaseId, RetrievalRequest,
    RetrieverType, ScoredChunk, SparseVector, StoreTag,
};
