//! # groundwork-retrieval
//!
//! The hybrid retrieval engine. One request flows top to bottom:
//!
//! ```text
//! RetrievalEngine
//! ├── filter::translate        (doc ids + min score -> FilterSet)
//! ├── RetrieverFactory         (sparse, dense x2, ensemble x2 -> RetrievalPlan)
//! ├── executor::execute        (primary, then secondary once; tags the answering store)
//! ├── reorder                  (long-context placement, then trim to limit)
//! ├── neighbors::resolve       (parallel window lookups on the tagged store)
//! └── assembler                (cap at limit, wire response)
//! ```
//!
//! Backend handles live in an immutable [`BackendContext`] built once at
//! startup and shared by every request.

pub mod assembler;
pub mod context;
pub mod engine;
pub mod executor;
pub mod factory;
pub mod filter;
pub mod neighbors;
pub mod reorder;
pub mod retrievers;
pub mod service;

pub use context::BackendContext;
pub use engine::{RetrievalEngine, RetrievalOutcome};
pub use factory::{FallbackRoute, RetrievalPlan, RetrieverFactory, RetrieverSet};
pub use service::search_documents;
