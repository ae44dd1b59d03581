//! # groundwork-stores
//!
//! Adapters for the two backing stores of a knowledge base.
//!
//! - [`QdrantStore`]: primary store. Dense search, sparse search over the
//!   `<kb>_sparse` collection, and neighbor scans via the REST scroll API.
//! - [`SqliteVectorStore`]: secondary store. Brute-force cosine search over
//!   the ingestion schema through a pool of read-only connections.
//!
//! Both render the backend-agnostic [`FilterSet`](groundwork_core::models::FilterSet)
//! into their own query form.

pub mod qdrant;
pub mod sqlite;

pub use qdrant::QdrantStore;
pub use sqlite::SqliteVectorStore;
