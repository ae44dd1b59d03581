//! Shared test fixtures: chunk builders, in-memory mock backends with call
//! counters, a small JSON corpus, and a seeded SQLite database in the
//! ingestion schema.

pub mod chunks;
pub mod corpus;
pub mod mocks;
pub mod sqlite;

pub use chunks::{chunk, document, scored};
pub use corpus::{load_corpus, Corpus};
pub use mocks::{Failure, MockChunkStore, MockEmbedder, MockSparseEncoder, MockSparseIndex};
pub use sqlite::SqliteFixture;
