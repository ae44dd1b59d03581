//! # groundwork-encoders
//!
//! Query encoding over HTTP. Both services are called once per retrieval
//! attempt; nothing is cached.
//!
//! ## Architecture
//!
//! ```text
//! HttpTransport (blocking reqwest, per-call timeout, error classification)
//! ├── HttpEmbedder       (IEmbedder)       POST {"inputs": text} -> [f32]
//! └── HttpSparseEncoder  (ISparseEncoder)  POST {"inputs": text} -> [{index, value}]
//! ```

pub mod providers;
pub mod transport;

pub use providers::{HttpEmbedder, HttpSparseEncoder};
pub use transport::HttpTransport;
