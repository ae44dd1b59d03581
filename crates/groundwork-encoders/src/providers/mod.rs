mod http_embedder;
mod http_sparse_encoder;

pub use http_embedder::HttpEmbedder;
pub use http_sparse_encoder::HttpSparseEncoder;
