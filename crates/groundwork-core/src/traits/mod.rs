mod chunk_store;
mod embedder;
mod retriever;
mod sparse_encoder;

pub use chunk_store::{IChunkStore, ISparseIndex, NeighborQuery};
pub use embedder::IEmbedder;
pub use retriever::IRetriever;
pub use sparse_encoder::ISparseEncoder;
