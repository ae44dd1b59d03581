use crate::errors::GroundResult;
use crate::models::SparseVector;

/// Sparse (term-weighted) encoding service.
pub trait ISparseEncoder: Send + Sync {
    /// Encode text into index / weight pairs.
    fn encode(&self, text: &str) -> GroundResult<SparseVector>;

    fn name(&self) -> &str;
}
