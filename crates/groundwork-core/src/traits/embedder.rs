use crate::errors::GroundResult;

/// Dense embedding service.
pub trait IEmbedder: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> GroundResult<Vec<f32>>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
