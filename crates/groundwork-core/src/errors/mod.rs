mod backend_error;
mod config_error;

pub use backend_error::BackendError;
pub use config_error::ConfigError;

use crate::models::{RetrieverType, StoreTag};

/// Top-level error for the retrieval engine.
#[derive(Debug, thiserror::Error)]
pub enum GroundError {
    /// Rejected before any network call.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// A store or encoding service call failed. The only kind that triggers fallback.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Terminal failure after every permitted attempt was made.
    #[error("retrieval failed (strategy={strategy}, store={store}): {cause}")]
    RetrievalFailed {
        strategy: RetrieverType,
        store: StoreTag,
        /// Failure of the primary attempt when the secondary also failed.
        primary_cause: Option<String>,
        #[source]
        cause: Box<GroundError>,
    },

    /// A defect on our side: never triggers fallback.
    #[error("internal error: {reason}")]
    Internal { reason: String },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl GroundError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Whether this failure means "the backend is down" rather than
    /// "the request or our code is wrong".
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// Convenience alias used throughout the workspace.
pub type GroundResult<T> = Result<T, GroundError>;
