/// Failures talking to a store or an encoding service.
///
/// Every variant names the backend so the caller can tell which
/// collaborator went away.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{backend} unreachable: {reason}")]
    Unreachable { backend: String, reason: String },

    #[error("{backend} timed out after {timeout_ms}ms")]
    Timeout { backend: String, timeout_ms: u64 },

    #[error("{backend} returned {status}: {body}")]
    Status {
        backend: String,
        status: u16,
        body: String,
    },

    #[error("{backend} sent a malformed response: {reason}")]
    MalformedResponse { backend: String, reason: String },

    #[error("{backend} storage error: {reason}")]
    Storage { backend: String, reason: String },
}

impl BackendError {
    /// Name of the backend that failed.
    pub fn backend(&self) -> &str {
        match self {
            Self::Unreachable { backend, .. }
            | Self::Timeout { backend, .. }
            | Self::Status { backend, .. }
            | Self::MalformedResponse { backend, .. }
            | Self::Storage { backend, .. } => backend,
        }
    }
}
