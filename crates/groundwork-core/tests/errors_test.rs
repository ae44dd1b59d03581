use groundwork_core::errors::*;
use groundwork_core::models::{RetrieverType, StoreTag};

#[test]
fn backend_error_carries_backend_name() {
    let err = BackendError::Timeout {
        backend: "qdrant".into(),
        timeout_ms: 250,
    };
    assert_eq!(err.backend(), "qdrant");
    let msg = err.to_string();
    assert!(msg.contains("qdrant"));
    assert!(msg.contains("250"));
}

#[test]
fn backend_error_converts_and_is_unavailable() {
    let err: GroundError = BackendError::Unreachable {
        backend: "tei".into(),
        reason: "connection refused".into(),
    }
    .into();
    assert!(matches!(err, GroundError::Backend(_)));
    assert!(err.is_backend_unavailable());
}

#[test]
fn invalid_request_and_internal_are_not_backend_failures() {
    assert!(!GroundError::invalid_request("bad").is_backend_unavailable());
    assert!(!GroundError::internal("bug").is_backend_unavailable());
}

#[test]
fn retrieval_failed_carries_strategy_store_and_cause() {
    let cause: GroundError = BackendError::Status {
        backend: "secondary-sql".into(),
        status: 503,
        body: "down".into(),
    }
    .into();
    let err = GroundError::RetrievalFailed {
        strategy: RetrieverType::Dense,
        store: StoreTag::Secondary,
        primary_cause: Some("qdrant unreachable".into()),
        cause: Box::new(cause),
    };
    let msg = err.to_string();
    assert!(msg.contains("dense"));
    assert!(msg.contains("secondary"));
    assert!(msg.contains("503"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn config_error_converts_to_ground_error() {
    let err: GroundError = ConfigError::MissingValue {
        key: "primary.url".into(),
    }
    .into();
    assert!(matches!(err, GroundError::Config(_)));
    assert!(err.to_string().contains("primary.url"));
}
