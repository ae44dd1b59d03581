//! Encoder clients against a mock HTTP server.

use std::time::Duration;

use groundwork_core::errors::{BackendError, GroundError};
use groundwork_core::models::SparseVector;
use groundwork_core::traits::{IEmbedder, ISparseEncoder};
use groundwork_encoders::{HttpEmbedder, HttpSparseEncoder};
use httpmock::prelude::*;
use serde_json::json;

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn embedder_accepts_batched_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/embed")
            .json_body(json!({"inputs": "what is rust"}));
        then.status(200).json_body(json!([[0.25, -0.5, 1.0]]));
    });

    let embedder = HttpEmbedder::new(server.url("/embed"), None, TIMEOUT).unwrap();
    let vector = embedder.embed("what is rust").unwrap();

    mock.assert();
    assert_eq!(vector, vec![0.25, -0.5, 1.0]);
}

#[test]
fn embedder_accepts_flat_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/embed");
        then.status(200).json_body(json!([1.0, 2.0]));
    });

    let embedder = HttpEmbedder::new(server.url("/embed"), None, TIMEOUT).unwrap();
    assert_eq!(embedder.embed("q").unwrap(), vec![1.0, 2.0]);
}

#[test]
fn embedder_sends_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/embed")
            .header("authorization", "Bearer secret");
        then.status(200).json_body(json!([[0.1]]));
    });

    let embedder =
        HttpEmbedder::new(server.url("/embed"), Some("secret".into()), TIMEOUT).unwrap();
    embedder.embed("q").unwrap();
    mock.assert();
}

#[test]
fn embedder_maps_server_error_to_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/embed");
        then.status(503).body("overloaded");
    });

    let embedder = HttpEmbedder::new(server.url("/embed"), None, TIMEOUT).unwrap();
    let err = embedder.embed("q").unwrap_err();
    match err {
        GroundError::Backend(BackendError::Status { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn embedder_rejects_empty_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/embed");
        then.status(200).json_body(json!([]));
    });

    let embedder = HttpEmbedder::new(server.url("/embed"), None, TIMEOUT).unwrap();
    let err = embedder.embed("q").unwrap_err();
    assert!(matches!(
        err,
        GroundError::Backend(BackendError::MalformedResponse { .. })
    ));
}

#[test]
fn embedder_rejects_non_json_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/embed");
        then.status(200).body("<html>gateway</html>");
    });

    let embedder = HttpEmbedder::new(server.url("/embed"), None, TIMEOUT).unwrap();
    let err = embedder.embed("q").unwrap_err();
    assert!(err.is_backend_unavailable());
}

#[test]
fn embedder_reports_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/embed");
        then.status(200)
            .delay(Duration::from_millis(800))
            .json_body(json!([[0.1]]));
    });

    let embedder =
        HttpEmbedder::new(server.url("/embed"), None, Duration::from_millis(100)).unwrap();
    let err = embedder.embed("q").unwrap_err();
    assert!(
        matches!(err, GroundError::Backend(BackendError::Timeout { timeout_ms: 100, .. })),
        "got {err:?}"
    );
}

#[test]
fn embedder_reports_unreachable_host() {
    let embedder = HttpEmbedder::new("http://127.0.0.1:1/embed", None, TIMEOUT).unwrap();
    let err = embedder.embed("q").unwrap_err();
    assert!(err.is_backend_unavailable());
    assert_eq!(embedder.name(), "embeddings");
}

#[test]
fn sparse_encoder_builds_parallel_arrays() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sparse")
            .json_body(json!({"inputs": "rust ownership"}));
        then.status(200).json_body(json!([[
            {"index": 17, "value": 0.5},
            {"index": 4021, "value": 1.25}
        ]]));
    });

    let encoder = HttpSparseEncoder::new(server.url("/sparse"), None, TIMEOUT).unwrap();
    let vector = encoder.encode("rust ownership").unwrap();

    mock.assert();
    assert_eq!(vector.indices, vec![17, 4021]);
    assert_eq!(vector.values, vec![0.5, 1.25]);
}

#[test]
fn sparse_encoder_accepts_flat_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sparse");
        then.status(200)
            .json_body(json!([{"index": 3, "value": 0.75}]));
    });

    let encoder = HttpSparseEncoder::new(server.url("/sparse"), None, TIMEOUT).unwrap();
    let vector = encoder.encode("q").unwrap();
    assert_eq!(vector.len(), 1);
}

#[test]
fn sparse_encoder_accepts_query_without_terms() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sparse");
        then.status(200).json_body(json!([]));
    });

    let encoder = HttpSparseEncoder::new(server.url("/sparse"), None, TIMEOUT).unwrap();
    let vector = encoder.encode("the").unwrap();
    assert!(vector.is_empty());
}

#[test]
fn sparse_encoder_accepts_batch_without_terms() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sparse");
        then.status(200).json_body(json!([[]]));
    });

    let encoder = HttpSparseEncoder::new(server.url("/sparse"), None, TIMEOUT).unwrap();
    assert_eq!(encoder.encode("the").unwrap(), SparseVector::default());
}

#[test]
fn sparse_encoder_rejects_wrong_shape() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sparse");
        then.status(200).json_body(json!({"indices": [1], "values": [0.1]}));
    });

    let encoder = HttpSparseEncoder::new(server.url("/sparse"), None, TIMEOUT).unwrap();
    let err = encoder.encode("q").unwrap_err();
    assert!(matches!(
        err,
        GroundError::Backend(BackendError::MalformedResponse { .. })
    ));
}
