use std::collections::HashMap;

use groundwork_core::config::*;
use groundwork_core::errors::ConfigError;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn complete_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("QDRANT_SERVER", "http://qdrant:6333"),
        ("CONNECTION_STRING", "/var/lib/groundwork/secondary.db"),
        ("EMBEDDINGS_URL", "http://tei:8080/embed"),
        ("SPLADE_EMBEDDINGS_URL", "http://tei:8081/embed_sparse"),
    ]
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = GroundworkConfig::from_toml("").unwrap();

    assert_eq!(config.primary.sparse_vector_name, "sparse_vector");
    assert_eq!(config.primary.sparse_collection_suffix, "_sparse");
    assert_eq!(config.primary.payload_content_key, "page_content");
    assert_eq!(config.primary.payload_metadata_key, "metadata");

    assert_eq!(config.secondary.read_pool_size, 4);
    assert_eq!(config.secondary.busy_timeout_ms, 5_000);

    assert_eq!(config.retrieval.candidate_pad, 0);
    assert_eq!(config.retrieval.rrf_c, 60);
    assert_eq!(config.retrieval.request_timeout_ms, 10_000);

    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[primary]
url = "http://localhost:6333"

[retrieval]
candidate_pad = 5
"#;
    let config = GroundworkConfig::from_toml(toml).unwrap();
    assert_eq!(config.primary.url, "http://localhost:6333");
    assert_eq!(config.retrieval.candidate_pad, 5);
    // Non-overridden fields keep defaults
    assert_eq!(config.primary.sparse_vector_name, "sparse_vector");
    assert_eq!(config.retrieval.rrf_c, 60);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = GroundworkConfig::from_toml("[retrieval\nrrf_c = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn env_overrides_fill_endpoints() {
    let mut config = GroundworkConfig::default();
    let mut pairs = complete_env();
    pairs.push(("EMBEDDINGS_API_KEY", "secret"));
    pairs.push(("EXTRA_RETRIVED", "3"));
    config.apply_env_overrides(env_from(&pairs)).unwrap();

    assert_eq!(config.primary.url, "http://qdrant:6333");
    assert_eq!(config.secondary.db_path, "/var/lib/groundwork/secondary.db");
    assert_eq!(config.encoders.embeddings_api_key.as_deref(), Some("secret"));
    assert_eq!(config.encoders.sparse_api_key, None);
    assert_eq!(config.retrieval.candidate_pad, 3);
    config.validate().unwrap();
}

#[test]
fn non_numeric_pad_is_rejected() {
    let mut config = GroundworkConfig::default();
    let err = config
        .apply_env_overrides(env_from(&[("EXTRA_RETRIVED", "many")]))
        .unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "EXTRA_RETRIVED"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_endpoint_fails_validation() {
    let mut config = GroundworkConfig::default();
    let pairs: Vec<_> = complete_env()
        .into_iter()
        .filter(|(k, _)| *k != "SPLADE_EMBEDDINGS_URL")
        .collect();
    config.apply_env_overrides(env_from(&pairs)).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("SPLADE_EMBEDDINGS_URL"));
}

#[test]
fn zero_timeout_fails_validation() {
    let mut config = GroundworkConfig::default();
    config.apply_env_overrides(env_from(&complete_env())).unwrap();
    config.retrieval.request_timeout_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = GroundworkConfig::default();
    config.apply_env_overrides(env_from(&complete_env())).unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = GroundworkConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.primary.url, config.primary.url);
    assert_eq!(reparsed.secondary.db_path, config.secondary.db_path);
}
