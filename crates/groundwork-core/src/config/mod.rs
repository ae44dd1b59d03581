//! Top-level configuration with layered resolution.

pub mod defaults;
mod encoder_config;
mod observability_config;
mod retrieval_config;
mod store_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use encoder_config::EncoderConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use store_config::{PrimaryStoreConfig, SecondaryStoreConfig};

use crate::errors::ConfigError;

/// Environment variable names. Kept compatible with existing deployments.
pub mod env {
    pub const QDRANT_SERVER: &str = "QDRANT_SERVER";
    pub const QDRANT_API_KEY: &str = "QDRANT_API_KEY";
    pub const CONNECTION_STRING: &str = "CONNECTION_STRING";
    pub const EMBEDDINGS_URL: &str = "EMBEDDINGS_URL";
    pub const EMBEDDINGS_API_KEY: &str = "EMBEDDINGS_API_KEY";
    pub const SPLADE_EMBEDDINGS_URL: &str = "SPLADE_EMBEDDINGS_URL";
    pub const SPLADE_EMBEDDINGS_API_KEY: &str = "SPLADE_EMBEDDINGS_API_KEY";
    pub const EXTRA_RETRIVED: &str = "EXTRA_RETRIVED";
    pub const REQUEST_TIMEOUT_MS: &str = "GROUNDWORK_REQUEST_TIMEOUT_MS";
    pub const LOG: &str = "GROUNDWORK_LOG";
}

/// Configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. Environment variables
/// 2. TOML file, when given
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundworkConfig {
    pub encoders: EncoderConfig,
    pub primary: PrimaryStoreConfig,
    pub secondary: SecondaryStoreConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl GroundworkConfig {
    /// Load configuration from an optional file plus the process environment,
    /// then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Render the resolved configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }

    /// Overlay values from the environment. `lookup` abstracts `std::env::var`
    /// so tests don't have to mutate the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty(env::QDRANT_SERVER) {
            self.primary.url = v;
        }
        if let Some(v) = non_empty(env::QDRANT_API_KEY) {
            self.primary.api_key = Some(v);
        }
        if let Some(v) = non_empty(env::CONNECTION_STRING) {
            self.secondary.db_path = v;
        }
        if let Some(v) = non_empty(env::EMBEDDINGS_URL) {
            self.encoders.embeddings_url = v;
        }
        if let Some(v) = non_empty(env::EMBEDDINGS_API_KEY) {
            self.encoders.embeddings_api_key = Some(v);
        }
        if let Some(v) = non_empty(env::SPLADE_EMBEDDINGS_URL) {
            self.encoders.sparse_url = v;
        }
        if let Some(v) = non_empty(env::SPLADE_EMBEDDINGS_API_KEY) {
            self.encoders.sparse_api_key = Some(v);
        }
        if let Some(v) = non_empty(env::EXTRA_RETRIVED) {
            self.retrieval.candidate_pad =
                v.trim()
                    .parse()
                    .map_err(|_| ConfigError::ValidationFailed {
                        field: env::EXTRA_RETRIVED.to_string(),
                        message: format!("should be a non-negative integer, got {v:?}"),
                    })?;
        }
        if let Some(v) = non_empty(env::REQUEST_TIMEOUT_MS) {
            self.retrieval.request_timeout_ms =
                v.trim()
                    .parse()
                    .map_err(|_| ConfigError::ValidationFailed {
                        field: env::REQUEST_TIMEOUT_MS.to_string(),
                        message: format!("should be a positive integer, got {v:?}"),
                    })?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("primary.url", env::QDRANT_SERVER, &self.primary.url),
            ("secondary.db_path", env::CONNECTION_STRING, &self.secondary.db_path),
            ("encoders.embeddings_url", env::EMBEDDINGS_URL, &self.encoders.embeddings_url),
            ("encoders.sparse_url", env::SPLADE_EMBEDDINGS_URL, &self.encoders.sparse_url),
        ];
        for (field, var, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue {
                    key: format!("{field} (or {var})"),
                });
            }
        }
        if self.retrieval.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.request_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(1..=defaults::MAX_READ_POOL_SIZE).contains(&self.secondary.read_pool_size) {
            return Err(ConfigError::ValidationFailed {
                field: "secondary.read_pool_size".to_string(),
                message: format!("must be between 1 and {}", defaults::MAX_READ_POOL_SIZE),
            });
        }
        if self.primary.sparse_vector_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "primary.sparse_vector_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
