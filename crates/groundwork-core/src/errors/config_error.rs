/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("required config value missing: {key}")]
    MissingValue { key: String },

    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },
}
