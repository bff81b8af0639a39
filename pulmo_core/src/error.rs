//! Error types for the pulmo_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pulmo_core operations
///
/// Segment mutators never produce these; they only compute or abstain.
/// Errors come from loading, binding and validating models.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed parameter range string
    #[error("Invalid range '{input}': {reason}")]
    Range { input: String, reason: String },

    /// No registered model with this short name
    #[error("Unknown disease model '{0}'")]
    UnknownModel(String),

    /// Model declares no parameter with this name or index
    #[error("Disease model '{model}' has no parameter '{parameter}'")]
    UnknownParameter { model: String, parameter: String },

    /// Parameter values do not match the declared arity
    #[error("Disease model '{model}' expects {expected} parameter(s), got {actual}")]
    ParameterCount {
        model: String,
        expected: usize,
        actual: usize,
    },

    /// Registry rejected a model
    #[error("Registry error: {0}")]
    Registry(String),
}

impl Error {
    pub(crate) fn range(input: &str, reason: impl Into<String>) -> Self {
        Error::Range {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
