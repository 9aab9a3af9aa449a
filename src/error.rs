use std::path::PathBuf;
use thiserror::Error;

use crate::intent::Intent;
use crate::retrieval::RetrieveError;
use crate::semantic::{EmbeddingError, IndexError};

/// Main error type for the skyrag crate
#[derive(Error, Debug)]
pub enum SkyragError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Registry integrity defect: an intent without a registered template.
    /// Raised while the registry is built, never per question.
    #[error("No query template registered for intent '{intent}'")]
    MalformedTemplate { intent: Intent },

    /// Retrieval errors. Single-retriever failures are recovered inside the
    /// pipeline; this surfaces only when no evidence can be produced at all.
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    /// Embedding model errors during index construction
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// Vector index errors during index construction
    #[error(transparent)]
    Index(#[from] IndexError),

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for skyrag operations
pub type Result<T> = std::result::Result<T, SkyragError>;
