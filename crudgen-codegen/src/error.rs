//! Error types for crudgen-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for crudgen-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse model definition: {0}")]
    ParseError(String),

    #[error("Malformed definition {origin}: {reason}")]
    MalformedDefinition { origin: String, reason: String },

    #[error("Association type {kind} not supported (association '{association}')")]
    UnsupportedAssociationKind { association: String, kind: String },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Generation finished with {failures} failure(s)")]
    Incomplete { failures: usize },
}

impl CodegenError {
    pub(crate) fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        CodegenError::MalformedDefinition {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
