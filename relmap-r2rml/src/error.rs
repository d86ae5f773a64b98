//! R2RML error types

use thiserror::Error;

/// R2RML-specific errors
#[derive(Debug, Error)]
pub enum R2rmlError {
    /// Error parsing the R2RML mapping document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing required property in mapping
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    /// Invalid property value
    #[error("Invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },

    /// Invalid template syntax
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

/// Result type for R2RML operations
pub type R2rmlResult<T> = Result<T, R2rmlError>;
