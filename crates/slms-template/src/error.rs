//! Error types for template operations

use thiserror::Error;

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors that can occur during template operations
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No template registered for the document type
    #[error("No template registered for document type '{0}'")]
    TemplateNotRegistered(String),

    /// Document type slug not recognised
    #[error("Unknown document type '{0}'")]
    UnknownDocumentType(String),

    /// Template body was empty
    #[error("Template '{0}' is empty")]
    EmptyTemplate(String),

    /// File loading error
    #[error("Failed to load template file '{path}': {detail}")]
    FileLoadError { path: String, detail: String },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
