//! Template error types

use thiserror::Error;

/// Errors raised while parsing or rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A referenced key has no bound value
    #[error("Missing placeholder value: {0}")]
    MissingPlaceholder(String),

    /// Template syntax could not be parsed
    #[error("Invalid template syntax at line {line}: {message}")]
    InvalidSyntax {
        /// Line number where the error occurred
        line: usize,
        /// Error message describing the syntax issue
        message: String,
    },

    /// A templated path rendered to something that is not a relative path
    #[error("Invalid rendered path '{path}': {message}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why it was rejected
        message: String,
    },

    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// IO error while reading a template
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
