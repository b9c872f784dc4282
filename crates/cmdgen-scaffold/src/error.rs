//! Error types for scaffolding

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::templates::TemplateError;

/// Errors that can occur while scaffolding a command
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The command name is missing, empty, or not usable as a path
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A template source referenced by a unit does not exist
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template references a key absent from the parameter binding
    #[error("Unresolved placeholder '{placeholder}' in template {template}")]
    UnresolvedPlaceholder {
        /// The missing binding key
        placeholder: String,
        /// Template the placeholder was found in
        template: String,
    },

    /// A template could not be parsed or produced an unusable path
    #[error("Invalid template {template}: {message}")]
    InvalidTemplate {
        /// Template that failed
        template: String,
        /// Parser or path error message
        message: String,
    },

    /// The destination exists and the collision policy forbids touching it
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Writing an artifact to disk failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Serializable classification of a [`ScaffoldError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`ScaffoldError::InvalidInput`]
    InvalidInput,
    /// See [`ScaffoldError::TemplateNotFound`]
    TemplateNotFound,
    /// See [`ScaffoldError::UnresolvedPlaceholder`]
    UnresolvedPlaceholder,
    /// See [`ScaffoldError::InvalidTemplate`]
    InvalidTemplate,
    /// See [`ScaffoldError::DestinationExists`]
    DestinationExists,
    /// See [`ScaffoldError::WriteFailed`]
    WriteFailure,
}

impl ScaffoldError {
    /// Attach the template identifier to a renderer error
    pub fn from_template(error: TemplateError, template: &Path) -> Self {
        let template = template.display().to_string();
        match error {
            TemplateError::MissingPlaceholder(placeholder) => {
                ScaffoldError::UnresolvedPlaceholder {
                    placeholder,
                    template,
                }
            }
            TemplateError::NotFound(_) => ScaffoldError::TemplateNotFound(template),
            TemplateError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ScaffoldError::TemplateNotFound(template)
            }
            TemplateError::Io(e) => ScaffoldError::InvalidTemplate {
                template,
                message: format!("failed to read template: {}", e),
            },
            other => ScaffoldError::InvalidTemplate {
                template,
                message: other.to_string(),
            },
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScaffoldError::InvalidInput(_) => ErrorKind::InvalidInput,
            ScaffoldError::TemplateNotFound(_) => ErrorKind::TemplateNotFound,
            ScaffoldError::UnresolvedPlaceholder { .. } => ErrorKind::UnresolvedPlaceholder,
            ScaffoldError::InvalidTemplate { .. } => ErrorKind::InvalidTemplate,
            ScaffoldError::DestinationExists(_) => ErrorKind::DestinationExists,
            ScaffoldError::WriteFailed { .. } => ErrorKind::WriteFailure,
        }
    }
}
