//! Template engine module
//!
//! Provides placeholder parsing, case transformation, and rendering of file
//! contents and templated paths.

pub mod engine;
pub mod error;
pub mod parser;
pub mod resolver;

// Re-export public API
pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use parser::{Delimiters, ParsedTemplate, TemplateElement, TemplateParser};
pub use resolver::{CaseTransform, Placeholder, PlaceholderResolver};
