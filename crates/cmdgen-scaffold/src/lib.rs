#![warn(missing_docs)]

//! Scaffolding engine for cmdgen
//!
//! Renders a command's template units (a single file plus a directory tree)
//! into a project: derives name forms from the command name, binds them into
//! a rendering context, substitutes placeholders in contents and paths,
//! resolves destinations, and writes the results with per-unit failure
//! containment.

pub mod binder;
pub mod error;
pub mod models;
pub mod naming;
pub mod request;
pub mod resolver;
pub mod scaffolder;
pub mod source;
pub mod templates;
pub mod writer;

// Re-export public API
pub use binder::ParameterBinder;
pub use error::{ErrorKind, ScaffoldError};
pub use models::{
    ParameterBinding, RenderOptions, RenderResult, TemplateContent, TemplateContext,
    TemplateFile, TemplateUnit, UnitKind,
};
pub use naming::{pluralize, singularize, NameDeriver};
pub use request::ScaffoldRequest;
pub use resolver::DestinationResolver;
pub use scaffolder::{RunPhase, ScaffoldReport, Scaffolder, UnitOutcome, UnitStatus};
pub use source::{FsTemplateSource, MemoryTemplateSource, RawTemplate, TemplateSource};
pub use templates::{
    CaseTransform, Delimiters, ParsedTemplate, PlaceholderResolver, TemplateElement,
    TemplateEngine, TemplateError, TemplateParser,
};
pub use writer::{CollisionPolicy, FileWriteResult, ScaffoldWriter, WriteAction, WriterConfig};
