//! Scaffold orchestration
//!
//! Runs the pipeline for one command name: derive the binding once, then
//! read, render, resolve and write every unit the source lists. A failing
//! unit is logged and recorded in the report; the remaining units still run.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    binder::ParameterBinder,
    error::{ErrorKind, ScaffoldError},
    models::{RenderOptions, TemplateContext, TemplateUnit, UnitKind},
    naming::NameDeriver,
    request::ScaffoldRequest,
    resolver::DestinationResolver,
    source::{RawTemplate, TemplateSource},
    templates::TemplateEngine,
    writer::{FileWriteResult, ScaffoldWriter, WriterConfig},
};

/// Steps a run passes through, recorded in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "unit", rename_all = "snake_case")]
pub enum RunPhase {
    /// Nothing started yet
    Idle,
    /// Computing the parameter binding
    Deriving,
    /// Reading and rendering a unit
    Rendering(UnitKind),
    /// Writing a rendered unit
    Writing(UnitKind),
    /// The unit's previous phase failed
    UnitFailed(UnitKind),
    /// Every unit has been attempted
    Done,
}

/// How one unit ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnitStatus {
    /// Every file was handled
    Written {
        /// Per-file results
        files: Vec<FileWriteResult>,
    },
    /// The unit failed part way
    Failed {
        /// Error classification
        kind: ErrorKind,
        /// Human-readable error
        message: String,
        /// Files handled before the failure; they are left in place
        written: Vec<FileWriteResult>,
    },
}

/// Outcome of a single unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutcome {
    /// The unit that was processed
    pub unit: TemplateUnit,
    /// Resolved destination relative to the project root
    pub destination: PathBuf,
    /// Result
    pub status: UnitStatus,
}

impl UnitOutcome {
    /// Whether the unit failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, UnitStatus::Failed { .. })
    }

    /// File results, whatever the status
    pub fn files(&self) -> &[FileWriteResult] {
        match &self.status {
            UnitStatus::Written { files } => files,
            UnitStatus::Failed { written, .. } => written,
        }
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldReport {
    /// Command name, verbatim
    pub command_name: String,
    /// Whether this was a dry-run
    pub dry_run: bool,
    /// One entry per unit, in processing order
    pub outcomes: Vec<UnitOutcome>,
    /// Phase trace
    pub phases: Vec<RunPhase>,
}

impl ScaffoldReport {
    /// True when no unit failed
    pub fn is_success(&self) -> bool {
        !self.outcomes.iter().any(UnitOutcome::is_failed)
    }

    /// Failed units
    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failed())
    }

    /// Paths whose contents are now (or would be) the rendered ones
    pub fn files_written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .flat_map(UnitOutcome::files)
            .filter(|file| file.written())
            .map(|file| file.path.as_path())
            .collect()
    }
}

/// Runs the scaffold pipeline against an injected template source
pub struct Scaffolder {
    source: Box<dyn TemplateSource>,
    resolver: DestinationResolver,
    engine: TemplateEngine,
    writer_config: WriterConfig,
    options: RenderOptions,
    params: BTreeMap<String, String>,
}

impl Scaffolder {
    /// Create a scaffolder writing beneath `project_root`
    pub fn new(source: impl TemplateSource + 'static, project_root: impl Into<PathBuf>) -> Self {
        Self {
            source: Box::new(source),
            resolver: DestinationResolver::new(project_root),
            engine: TemplateEngine::new(),
            writer_config: WriterConfig::default(),
            options: RenderOptions::default(),
            params: BTreeMap::new(),
        }
    }

    /// Set collision policy and dry-run mode
    pub fn with_writer_config(mut self, config: WriterConfig) -> Self {
        self.writer_config = config;
        self
    }

    /// Set placeholder delimiters
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Extra parameters layered under the derived names
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Scaffold one command
    ///
    /// Unit failures never make this return an error; they are recorded in
    /// the report. The only error is an invalid extra parameter, detected
    /// before anything is rendered.
    pub fn run(&self, request: &ScaffoldRequest) -> Result<ScaffoldReport, ScaffoldError> {
        let command_name = request.command_name();
        let mut phases = vec![RunPhase::Idle, RunPhase::Deriving];

        debug!(command = command_name, "Deriving parameter binding");
        let binding = NameDeriver::derive(request);
        let context = ParameterBinder::new(&binding)
            .with_params(self.params.clone())?
            .with_options(self.options.clone())
            .bind();

        let writer =
            ScaffoldWriter::with_config(self.resolver.project_root(), self.writer_config.clone());

        let mut outcomes = Vec::new();
        for unit in self.source.list_units() {
            let destination = self.resolver.resolve_unit(&unit, command_name);
            let mut written = Vec::new();

            let status = match self.process_unit(
                &unit,
                command_name,
                &destination,
                &context,
                &writer,
                &mut phases,
                &mut written,
            ) {
                Ok(()) => {
                    info!(
                        unit = %unit.source.display(),
                        destination = %destination.display(),
                        files = written.len(),
                        "Generated unit"
                    );
                    UnitStatus::Written { files: written }
                }
                Err(e) => {
                    phases.push(RunPhase::UnitFailed(unit.kind));
                    error!(
                        unit = %unit.source.display(),
                        kind = %unit.kind,
                        error = %e,
                        "Failed to generate unit"
                    );
                    UnitStatus::Failed {
                        kind: e.kind(),
                        message: e.to_string(),
                        written,
                    }
                }
            };

            outcomes.push(UnitOutcome {
                unit,
                destination,
                status,
            });
        }

        phases.push(RunPhase::Done);
        debug!(command = command_name, units = outcomes.len(), "Run complete");

        Ok(ScaffoldReport {
            command_name: command_name.to_string(),
            dry_run: self.writer_config.dry_run,
            outcomes,
            phases,
        })
    }

    fn process_unit(
        &self,
        unit: &TemplateUnit,
        command_name: &str,
        destination: &Path,
        context: &TemplateContext,
        writer: &ScaffoldWriter,
        phases: &mut Vec<RunPhase>,
        written: &mut Vec<FileWriteResult>,
    ) -> Result<(), ScaffoldError> {
        phases.push(RunPhase::Rendering(unit.kind));
        debug!(unit = %unit.source.display(), kind = %unit.kind, "Rendering unit");

        let template_error = |e| ScaffoldError::from_template(e, &unit.source);
        let results = match self.source.read_raw(unit).map_err(template_error)? {
            RawTemplate::File(file) => vec![self
                .engine
                .render_file(&file, destination.to_path_buf(), context)
                .map_err(template_error)?],
            RawTemplate::Directory(files) => self
                .engine
                .render_tree(&files, context, |relative| {
                    self.resolver.resolve_tree_entry(unit, command_name, relative)
                })
                .map_err(template_error)?,
        };

        phases.push(RunPhase::Writing(unit.kind));
        debug!(unit = %unit.source.display(), files = results.len(), "Writing unit");

        writer.write_unit(&results, written)?;
        if unit.kind == UnitKind::Directory {
            writer.ensure_directory(destination)?;
        }

        Ok(())
    }
}
