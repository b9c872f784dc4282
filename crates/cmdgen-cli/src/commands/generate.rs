// Generate a command from the command templates

use std::path::PathBuf;

use cmdgen_scaffold::{
    CollisionPolicy, ScaffoldReport, ScaffoldRequest, Scaffolder, UnitStatus, WriterConfig,
};
use tracing::debug;

use super::Command;
use crate::{
    bundled,
    config::ConfigManager,
    error::{CliError, CliResult},
    logging::VerbosityLevel,
    output::OutputStyle,
};

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

/// Scaffold `<base>/<name>.liquid` and `<base>/<name>/`
pub struct GenerateCommand {
    pub command_name: String,
    pub project_root: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub collision: Option<CollisionPolicy>,
    pub dry_run: bool,
    pub params: Vec<(String, String)>,
    pub format: OutputFormat,
    pub strict: bool,
}

impl GenerateCommand {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            project_root: PathBuf::from("."),
            templates_dir: None,
            collision: None,
            dry_run: false,
            params: Vec::new(),
            format: OutputFormat::Text,
            strict: false,
        }
    }

    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = project_root.into();
        self
    }

    pub fn with_templates_dir(mut self, templates_dir: Option<PathBuf>) -> Self {
        self.templates_dir = templates_dir;
        self
    }

    /// Collision policy from flags; `None` defers to configuration
    pub fn with_collision(mut self, collision: Option<CollisionPolicy>) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate the name, load configuration and scaffold
    ///
    /// An invalid name fails here, before anything is read or written.
    pub fn run(&self) -> CliResult<ScaffoldReport> {
        let request = ScaffoldRequest::new(self.command_name.as_str())?;

        let config = ConfigManager::for_project(&self.project_root).load()?;
        let options = config.render_options()?;
        let templates_dir = self
            .templates_dir
            .clone()
            .or_else(|| config.templates_dir_in(&self.project_root));

        let mut params = config.params.clone();
        params.extend(self.params.iter().cloned());

        let writer_config = WriterConfig {
            dry_run: self.dry_run,
            collision: self.collision.unwrap_or(config.collision),
        };

        debug!(
            command = request.command_name(),
            project_root = %self.project_root.display(),
            templates = ?templates_dir,
            ?writer_config,
            "Generating command"
        );

        let source = bundled::command_source(templates_dir, &config.base_path);
        let report = Scaffolder::new(source, &self.project_root)
            .with_writer_config(writer_config)
            .with_options(options)
            .with_params(params)
            .run(&request)?;

        Ok(report)
    }

    /// Render a report for the console
    pub fn render_report(
        report: &ScaffoldReport,
        format: OutputFormat,
        style: &OutputStyle,
        list_files: bool,
    ) -> CliResult<String> {
        if format == OutputFormat::Json {
            return serde_json::to_string_pretty(report)
                .map_err(|e| CliError::Internal(format!("Failed to serialize report: {}", e)));
        }

        let mut lines = Vec::new();

        for outcome in report.failures() {
            if let UnitStatus::Failed { message, .. } = &outcome.status {
                lines.push(style.warning(&format!(
                    "Could not generate {} {}: {}",
                    outcome.unit.kind,
                    outcome.destination.display(),
                    message
                )));
            }
        }

        if list_files {
            for path in report.files_written() {
                lines.push(style.list_item(&style.path(&path.display().to_string())));
            }
        }

        if report.dry_run {
            lines.push(style.info("Dry run: no files were written"));
        }

        lines.push(style.success("Command generated"));
        Ok(lines.join("\n"))
    }
}

impl Command for GenerateCommand {
    fn execute(&self) -> CliResult<()> {
        let report = self.run()?;

        let style = OutputStyle::default();
        let list_files = VerbosityLevel::Verbose.should_output() || report.dry_run;
        println!(
            "{}",
            Self::render_report(&report, self.format, &style, list_files)?
        );

        if self.strict && !report.is_success() {
            return Err(CliError::UnitsFailed {
                failed: report.failures().count(),
            });
        }

        Ok(())
    }
}
