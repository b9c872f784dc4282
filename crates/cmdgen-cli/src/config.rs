//! Configuration loading
//!
//! Layers, lowest to highest: built-in defaults, `<project-root>/cmdgen.toml`,
//! `CMDGEN_*` environment variables. Command-line flags are applied on top
//! by the command itself.

use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

use cmdgen_scaffold::{CollisionPolicy, Delimiters, RenderOptions};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Configuration file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "cmdgen.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CMDGEN";

/// Default output directory for generated commands
pub const DEFAULT_BASE_PATH: &str = "app/lib/commands";

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CmdgenConfig {
    /// Template root on disk; the bundled templates are used when unset
    pub templates_dir: Option<PathBuf>,
    /// Where generated commands land, relative to the project root
    pub base_path: PathBuf,
    /// What to do with existing files
    pub collision: CollisionPolicy,
    /// Opening marker for placeholders in file contents
    pub content_open: String,
    /// Closing marker for placeholders in file contents
    pub content_close: String,
    /// Opening marker for placeholders in file and directory names
    pub path_open: String,
    /// Closing marker for placeholders in file and directory names
    pub path_close: String,
    /// Extra template parameters
    pub params: BTreeMap<String, String>,
}

impl Default for CmdgenConfig {
    fn default() -> Self {
        let content = Delimiters::content();
        let path = Delimiters::path();
        Self {
            templates_dir: None,
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            collision: CollisionPolicy::default(),
            content_open: content.open,
            content_close: content.close,
            path_open: path.open,
            path_close: path.close,
            params: BTreeMap::new(),
        }
    }
}

impl CmdgenConfig {
    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.base_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("base_path must not be empty".to_string()));
        }
        if !self
            .base_path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(format!(
                "base_path must be a relative path inside the project, got '{}'",
                self.base_path.display()
            )));
        }
        self.render_options().map(|_| ())
    }

    /// Placeholder delimiters as render options
    pub fn render_options(&self) -> Result<RenderOptions> {
        let delimiters = |open: &str, close: &str, what: &str| {
            Delimiters::new(open, close)
                .map_err(|e| ConfigError::Validation(format!("{} delimiters: {}", what, e)))
        };

        Ok(RenderOptions {
            content_delimiters: delimiters(&self.content_open, &self.content_close, "content")?,
            path_delimiters: delimiters(&self.path_open, &self.path_close, "path")?,
        })
    }

    /// Template directory resolved against the project root
    pub fn templates_dir_in(&self, project_root: &Path) -> Option<PathBuf> {
        self.templates_dir.as_ref().map(|dir| project_root.join(dir))
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Manager for `<project_root>/cmdgen.toml`
    pub fn for_project(project_root: &Path) -> Self {
        Self::with_path(project_root.join(CONFIG_FILE_NAME))
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration
    ///
    /// A missing file is not an error. Nested keys in the environment use a
    /// double underscore: `CMDGEN_PARAMS__MODEL_NAME`.
    pub fn load(&self) -> Result<CmdgenConfig> {
        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: CmdgenConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
