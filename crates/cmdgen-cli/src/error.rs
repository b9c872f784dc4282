// CLI error types and exit codes

use cmdgen_scaffold::ScaffoldError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{failed} unit(s) failed to generate")]
    UnitsFailed { failed: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'cmdgen command --help' for usage information.",
                    message
                )
            }
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nCheck cmdgen.toml and CMDGEN_* environment variables.",
                    msg
                )
            }
            CliError::UnitsFailed { failed } => {
                format!("{} unit(s) failed to generate; see warnings above.", failed)
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Process exit code for this error
    ///
    /// Unit failures only surface as an error under `--strict`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnitsFailed { .. } => 2,
            _ => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ScaffoldError> for CliError {
    fn from(e: ScaffoldError) -> Self {
        match e {
            ScaffoldError::InvalidInput(message) => CliError::InvalidArgument { message },
            other => CliError::Internal(other.to_string()),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::UnitsFailed { failed: 1 }.exit_code(), 2);
        assert_eq!(
            CliError::InvalidArgument {
                message: "empty".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(CliError::Config("bad".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_argument() {
        let err: CliError = ScaffoldError::InvalidInput("command name is empty".to_string()).into();
        assert!(matches!(err, CliError::InvalidArgument { ref message } if message == "command name is empty"));
        assert!(err.user_message().contains("cmdgen command --help"));
    }
}
