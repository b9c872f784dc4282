// Command handlers for cmdgen CLI

pub mod generate;

pub use generate::{GenerateCommand, OutputFormat};

use crate::error::CliResult;

/// Trait for command handlers
pub trait Command {
    /// Execute the command
    fn execute(&self) -> CliResult<()>;
}
