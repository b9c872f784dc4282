// cmdgen CLI library

pub mod bundled;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

pub use config::{CmdgenConfig, ConfigManager};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use router::{Cli, CommandArgs, CommandRouter, Commands};
