// Command routing and dispatch

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{Command, GenerateCommand, OutputFormat},
    error::CliResult,
};
use cmdgen_scaffold::CollisionPolicy;

/// cmdgen - scaffold platformOS-style commands from templates
#[derive(Parser, Debug)]
#[command(name = "cmdgen")]
#[command(bin_name = "cmdgen")]
#[command(about = "Scaffold command files from templates")]
#[command(
    long_about = "cmdgen: scaffold command files from templates.\n\nRenders lib/commands/create.liquid to app/lib/commands/<name>.liquid and\nthe lib/commands/create/ directory to app/lib/commands/<name>/.\n\nQuick Start:\n  • cmdgen command ship\n  • cmdgen command users/create --dry-run"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate command files with build, check and execute phases
    #[command(about = "Generate basic command files with build and check phase")]
    Command(CommandArgs),
}

/// Arguments of `cmdgen command`
#[derive(Args, Debug, Clone)]
pub struct CommandArgs {
    /// Name of the command (nested names like users/create are allowed)
    #[arg(value_name = "COMMAND_NAME")]
    pub command_name: String,

    /// Project root the output paths are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Template directory containing lib/commands/create.liquid and lib/commands/create/
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(long, conflicts_with = "skip_existing")]
    pub force: bool,

    /// Keep existing files and generate only the missing ones
    #[arg(long)]
    pub skip_existing: bool,

    /// Preview changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Extra template parameter (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 2 when any unit fails
    #[arg(long)]
    pub strict: bool,
}

impl CommandArgs {
    /// Collision policy selected by flags, if any
    pub fn collision(&self) -> Option<CollisionPolicy> {
        if self.force {
            Some(CollisionPolicy::Overwrite)
        } else if self.skip_existing {
            Some(CollisionPolicy::Skip)
        } else {
            None
        }
    }
}

/// Parse `KEY=VALUE`; the value may contain further `=`
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli)
    }

    /// Execute a command
    pub fn execute(cli: &Cli) -> CliResult<()> {
        match &cli.command {
            Commands::Command(args) => Self::generate_command(args).execute(),
        }
    }

    /// Build the generate command from parsed arguments
    pub fn generate_command(args: &CommandArgs) -> GenerateCommand {
        GenerateCommand::new(args.command_name.clone())
            .with_project_root(args.project_root.clone())
            .with_templates_dir(args.templates.clone())
            .with_collision(args.collision())
            .with_dry_run(args.dry_run)
            .with_params(args.params.clone())
            .with_format(args.format)
            .with_strict(args.strict)
    }
}
