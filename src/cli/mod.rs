mod completions;
mod context;
mod hook;
mod log;
mod validate;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, HookPaths};
use crate::types::{json_kind, HookFields};

#[derive(Parser)]
#[command(name = "datahook")]
#[command(about = "Project context and content validation hooks for AI coding agents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to current directory)
    #[arg(long, global = true, env = "DATAHOOK_ROOT")]
    root: Option<PathBuf>,

    /// Validation log location (overrides config)
    #[arg(long, global = true, env = "DATAHOOK_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show detailed progress
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle UserPromptSubmit events (called by the host)
    Context(context::ContextArgs),

    /// Handle PreToolUse events for Write/Edit (called by the host)
    Validate(validate::ValidateArgs),

    /// Install, remove or inspect hook registrations
    Hook(hook::HookArgs),

    /// Show recorded validation events
    Log(log::LogArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Subcommand name used to prefix error reports.
    pub fn command_name(&self) -> &'static str {
        match self.command {
            Commands::Context(_) => "context",
            Commands::Validate(_) => "validate",
            Commands::Hook(_) => "hook",
            Commands::Log(_) => "log",
            Commands::Completions(_) => "completions",
        }
    }

    pub fn run(self) -> Result<()> {
        let output = OutputConfig {
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        let root = self.root;
        let log_file = self.log_file;
        let project = || Project::resolve(root.as_deref(), log_file.as_deref());

        match self.command {
            Commands::Context(args) => context::run(args, &project()?),
            Commands::Validate(args) => validate::run(args, &project()?),
            Commands::Hook(args) => hook::run(args, &project()?, output),
            Commands::Log(args) => log::run(args, &project()?, output),
            Commands::Completions(args) => {
                completions::run(args);
                Ok(())
            }
        }
    }
}

/// Output configuration passed to interactive commands
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

/// Configuration and resolved paths for the project a command runs against.
#[derive(Debug)]
pub struct Project {
    pub config: Config,
    pub paths: HookPaths,
}

impl Project {
    fn resolve(root: Option<&Path>, log_file: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(r) => r.to_path_buf(),
            None => std::env::current_dir().context("Failed to get cwd")?,
        };
        let config = Config::load_or_default(&root);
        let paths = config.resolve_paths(&root, log_file);
        tracing::debug!(?paths, "resolved project paths");
        Ok(Self { config, paths })
    }
}

/// Read the hook event object from stdin.
fn read_hook_input() -> Result<HookFields> {
    let input_str = std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?;
    parse_hook_input(&input_str)
}

/// Decode an event payload. Any JSON object is accepted; fields are read
/// by name later, so only the top-level shape is checked here.
fn parse_hook_input(input: &str) -> Result<HookFields> {
    match serde_json::from_str(input).context("Failed to parse stdin JSON")? {
        serde_json::Value::Object(fields) => Ok(fields),
        other => bail!("Hook input must be a JSON object, got {}", json_kind(&other)),
    }
}
