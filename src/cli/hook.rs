use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use super::{OutputConfig, Project};
use crate::config::Config;
use crate::settings::{self, HookRegistration, InstallState, SettingsFile};
use crate::validation_log;

#[derive(Args)]
pub struct HookArgs {
    #[command(subcommand)]
    command: HookCommands,
}

#[derive(Subcommand)]
enum HookCommands {
    /// Register the context and validate hooks in settings.json
    Install(InstallArgs),

    /// Remove datahook hooks from settings.json
    Uninstall(ScopeArgs),

    /// Compare registered hooks with the project config
    Status(ScopeArgs),
}

#[derive(Args)]
struct InstallArgs {
    #[command(flatten)]
    scope: ScopeArgs,

    /// Program the host runs for each hook (e.g. an absolute path to datahook)
    #[arg(long, default_value = settings::DEFAULT_PROGRAM)]
    command: String,
}

#[derive(Args)]
struct ScopeArgs {
    /// Use ~/.claude/settings.json instead of the project's settings
    #[arg(long)]
    global: bool,
}

#[derive(Serialize)]
struct InstallOutput<'a> {
    status: &'static str,
    path: String,
    global: bool,
    hooks: &'a [HookRegistration],
}

#[derive(Serialize)]
struct StatusOutput<'a> {
    state: InstallState,
    hooks_installed: bool,
    settings_path: String,
    registered: &'a [HookRegistration],
    expected: &'a [HookRegistration],
    data_dir: String,
    viz_dir: String,
    log_file: String,
    validation_events: usize,
}

pub fn run(args: HookArgs, project: &Project, output: OutputConfig) -> Result<()> {
    match args.command {
        HookCommands::Install(a) => run_install(&a, project, output),
        HookCommands::Uninstall(a) => run_uninstall(&a, project, output),
        HookCommands::Status(a) => run_status(&a, project, output),
    }
}

fn run_install(args: &InstallArgs, project: &Project, output: OutputConfig) -> Result<()> {
    settings::check_program(&args.command)?;
    let path = SettingsFile::locate(args.scope.global, &project.paths.root)?;
    let registrations = HookRegistration::for_config(&project.config.validate, &args.command);

    let mut settings = SettingsFile::load(&path)?;
    settings.apply(&registrations);
    settings.save()?;
    tracing::debug!(path = %path.display(), count = registrations.len(), "hooks written");

    if output.json {
        let result = InstallOutput {
            status: "installed",
            path: path.display().to_string(),
            global: args.scope.global,
            hooks: &registrations,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !output.quiet {
        let scope = if args.scope.global { "global" } else { "project" };
        println!("{} Datahook hooks installed ({})", "✓".green(), scope.cyan());
        println!("  Location: {}", path.display().to_string().dimmed());
        for reg in &registrations {
            print_registration(reg);
        }
        if registrations.len() == 1 {
            println!(
                "  {} no write_tools configured; validate hook not registered",
                "!".yellow()
            );
        }
    }

    Ok(())
}

fn run_uninstall(args: &ScopeArgs, project: &Project, output: OutputConfig) -> Result<()> {
    let path = SettingsFile::locate(args.global, &project.paths.root)?;

    let removed = if path.exists() {
        let mut settings = SettingsFile::load(&path)?;
        let removed = settings.strip();
        if removed > 0 {
            settings.save()?;
        }
        removed
    } else {
        0
    };

    if output.json {
        let result = serde_json::json!({
            "status": if removed > 0 { "uninstalled" } else { "not_installed" },
            "path": path.display().to_string(),
            "removed": removed,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !output.quiet {
        if removed > 0 {
            println!(
                "{} Datahook hooks removed from {} ({removed} entries)",
                "✓".green(),
                path.display()
            );
        } else {
            println!("No datahook hooks found in {}", path.display());
        }
    }

    Ok(())
}

fn run_status(args: &ScopeArgs, project: &Project, output: OutputConfig) -> Result<()> {
    let path = SettingsFile::locate(args.global, &project.paths.root)?;
    let expected =
        HookRegistration::for_config(&project.config.validate, settings::DEFAULT_PROGRAM);
    let (state, registered) = match SettingsFile::load(&path) {
        Ok(settings) => (settings.state(&expected), settings.registered()),
        Err(e) => {
            tracing::warn!("cannot read settings: {e:#}");
            (InstallState::NotInstalled, Vec::new())
        }
    };
    let validation_events = validation_log::count_events(&project.paths.log_file).unwrap_or(0);

    if output.json {
        let status = StatusOutput {
            state,
            hooks_installed: state != InstallState::NotInstalled,
            settings_path: path.display().to_string(),
            registered: &registered,
            expected: &expected,
            data_dir: project.paths.data_dir.display().to_string(),
            viz_dir: project.paths.viz_dir.display().to_string(),
            log_file: project.paths.log_file.display().to_string(),
            validation_events,
        };
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    if output.quiet {
        return Ok(());
    }

    match state {
        InstallState::Current => println!("{} Datahook hooks installed", "✓".green()),
        InstallState::Outdated => {
            println!("{} Datahook hooks installed but outdated", "!".yellow());
            println!("Run `datahook hook install` to match the current config.");
        }
        InstallState::NotInstalled => {
            println!("{} Datahook hooks not installed", "!".yellow());
            println!("Run `datahook hook install` to register them.");
        }
    }
    for reg in &registered {
        print_registration(reg);
    }
    println!("  Settings:     {}", path.display().to_string().dimmed());
    println!("  Datasets:     {}", project.paths.data_dir.display());
    println!("  Plots:        {}", project.paths.viz_dir.display());
    println!("  Log:          {}", project.paths.log_file.display());
    println!("  Validations:  {}", validation_events.to_string().cyan());
    if output.verbose {
        let config_path = Config::config_path(&project.paths.root);
        let note = if config_path.exists() { "" } else { " (not present, using defaults)" };
        println!("  Config:       {}{note}", config_path.display());
    }

    Ok(())
}

fn print_registration(reg: &HookRegistration) {
    let matcher = reg
        .matcher
        .as_deref()
        .map_or_else(String::new, |m| format!(" [{m}]"));
    println!(
        "  {:<17} {}{}",
        format!("{}:", reg.event),
        reg.command.cyan(),
        matcher.dimmed()
    );
}
