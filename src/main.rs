use clap::Parser;

mod cli;
mod config;
mod report;
mod settings;
mod types;
mod validation;
mod validation_log;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // stdout carries the hook protocol, so diagnostics go to stderr
    let default_level = if cli.verbose() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DATAHOOK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let name = cli.command_name();
    if let Err(e) = cli.run() {
        eprintln!("datahook {}: {:#}", name, e);
        std::process::exit(1);
    }
}
