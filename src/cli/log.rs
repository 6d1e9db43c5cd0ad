use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{OutputConfig, Project};
use crate::validation_log::{self, ValidationLogEntry};

#[derive(Args)]
pub struct LogArgs {
    /// Only show events for files whose path contains this substring
    #[arg(long)]
    file: Option<String>,

    /// Maximum number of events (most recent)
    #[arg(long, short = 'n', default_value = "10")]
    limit: usize,
}

#[derive(Serialize)]
struct LogOutput<'a> {
    log_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_filter: Option<&'a str>,
    count: usize,
    total: usize,
    entries: &'a [ValidationLogEntry],
}

pub fn run(args: LogArgs, project: &Project, output: OutputConfig) -> Result<()> {
    let entries: Vec<ValidationLogEntry> = validation_log::read_all(&project.paths.log_file)
        .into_iter()
        .filter(|e| {
            args.file
                .as_deref()
                .map_or(true, |needle| e.file_path.contains(needle))
        })
        .collect();
    let total = entries.len();
    let recent = &entries[total.saturating_sub(args.limit)..];

    if output.json {
        let json_output = LogOutput {
            log_file: project.paths.log_file.display().to_string(),
            file_filter: args.file.as_deref(),
            count: recent.len(),
            total,
            entries: recent,
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }
    if output.quiet {
        return Ok(());
    }

    if recent.is_empty() {
        println!(
            "No validation events in {}",
            project.paths.log_file.display()
        );
        return Ok(());
    }

    println!(
        "Showing {} of {} validation events",
        recent.len().to_string().cyan(),
        total
    );
    for entry in recent {
        println!();
        println!(
            "{} {} {}",
            entry.timestamp.dimmed(),
            entry.tool_name.cyan(),
            entry.file_path.bold()
        );
        for issue in &entry.issues {
            println!("  {} {}", "⚠".yellow(), issue);
        }
    }

    Ok(())
}
