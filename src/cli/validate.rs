use anyhow::Result;
use clap::Args;

use super::{read_hook_input, Project};
use crate::types::ToolEvent;
use crate::validation;
use crate::validation_log::{self, ValidationLogEntry};

#[derive(Args)]
pub struct ValidateArgs {}

pub fn run(_args: ValidateArgs, project: &Project) -> Result<()> {
    let event = ToolEvent::from_fields(&read_hook_input()?);
    let rules = &project.config.validate;

    if !rules.is_write_tool(&event.tool_name) {
        tracing::debug!(tool = %event.tool_name, "not a write tool, skipping");
        return Ok(());
    }

    let tool_input = event.tool_input()?;
    let file_path = tool_input.file_path.as_str();
    if rules.is_skipped(file_path) {
        tracing::debug!(file_path, "skipped extension");
        return Ok(());
    }

    let issues = validation::validate_content(file_path, &tool_input.content);
    if issues.is_empty() {
        return Ok(());
    }

    let entry = ValidationLogEntry::now(file_path, &issues, &event.tool_name);
    // Best-effort: a log failure must not turn a warning into a failed hook
    if let Err(e) = validation_log::append(&project.paths.log_file, &entry) {
        tracing::debug!("validation log not written: {e}");
    }

    // Warn only; the write itself always proceeds
    for issue in &issues {
        eprintln!("⚠️  Validation Issue: {issue}");
    }
    Ok(())
}
