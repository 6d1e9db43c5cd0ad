use anyhow::Result;
use clap::Args;

use super::{read_hook_input, Project};
use crate::report;
use crate::types::{HookResponse, PromptInput};

#[derive(Args)]
pub struct ContextArgs {
    /// Maximum dataset files listed by name (overrides config)
    #[arg(long)]
    max_files: Option<usize>,
}

pub fn run(args: ContextArgs, project: &Project) -> Result<()> {
    let input = PromptInput::from_fields(&read_hook_input()?);
    tracing::debug!(prompt_len = input.prompt.len(), "context hook invoked");

    let max_files = args
        .max_files
        .unwrap_or(project.config.context.max_listed_files);
    let lines = report::project_context(&project.paths, max_files);

    // Nothing to report: stay silent so the prompt goes through untouched
    if lines.is_empty() {
        return Ok(());
    }

    let response = HookResponse::user_prompt_submit(report::format_additional_context(&lines));
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
