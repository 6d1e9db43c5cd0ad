use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A decoded hook event: the top-level JSON object read from stdin.
pub type HookFields = Map<String, Value>;

/// Read a string field, treating absent, null or non-string values as empty.
fn str_field(fields: &HookFields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Short description of a JSON value's type for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// UserPromptSubmit hook input (subset of fields we need)
#[derive(Debug, Default)]
pub struct PromptInput {
    /// The user's prompt text
    pub prompt: String,
}

impl PromptInput {
    pub fn from_fields(fields: &HookFields) -> Self {
        Self {
            prompt: str_field(fields, "prompt"),
        }
    }
}

/// PreToolUse / PostToolUse hook input for file-writing tools
#[derive(Debug, Default)]
pub struct ToolEvent {
    pub tool_name: String,
    tool_input: Option<Value>,
}

/// The part of `tool_input` the validator reads.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ToolInput {
    pub file_path: String,
    /// Full file content for `Write`. Absent for most `Edit` payloads.
    pub content: String,
}

impl ToolEvent {
    pub fn from_fields(fields: &HookFields) -> Self {
        Self {
            tool_name: str_field(fields, "tool_name"),
            tool_input: fields.get("tool_input").cloned(),
        }
    }

    /// Decode `tool_input`. Missing means empty; anything present must be an
    /// object. Only consulted once the tool is known to be a write.
    pub fn tool_input(&self) -> Result<ToolInput> {
        match &self.tool_input {
            None => Ok(ToolInput::default()),
            Some(Value::Object(input)) => Ok(ToolInput {
                file_path: str_field(input, "file_path"),
                content: str_field(input, "content"),
            }),
            Some(other) => bail!("tool_input must be a JSON object, got {}", json_kind(other)),
        }
    }
}

/// Output JSON for a hook response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookResponse {
    pub fn user_prompt_submit(additional_context: String) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "UserPromptSubmit".to_string(),
                additional_context,
            },
        }
    }
}
