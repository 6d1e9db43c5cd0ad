//! datahook's entries in the host `settings.json`.
//!
//! A registration is a hook group whose command runs a `datahook` binary
//! with the `context` or `validate` subcommand. Everything else in the file
//! belongs to someone else and is carried through untouched.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

use crate::config::{Config, ValidateConfig};

/// Program name used when `--command` is not given.
pub const DEFAULT_PROGRAM: &str = "datahook";

const PROGRAM_STEM: &str = "datahook";
const HOOK_TIMEOUT_SECS: u64 = 10;

/// Which hook a registration runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Context,
    Validate,
}

impl HookKind {
    pub fn subcommand(self) -> &'static str {
        match self {
            HookKind::Context => "context",
            HookKind::Validate => "validate",
        }
    }

    /// Host event the hook is registered under.
    pub fn event(self) -> &'static str {
        match self {
            HookKind::Context => "UserPromptSubmit",
            HookKind::Validate => "PreToolUse",
        }
    }

    fn from_subcommand(name: &str) -> Option<Self> {
        match name {
            "context" => Some(HookKind::Context),
            "validate" => Some(HookKind::Validate),
            _ => None,
        }
    }
}

/// One datahook hook entry as it appears (or should appear) in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookRegistration {
    pub event: String,
    pub kind: HookKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    pub command: String,
}

impl HookRegistration {
    fn new(kind: HookKind, matcher: Option<String>, program: &str) -> Self {
        Self {
            event: kind.event().to_string(),
            kind,
            matcher,
            command: format!("{program} {}", kind.subcommand()),
        }
    }

    /// Registrations for a project: the context hook always, the validator
    /// only when there are write tools to match.
    pub fn for_config(validate: &ValidateConfig, program: &str) -> Vec<Self> {
        let mut regs = vec![Self::new(HookKind::Context, None, program)];
        if let Some(matcher) = tool_matcher(&validate.write_tools) {
            regs.push(Self::new(HookKind::Validate, Some(matcher), program));
        }
        regs
    }

    /// Event, hook and matcher: what decides whether an install is current.
    /// The program path is whatever the user installed.
    fn shape(&self) -> (&str, HookKind, Option<&str>) {
        (self.event.as_str(), self.kind, self.matcher.as_deref())
    }

    fn to_group(&self) -> Value {
        let mut group = Map::new();
        if let Some(matcher) = &self.matcher {
            group.insert("matcher".into(), json!(matcher));
        }
        group.insert(
            "hooks".into(),
            json!([{
                "type": "command",
                "command": self.command,
                "timeout": HOOK_TIMEOUT_SECS,
            }]),
        );
        Value::Object(group)
    }
}

/// Matcher regex for the configured write tools, e.g. `Write|Edit`.
pub fn tool_matcher(write_tools: &[String]) -> Option<String> {
    if write_tools.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = write_tools.iter().map(|t| regex::escape(t)).collect();
    Some(alternatives.join("|"))
}

/// Reject program paths that would not survive as the first word of a
/// shell command line.
pub fn check_program(program: &str) -> Result<()> {
    if program.is_empty() || program.chars().any(char::is_whitespace) {
        bail!("Hook command must be a path without whitespace, got {program:?}");
    }
    Ok(())
}

/// The hook a command line runs, if it is a datahook command.
fn datahook_kind(command: &str) -> Option<HookKind> {
    let mut words = command.split_whitespace();
    let program = Path::new(words.next()?);
    if program.file_stem().and_then(|s| s.to_str()) != Some(PROGRAM_STEM) {
        return None;
    }
    HookKind::from_subcommand(words.next()?)
}

fn hook_command(hook: &Value) -> Option<&str> {
    hook.get("command").and_then(Value::as_str)
}

/// How a settings file's registrations compare to what the config expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallState {
    NotInstalled,
    Outdated,
    Current,
}

/// A loaded `settings.json`.
#[derive(Debug)]
pub struct SettingsFile {
    path: PathBuf,
    value: Map<String, Value>,
}

impl SettingsFile {
    /// `~/.claude/settings.json` when global, else `<root>/.claude/settings.json`.
    pub fn locate(global: bool, root: &Path) -> Result<PathBuf> {
        let base = if global {
            PathBuf::from(std::env::var("HOME").context("HOME not set")?)
        } else {
            root.to_path_buf()
        };
        Ok(Config::settings_dir(&base).join("settings.json"))
    }

    /// Load settings. A missing or blank file is an empty object.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let value = if content.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
            {
                Value::Object(map) => map,
                _ => bail!("{} is not a JSON object", path.display()),
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            value,
        })
    }

    /// Write the file back, pretty-printed, creating parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let mut content =
            serde_json::to_string_pretty(&self.value).context("Failed to serialize settings")?;
        content.push('\n');
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// datahook entries currently registered, in file order.
    pub fn registered(&self) -> Vec<HookRegistration> {
        let Some(events) = self.value.get("hooks").and_then(Value::as_object) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for (event, groups) in events {
            for group in groups.as_array().into_iter().flatten() {
                let matcher = group
                    .get("matcher")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let hooks = group.get("hooks").and_then(Value::as_array);
                for command in hooks.into_iter().flatten().filter_map(hook_command) {
                    if let Some(kind) = datahook_kind(command) {
                        found.push(HookRegistration {
                            event: event.clone(),
                            kind,
                            matcher: matcher.clone(),
                            command: command.to_string(),
                        });
                    }
                }
            }
        }
        found
    }

    /// Compare registered entries with `expected`, ignoring order and the
    /// program path.
    pub fn state(&self, expected: &[HookRegistration]) -> InstallState {
        let registered = self.registered();
        if registered.is_empty() {
            return InstallState::NotInstalled;
        }
        let mut have: Vec<_> = registered.iter().map(HookRegistration::shape).collect();
        let mut want: Vec<_> = expected.iter().map(HookRegistration::shape).collect();
        have.sort();
        want.sort();
        if have == want {
            InstallState::Current
        } else {
            InstallState::Outdated
        }
    }

    /// Remove every datahook hook entry. Groups and events left empty are
    /// dropped, as is an empty `hooks` object. Returns the entries removed.
    pub fn strip(&mut self) -> usize {
        let Some(events) = self.value.get_mut("hooks").and_then(Value::as_object_mut) else {
            return 0;
        };
        let mut removed = 0;
        for groups in events.values_mut() {
            let Some(groups) = groups.as_array_mut() else {
                continue;
            };
            for group in groups.iter_mut() {
                if let Some(hooks) = group.get_mut("hooks").and_then(Value::as_array_mut) {
                    let before = hooks.len();
                    hooks.retain(|h| hook_command(h).and_then(datahook_kind).is_none());
                    removed += before - hooks.len();
                }
            }
            groups.retain(|group| {
                group
                    .get("hooks")
                    .and_then(Value::as_array)
                    .map_or(true, |hooks| !hooks.is_empty())
            });
        }
        events.retain(|_, groups| groups.as_array().map_or(true, |g| !g.is_empty()));
        if events.is_empty() {
            self.value.remove("hooks");
        }
        removed
    }

    /// Replace datahook's entries with `registrations`, appended after any
    /// other tools' groups for the same event.
    pub fn apply(&mut self, registrations: &[HookRegistration]) {
        self.strip();
        if !self.value.get("hooks").is_some_and(Value::is_object) {
            self.value.insert("hooks".into(), json!({}));
        }
        let Some(events) = self.value.get_mut("hooks").and_then(Value::as_object_mut) else {
            return;
        };
        for reg in registrations {
            let slot = events
                .entry(reg.event.clone())
                .or_insert_with(|| json!([]));
            if !slot.is_array() {
                *slot = json!([]);
            }
            if let Value::Array(groups) = slot {
                groups.push(reg.to_group());
            }
        }
    }
}
