#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary data-analysis project for driving the hooks.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent dirs as needed.
    pub fn write_file(&self, relative_path: &str, content: &str) {
        let full = self.dir.path().join(relative_path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&full, content).expect("failed to write file");
    }

    /// Write a file of exactly `len` bytes.
    pub fn write_sized(&self, relative_path: &str, len: usize) {
        self.write_file(relative_path, &"x".repeat(len));
    }

    pub fn mkdir(&self, relative_path: &str) {
        std::fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("failed to create dir");
    }

    /// Default validation log location.
    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join(".claude").join("validation_log.json")
    }

    /// Lines currently in the validation log (empty if absent).
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// A datahook command running inside the project with a clean environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(Self::datahook_bin());
        cmd.current_dir(self.path())
            .env_remove("DATAHOOK_ROOT")
            .env_remove("DATAHOOK_LOG_FILE")
            .env_remove("DATAHOOK_LOG");
        cmd
    }

    /// Run the validate hook with a Write/Edit-shaped payload.
    pub fn validate(&self, tool_name: &str, file_path: &str, content: &str) -> assert_cmd::assert::Assert {
        let stdin_json = serde_json::json!({
            "session_id": "test-session",
            "hook_event_name": "PreToolUse",
            "tool_name": tool_name,
            "tool_input": {"file_path": file_path, "content": content}
        });
        self.cmd()
            .arg("validate")
            .write_stdin(serde_json::to_string(&stdin_json).unwrap())
            .assert()
    }

    /// Run the context hook with a prompt payload.
    pub fn context(&self, prompt: &str) -> assert_cmd::assert::Assert {
        let stdin_json = serde_json::json!({
            "session_id": "test-session",
            "hook_event_name": "UserPromptSubmit",
            "prompt": prompt
        });
        self.cmd()
            .arg("context")
            .write_stdin(serde_json::to_string(&stdin_json).unwrap())
            .assert()
    }

    /// Return the path to the datahook binary (built via cargo).
    pub fn datahook_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_datahook"))
    }
}
