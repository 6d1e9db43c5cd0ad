use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// One record in the validation log: the issues found in a single write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLogEntry {
    /// RFC3339 local timestamp
    pub timestamp: String,
    pub file_path: String,
    pub issues: Vec<String>,
    pub tool_name: String,
}

impl ValidationLogEntry {
    /// Create an entry stamped with the current local time.
    pub fn now(file_path: &str, issues: &[String], tool_name: &str) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            file_path: file_path.to_string(),
            issues: issues.to_vec(),
            tool_name: tool_name.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to serialize log entry: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write validation log: {0}")]
    Io(#[from] std::io::Error),
}

/// Append an entry to the validation log as a single JSON line.
///
/// Best-effort: callers are expected to discard the error, since a log
/// failure must never affect the write being validated. The whole line goes
/// out in one `write_all` on an `O_APPEND` handle; there is no locking, so
/// concurrent writers get only the atomicity the OS append gives them.
pub fn append(path: &Path, entry: &ValidationLogEntry) -> Result<(), LogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut line = serde_json::to_string(entry)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Count recorded events (lines) in the log. `\n`, `\r\n` and a bare `\r`
/// all end a line.
///
/// Best-effort: `None` when the log is missing, unreadable or not UTF-8.
pub fn count_events(path: &Path) -> Option<usize> {
    let content = std::fs::read_to_string(path).ok()?;
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    Some(normalized.lines().count())
}

/// Read all parseable entries from the log. Malformed lines are skipped.
pub fn read_all(path: &Path) -> Vec<ValidationLogEntry> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}
