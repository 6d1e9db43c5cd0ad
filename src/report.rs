//! Project status observations injected at prompt submission.
//!
//! Observations are gathered in a fixed order: datasets, visualizations,
//! validation activity. Each becomes one or more display lines.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::config::HookPaths;
use crate::validation_log;

const CONTEXT_HEADER: &str = "📋 Current Project Context:";

/// Collect status lines for the project. Empty when there is nothing to say.
///
/// Never fails: unreadable directories and entries count as absent.
pub fn project_context(paths: &HookPaths, max_listed_files: usize) -> Vec<String> {
    let mut lines = Vec::new();

    let datasets = list_entries(&paths.data_dir);
    if !datasets.is_empty() {
        lines.push(format!(
            "📊 Available datasets: {} files in {}",
            datasets.len(),
            paths.data_dir_label()
        ));
        for file in datasets.iter().take(max_listed_files) {
            lines.push(format!(
                "   - {} ({} KB)",
                display_name(file),
                format_kb(entry_size(file))
            ));
        }
    }

    let visualizations = list_entries(&paths.viz_dir);
    if !visualizations.is_empty() {
        lines.push(format!(
            "📈 Generated visualizations: {} files",
            visualizations.len()
        ));
    }

    // An unreadable log reads as no activity.
    let events = validation_log::count_events(&paths.log_file).unwrap_or_else(|| {
        tracing::debug!(path = %paths.log_file.display(), "validation log unavailable");
        0
    });
    if events > 0 {
        lines.push(format!(
            "🔍 Recent analysis activity: {events} validation events"
        ));
    }

    lines
}

/// Wrap status lines into the block appended to the user's prompt.
pub fn format_additional_context(lines: &[String]) -> String {
    format!("\n\n{CONTEXT_HEADER}\n{}", lines.join("\n"))
}

/// Visible (non-dot) entries of `dir`, sorted by name. A missing or
/// unreadable directory has no entries.
fn list_entries(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    match glob::glob_with(&pattern, options) {
        Ok(paths) => readable_entries(paths, dir),
        Err(e) => {
            tracing::debug!(dir = %dir.display(), "invalid directory pattern: {e}");
            Vec::new()
        }
    }
}

/// Keep the entries that listed cleanly; failures are traced and dropped.
fn readable_entries<E: Display>(
    entries: impl IntoIterator<Item = Result<PathBuf, E>>,
    dir: &Path,
) -> Vec<PathBuf> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), "skipping unreadable entry: {e}");
                None
            }
        })
        .collect()
}

/// Entry size in bytes. A dangling symlink or a racing delete reads as 0.
fn entry_size(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::debug!(path = %path.display(), "cannot stat entry: {e}");
            0
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Size in kilobytes with one decimal place.
fn format_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}
