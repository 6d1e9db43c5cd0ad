mod rules;

use rules::matching_patterns;

/// How a file's content is checked, decided by its path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Python,
    Json,
    Other,
}

impl FileKind {
    pub fn from_path(file_path: &str) -> Self {
        if file_path.ends_with(".csv") {
            FileKind::Csv
        } else if file_path.ends_with(".py") {
            FileKind::Python
        } else if file_path.ends_with(".json") {
            FileKind::Json
        } else {
            FileKind::Other
        }
    }
}

/// Inspect `content` as it would be written to `file_path` and describe
/// every issue found. An empty result means the content looks fine.
pub fn validate_content(file_path: &str, content: &str) -> Vec<String> {
    match FileKind::from_path(file_path) {
        FileKind::Csv => check_csv(content),
        FileKind::Python => check_python(content),
        FileKind::Json => check_json(content),
        FileKind::Other => Vec::new(),
    }
}

fn check_csv(content: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let lines: Vec<&str> = content.trim().split('\n').collect();

    if lines.len() < 2 {
        issues.push("CSV file appears to be empty or malformed".to_string());
    }
    // split always yields at least one element
    if !lines[0].contains(',') {
        issues.push("CSV file may not be properly formatted".to_string());
    }
    issues
}

fn check_python(content: &str) -> Vec<String> {
    matching_patterns(content)
        .into_iter()
        .map(|rule| {
            format!(
                "Potentially dangerous code pattern found: {} ({})",
                rule.pattern, rule.label
            )
        })
        .collect()
}

fn check_json(content: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(_) => Vec::new(),
        Err(e) => vec![format!("Invalid JSON format: {e}")],
    }
}
