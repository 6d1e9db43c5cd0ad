use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for datahook
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub context: ContextConfig,
    pub validate: ValidateConfig,
}

/// Locations of the project directories the hooks inspect.
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding datasets
    pub data_dir: PathBuf,
    /// Directory holding generated plots and charts
    pub viz_dir: PathBuf,
    /// Append-only validation log (newline-delimited JSON)
    pub log_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data_storage"),
            viz_dir: PathBuf::from("visualizations"),
            log_file: PathBuf::from(".claude").join(LOG_FILE_NAME),
        }
    }
}

/// Configuration for the UserPromptSubmit context reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum dataset files listed by name
    pub max_listed_files: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_listed_files: 5 }
    }
}

/// Configuration for the content validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Tool names whose payloads are validated
    pub write_tools: Vec<String>,
    /// Path suffixes that are never inspected or logged
    pub skip_extensions: Vec<String>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            write_tools: vec!["Write".into(), "Edit".into()],
            skip_extensions: vec![".md".into(), ".txt".into(), ".log".into()],
        }
    }
}

impl ValidateConfig {
    pub fn is_write_tool(&self, tool_name: &str) -> bool {
        self.write_tools.iter().any(|t| t == tool_name)
    }

    pub fn is_skipped(&self, file_path: &str) -> bool {
        self.skip_extensions
            .iter()
            .any(|ext| file_path.ends_with(ext.as_str()))
    }
}

const LOG_FILE_NAME: &str = "validation_log.json";

/// Fully resolved filesystem locations handed to the hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub viz_dir: PathBuf,
    pub log_file: PathBuf,
}

impl HookPaths {
    /// Display label for the dataset directory: relative to the root when
    /// inside it (`data_storage/`, `inputs/datasets/`), otherwise the full path.
    pub fn data_dir_label(&self) -> String {
        let shown = match self.data_dir.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => Path::new("."),
            Ok(rel) => rel,
            Err(_) => self.data_dir.as_path(),
        };
        format!("{}/", shown.display())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the project config if one exists. Hooks must keep running on a
    /// broken config, so parse failures fall back to defaults with a warning.
    pub fn load_or_default(root: &Path) -> Self {
        let path = Self::config_path(root);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring invalid config: {e:#}");
                Self::default()
            }
        }
    }

    /// Get the host settings directory for a project
    pub fn settings_dir(root: &Path) -> PathBuf {
        root.join(".claude")
    }

    /// Get the config file path for a project
    pub fn config_path(root: &Path) -> PathBuf {
        Self::settings_dir(root).join("datahook.toml")
    }

    /// Resolve configured paths against `root`. `log_override` wins over the
    /// configured log location when given.
    pub fn resolve_paths(&self, root: &Path, log_override: Option<&Path>) -> HookPaths {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        };
        HookPaths {
            root: root.to_path_buf(),
            data_dir: resolve(&self.paths.data_dir),
            viz_dir: resolve(&self.paths.viz_dir),
            log_file: resolve(log_override.unwrap_or(&self.paths.log_file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        let paths = config.resolve_paths(Path::new("/proj"), None);
        assert_eq!(paths.data_dir, PathBuf::from("/proj/data_storage"));
        assert_eq!(paths.viz_dir, PathBuf::from("/proj/visualizations"));
        assert_eq!(
            paths.log_file,
            PathBuf::from("/proj/.claude/validation_log.json")
        );
        assert_eq!(paths.data_dir_label(), "data_storage/");
    }

    #[test]
    fn test_data_dir_label() {
        let mut config = Config::default();
        config.paths.data_dir = PathBuf::from("inputs/datasets");
        let paths = config.resolve_paths(Path::new("/proj"), None);
        assert_eq!(paths.data_dir_label(), "inputs/datasets/");

        config.paths.data_dir = PathBuf::from("/srv/shared/datasets");
        let paths = config.resolve_paths(Path::new("/proj"), None);
        assert_eq!(paths.data_dir_label(), "/srv/shared/datasets/");

        config.paths.data_dir = PathBuf::from(".");
        let paths = config.resolve_paths(Path::new("/proj"), None);
        assert_eq!(paths.data_dir_label(), "./");
    }

    #[test]
    fn test_log_override_wins() {
        let config = Config::default();
        let paths = config.resolve_paths(Path::new("/proj"), Some(Path::new("/tmp/v.json")));
        assert_eq!(paths.log_file, PathBuf::from("/tmp/v.json"));

        let paths = config.resolve_paths(Path::new("/proj"), Some(Path::new("logs/v.json")));
        assert_eq!(paths.log_file, PathBuf::from("/proj/logs/v.json"));
    }

    #[test]
    fn test_validate_defaults() {
        let config = Config::default();
        assert!(config.validate.is_write_tool("Write"));
        assert!(config.validate.is_write_tool("Edit"));
        assert!(!config.validate.is_write_tool("Read"));
        assert!(!config.validate.is_write_tool("write"));
        assert!(config.validate.is_skipped("notes/README.md"));
        assert!(config.validate.is_skipped("out.txt"));
        assert!(config.validate.is_skipped("run.log"));
        assert!(!config.validate.is_skipped("data.csv"));
        assert_eq!(config.context.max_listed_files, 5);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[paths]
data_dir = "datasets"

[validate]
write_tools = ["Write", "Edit", "MultiEdit"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.paths.data_dir, PathBuf::from("datasets"));
        assert_eq!(config.paths.viz_dir, PathBuf::from("visualizations"));
        assert!(config.validate.is_write_tool("MultiEdit"));
        assert!(config.validate.is_skipped("a.md"));
        assert_eq!(config.context.max_listed_files, 5);
    }

    #[test]
    fn test_load_or_default_missing() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.context.max_listed_files, 5);
    }

    #[test]
    fn test_load_or_default_invalid_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = Config::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[context\nmax_listed_files = ").unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.context.max_listed_files, 5);
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = Config::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[context]\nmax_listed_files = 2\n").unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.context.max_listed_files, 2);
    }
}
