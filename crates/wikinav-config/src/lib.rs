//! Configuration management for wikinav.
//!
//! Parses `wikinav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! source_dir = "wiki"
//!
//! [output]
//! path = ".vitepress/sidebar.json"
//!
//! [[topics]]
//! path = "engines/love2d"
//! label = "LOVE2D"
//!
//! [[topics]]
//! path = "resources/awesome-love2d"
//! label = "Awesome LOVE2D"
//! role = "collection"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable and `~` expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `output.path`

mod expand;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use wikinav_sidebar::{DEFAULT_EXTENSION, Topic};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebar output path.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikinav.toml";

/// Default sidebar output file, relative to the config directory.
const DEFAULT_OUTPUT: &str = "sidebar.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Topics in configuration order.
    pub topics: Vec<Topic>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root directory containing the topic directories.
    pub source_dir: PathBuf,
    /// Recognized document extension, without the leading dot.
    pub extension: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug)]
pub struct OutputConfig {
    /// Sidebar JSON file path.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`WIKI_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a topic path to be a clean relative path below the docs root.
fn require_topic_path(path: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(path, field)?;
    if path.starts_with('/') || path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must not start or end with '/': {path}"
        )));
    }
    let clean = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path without '.' or '..': {path}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wikinav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output) = &settings.output {
            self.output_resolved.path.clone_from(output);
        }
    }

    /// Get the configured topics, requiring at least one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no `[[topics]]` entry is configured.
    pub fn require_topics(&self) -> Result<&[Topic], ConfigError> {
        if self.topics.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[topics]] entry required in config".to_owned(),
            ));
        }
        Ok(&self.topics)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            output: OutputConfigRaw::default(),
            topics: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                extension: DEFAULT_EXTENSION.to_owned(),
            },
            output_resolved: OutputConfig {
                path: base.join(DEFAULT_OUTPUT),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_topics()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let extension = &self.docs_resolved.extension;
        require_non_empty(extension, "docs.extension")?;
        if extension.starts_with('.') || extension.contains('/') {
            return Err(ConfigError::Validation(format!(
                "docs.extension must be a bare extension like \"md\", got \"{extension}\""
            )));
        }
        Ok(())
    }

    /// Validate topic entries: clean paths, labels set, no duplicates.
    fn validate_topics(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, topic) in self.topics.iter().enumerate() {
            require_topic_path(&topic.path, &format!("topics[{i}].path"))?;
            require_non_empty(&topic.label, &format!("topics[{i}].label"))?;
            if !seen.insert(topic.path.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "topics[{i}].path is duplicated: {}",
                    topic.path
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref path) = self.output.path {
            self.output.path = Some(expand::expand_env(path, "output.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            extension: self
                .docs
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
        };
        self.output_resolved = OutputConfig {
            path: resolve(self.output.path.as_deref(), DEFAULT_OUTPUT),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wikinav_sidebar::TopicRole;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.extension, "md");
        assert_eq!(
            config.output_resolved.path,
            PathBuf::from("/test/sidebar.json")
        );
        assert!(config.topics.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.topics.is_empty());
    }

    #[test]
    fn test_parse_topics() {
        let toml = r#"
[[topics]]
path = "engines/love2d"
label = "LOVE2D"

[[topics]]
path = "resources/awesome-love2d"
label = "Awesome LOVE2D"

[[topics]]
path = "resources/links"
label = "Links"
role = "collection"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.topics.len(), 3);
        assert_eq!(config.topics[0], Topic::new("engines/love2d", "LOVE2D"));
        assert_eq!(config.topics[1].role(), TopicRole::Collection);
        assert_eq!(config.topics[2].role, Some(TopicRole::Collection));
    }

    #[test]
    fn test_parse_invalid_role() {
        let toml = r#"
[[topics]]
path = "engines/godot"
label = "Godot 4"
role = "gallery"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "wiki"
extension = "markdown"

[output]
path = ".vitepress/sidebar.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/wiki")
        );
        assert_eq!(config.docs_resolved.extension, "markdown");
        assert_eq!(
            config.output_resolved.path,
            PathBuf::from("/project/.vitepress/sidebar.json")
        );
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let toml = r#"
[docs]
source_dir = "/srv/wiki"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/srv/wiki"));
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/wiki")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/wiki")
        );
        assert_eq!(
            config.output_resolved.path,
            PathBuf::from("/test/sidebar.json")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output: Some(PathBuf::from("out/nav.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_resolved.path, PathBuf::from("out/nav.json"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.output_resolved.path,
            PathBuf::from("/test/sidebar.json")
        );
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_WIKINAV_SOURCE", "/data/wiki");
        }

        let toml = r#"
[docs]
source_dir = "${TEST_WIKINAV_SOURCE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.docs.source_dir.as_deref(), Some("/data/wiki"));

        unsafe {
            std::env::remove_var("TEST_WIKINAV_SOURCE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_WIKINAV_TEST");
        }

        let toml = r#"
[output]
path = "${MISSING_VAR_WIKINAV_TEST}/sidebar.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_WIKINAV_TEST"));
        assert!(err.to_string().contains("output.path"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &config_path,
            r#"
[docs]
source_dir = "wiki"

[[topics]]
path = "programming/glsl"
label = "GLSL Shaders"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("wiki"));
        assert_eq!(config.config_path, Some(config_path));
        assert_eq!(config.require_topics().unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/wikinav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[docs]\nsource_dir = \"wiki\"\n").unwrap();
        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/override")),
            ..Default::default()
        };

        let config = Config::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/override"));
    }

    #[test]
    fn test_load_rejects_invalid_topics() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &config_path,
            "[[topics]]\npath = \"../outside\"\nlabel = \"Outside\"\n",
        )
        .unwrap();

        let err = Config::load(Some(&config_path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    fn config_with_topics(topics: Vec<Topic>) -> Config {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.topics = topics;
        config
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_topics_pass() {
        let config = config_with_topics(vec![
            Topic::new("engines/godot", "Godot 4"),
            Topic::new("resources/awesome-gamedev", "Awesome Gamedev"),
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_extension_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.extension = String::new();
        assert_validation_error(&config, &["docs.extension", "empty"]);
    }

    #[test]
    fn test_validate_extension_leading_dot() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.docs_resolved.extension = ".md".to_owned();
        assert_validation_error(&config, &["docs.extension"]);
    }

    #[test]
    fn test_validate_topic_path_empty() {
        let config = config_with_topics(vec![Topic::new("", "Empty")]);
        assert_validation_error(&config, &["topics[0].path", "empty"]);
    }

    #[test]
    fn test_validate_topic_path_slashes() {
        let config = config_with_topics(vec![Topic::new("/engines/godot/", "Godot")]);
        assert_validation_error(&config, &["topics[0].path", "'/'"]);
    }

    #[test]
    fn test_validate_topic_path_parent_dir() {
        let config = config_with_topics(vec![
            Topic::new("engines/godot", "Godot"),
            Topic::new("engines/../secrets", "Secrets"),
        ]);
        assert_validation_error(&config, &["topics[1].path", ".."]);
    }

    #[test]
    fn test_validate_topic_label_empty() {
        let config = config_with_topics(vec![Topic::new("engines/godot", "  ")]);
        assert_validation_error(&config, &["topics[0].label", "empty"]);
    }

    #[test]
    fn test_validate_duplicate_topics() {
        let config = config_with_topics(vec![
            Topic::new("design/game-ai", "Game AI"),
            Topic::new("design/game-ai", "Game AI again"),
        ]);
        assert_validation_error(&config, &["topics[1].path", "duplicated"]);
    }

    #[test]
    fn test_require_topics_missing() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.require_topics().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[[topics]]"));
    }
}
