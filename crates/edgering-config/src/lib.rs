//! Configuration management for Edgering.
//!
//! Parses `edgering.toml` with serde and discovers it in the current
//! directory or any parent. CLI flags override file values through
//! [`CliSettings`].
//!
//! ```toml
//! [render]
//! document_root = "public"
//! table_class = "tbl_MD"
//!
//! [links]
//! linkedin = "LI"
//! twitter = ""
//! ```
//!
//! `[links]` entries are merged over the built-in known links by the
//! caller; an empty class removes a platform.
//!
//! ## Environment Variable Expansion
//!
//! `render.document_root` and `render.table_class` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "edgering.toml";

/// Table class used when neither the file nor the CLI sets one.
const DEFAULT_TABLE_CLASS: &str = "tbl_MD";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the document root used for image sizes.
    pub document_root: Option<PathBuf>,
    /// Override the styling class of converted tables.
    pub table_class: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render settings as written in TOML.
    render: RenderConfigRaw,
    /// Known-link overrides, platform name to class suffix.
    pub links: BTreeMap<String, String>,

    /// Resolved render settings (set after loading).
    #[serde(skip)]
    pub render_resolved: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw `[render]` section (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderConfigRaw {
    document_root: Option<String>,
    table_class: Option<String>,
}

/// Resolved render settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Directory that `<img>` sources resolve against. Image sizes are only
    /// injected when this is set.
    pub document_root: Option<PathBuf>,
    /// Class added to converted tables.
    pub table_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            document_root: None,
            table_class: DEFAULT_TABLE_CLASS.to_owned(),
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
        /// Config field path (e.g. `render.document_root`).
        field: String,
        /// Error message (e.g. `${SITE_ROOT} not set`).
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `edgering.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or the merged configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(document_root) = &settings.document_root {
            self.render_resolved.document_root = Some(document_root.clone());
        }
        if let Some(table_class) = &settings.table_class {
            self.render_resolved.table_class.clone_from(table_class);
        }
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the table class is empty or
    /// contains whitespace or quotes, or a link platform name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let class = &self.render_resolved.table_class;
        require_non_empty(class, "render.table_class")?;
        if class.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
            return Err(ConfigError::Validation(format!(
                "render.table_class must be a single class name, got {class:?}"
            )));
        }

        for platform in self.links.keys() {
            require_non_empty(platform.trim(), "links platform name")?;
        }

        Ok(())
    }

    /// Expand environment variable references in `[render]`.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(root) = &self.render.document_root {
            self.render.document_root = Some(expand::expand_env(root, "render.document_root")?);
        }
        if let Some(class) = &self.render.table_class {
            self.render.table_class = Some(expand::expand_env(class, "render.table_class")?);
        }
        Ok(())
    }

    /// Resolve raw settings against the config file directory.
    ///
    /// Platform names are lowercased; later duplicates win.
    fn resolve(&mut self, config_dir: &Path) {
        self.render_resolved = RenderConfig {
            document_root: self
                .render
                .document_root
                .as_deref()
                .map(|root| config_dir.join(root)),
            table_class: self
                .render
                .table_class
                .clone()
                .unwrap_or_else(|| DEFAULT_TABLE_CLASS.to_owned()),
        };

        self.links = std::mem::take(&mut self.links)
            .into_iter()
            .map(|(platform, class)| (platform.to_lowercase(), class))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render_resolved.document_root, None);
        assert_eq!(config.render_resolved.table_class, "tbl_MD");
        assert!(config.links.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.document_root.is_none());
        assert!(config.links.is_empty());
    }

    #[test]
    fn test_parse_links() {
        let toml = r#"
[links]
linkedin = "LI"
twitter = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.links.get("linkedin").map(String::as_str), Some("LI"));
        assert_eq!(config.links.get("twitter").map(String::as_str), Some(""));
    }

    #[test]
    fn test_load_resolves_relative_document_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[render]
document_root = "public"
table_class = "compact"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.render_resolved,
            RenderConfig {
                document_root: Some(dir.path().join("public")),
                table_class: "compact".to_owned(),
            }
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_keeps_absolute_document_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\ndocument_root = \"/var/www\"\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.render_resolved.document_root,
            Some(PathBuf::from("/var/www"))
        );
    }

    #[test]
    fn test_load_lowercases_platforms() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[links]\nLinkedIn = \"LI\"\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.links,
            BTreeMap::from([("linkedin".to_owned(), "LI".to_owned())])
        );
    }

    #[test]
    fn test_load_expands_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("EDGERING_TEST_CONFIG_ROOT", "/srv/site");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[render]\ndocument_root = \"${EDGERING_TEST_CONFIG_ROOT}/public\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.render_resolved.document_root,
            Some(PathBuf::from("/srv/site/public"))
        );
        unsafe {
            std::env::remove_var("EDGERING_TEST_CONFIG_ROOT");
        }
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/edgering.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[render]\ndocument_root = \"public\"\ntable_class = \"compact\"\n",
        );
        let settings = CliSettings {
            document_root: Some(PathBuf::from("/elsewhere")),
            table_class: Some("wide".to_owned()),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(
            config.render_resolved.document_root,
            Some(PathBuf::from("/elsewhere"))
        );
        assert_eq!(config.render_resolved.table_class, "wide");
    }

    #[test]
    fn test_cli_table_class_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let settings = CliSettings {
            table_class: Some("two classes".to_owned()),
            ..CliSettings::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validate_table_class() {
        for class in ["", "a b", "a\"b", "a'b"] {
            let mut config = Config::default();
            config.render_resolved.table_class = class.to_owned();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{class:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_empty_platform() {
        let mut config = Config::default();
        config.links.insert(" ".to_owned(), "X".to_owned());

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: links platform name cannot be empty"
        );
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("empty");
        std::fs::create_dir(&nested).unwrap();

        let found = Config::discover_from(&nested);
        assert!(found.is_none_or(|p| !p.starts_with(dir.path())));
    }
}
