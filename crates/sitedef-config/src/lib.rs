//! Configuration management for sitedef.
//!
//! Parses `sitedef.toml` files with serde and provides auto-discovery of the
//! config file in the working directory and its parents.
//!
//! A config file carries the definition identity, site defaults, a
//! placeholder table and declarative site manifests:
//!
//! ```toml
//! [definition]
//! name = "corporate"
//! version = 2
//!
//! [defaults]
//! primary_locale = "en"
//! default_timezone = "US/Central"
//!
//! [placeholders]
//! root = "${SITE_ROOT:-/corp}"
//!
//! [[sites]]
//! id = "main"
//!
//! [[sites.pages]]
//! id = "home"
//! path = "${root}/home"
//!
//! [[sites.hostnames]]
//! name = "example.com"
//! page = "home"
//! ```
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Values of the `[placeholders]` table support `${VAR}` and
//! `${VAR:-default}`. Site manifest paths are not expanded here; their
//! `${name}` references are resolved against the placeholder table when sites
//! are built.

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sitedef.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config. Placeholder overrides
/// replace or add single entries.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Placeholder overrides, applied in order.
    pub placeholders: Vec<(String, String)>,
    /// Override primary locale of new sites.
    pub primary_locale: Option<String>,
    /// Override default time zone of new sites.
    pub default_timezone: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Definition identity.
    pub definition: DefinitionConfig,
    /// Defaults for new sites.
    pub defaults: DefaultsConfig,
    /// Placeholder name to value table.
    pub placeholders: BTreeMap<String, String>,
    /// Declarative site manifests, built in order.
    pub sites: Vec<SiteManifest>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[definition]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefinitionConfig {
    /// Definition name.
    pub name: String,
    /// Definition version, starting at 1.
    pub version: u32,
}

impl Default for DefinitionConfig {
    fn default() -> Self {
        Self {
            name: "default".to_owned(),
            version: 1,
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Primary locale tag of new sites.
    pub primary_locale: String,
    /// Default time zone of new sites.
    pub default_timezone: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            primary_locale: "en".to_owned(),
            default_timezone: "US/Central".to_owned(),
        }
    }
}

/// One `[[sites]]` entry.
#[derive(Debug, Deserialize)]
pub struct SiteManifest {
    /// Site id.
    pub id: String,
    /// Root pages, with nested pages.
    #[serde(default)]
    pub pages: Vec<PageManifest>,
    /// Templates.
    #[serde(default)]
    pub templates: Vec<ArtifactManifest>,
    /// Layouts.
    #[serde(default)]
    pub layouts: Vec<ArtifactManifest>,
    /// Root content.
    #[serde(default)]
    pub content: Vec<ContentManifest>,
    /// Host bindings, applied after pages.
    #[serde(default)]
    pub hostnames: Vec<HostnameManifest>,
}

/// A page and its subtree.
#[derive(Debug, Deserialize)]
pub struct PageManifest {
    /// Page id, unique among siblings.
    pub id: String,
    /// Path, may contain `${name}` placeholders.
    #[serde(default)]
    pub path: String,
    /// Stage the page for removal.
    #[serde(default)]
    pub remove: bool,
    /// Page content.
    #[serde(default)]
    pub content: Vec<ContentManifest>,
    /// Child pages.
    #[serde(default)]
    pub pages: Vec<PageManifest>,
}

/// A content item and its nested content.
#[derive(Debug, Deserialize)]
pub struct ContentManifest {
    /// Content id.
    pub id: String,
    /// Payload kind: `text`, `html`, `image`, `link` or `composite`.
    #[serde(default = "default_content_kind")]
    pub kind: String,
    /// Payload.
    #[serde(default)]
    pub body: String,
    /// Path, may contain `${name}` placeholders.
    #[serde(default)]
    pub path: String,
    /// Stage the content for removal instead of adding it.
    #[serde(default)]
    pub remove: bool,
    /// Nested content.
    #[serde(default)]
    pub children: Vec<ContentManifest>,
}

fn default_content_kind() -> String {
    "text".to_owned()
}

/// A template or layout.
#[derive(Debug, Deserialize)]
pub struct ArtifactManifest {
    /// Template or layout id.
    pub id: String,
    /// Its content.
    #[serde(default)]
    pub content: Vec<ContentManifest>,
}

/// A hostname binding.
#[derive(Debug, Deserialize)]
pub struct HostnameManifest {
    /// Host address.
    pub name: String,
    /// Id of the root welcome page.
    pub page: String,
    /// Path for the welcome page. When set, the page is created if missing
    /// and its path is assigned.
    pub path: Option<String>,
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
        /// Config field path (e.g., "`placeholders.root`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-blank.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Placeholder names follow the same rule as `${name}` references.
fn require_placeholder_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid_start || !valid_rest {
        return Err(ConfigError::Validation(format!(
            "invalid placeholder name: {name:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitedef.toml` in the current directory and
    /// its parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the result is invalid.
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
        }
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text and expand placeholder values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::EnvVar`.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        config.expand_env_vars()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        for (name, value) in &settings.placeholders {
            self.placeholders.insert(name.clone(), value.clone());
        }
        if let Some(locale) = &settings.primary_locale {
            self.defaults.primary_locale.clone_from(locale);
        }
        if let Some(timezone) = &settings.default_timezone {
            self.defaults.default_timezone.clone_from(timezone);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.definition.name, "definition.name")?;
        if self.definition.version == 0 {
            return Err(ConfigError::Validation(
                "definition.version must be at least 1".to_owned(),
            ));
        }
        require_non_empty(&self.defaults.primary_locale, "defaults.primary_locale")?;
        require_non_empty(&self.defaults.default_timezone, "defaults.default_timezone")?;

        for name in self.placeholders.keys() {
            require_placeholder_name(name)?;
        }

        let mut seen = HashSet::new();
        for (idx, site) in self.sites.iter().enumerate() {
            require_non_empty(&site.id, &format!("sites[{idx}].id"))?;
            if !seen.insert(site.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate site id: {}",
                    site.id
                )));
            }
            for (h, hostname) in site.hostnames.iter().enumerate() {
                require_non_empty(&hostname.name, &format!("sites[{idx}].hostnames[{h}].name"))?;
            }
        }

        Ok(())
    }

    /// Expand environment variable references in placeholder values.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_table(&mut self.placeholders, "placeholders")
    }
}
