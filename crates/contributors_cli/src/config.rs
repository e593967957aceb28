//! Configuration management for the site-contributors CLI.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.
//! Every setting is optional; without a file the CLI talks to the public GitHub
//! API anonymously and writes contributor fields unescaped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use template_engine::{EscapeMode, RenderConfig};
use tracing::debug;
use url::Url;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "site-contributors.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the site-contributors CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// api_base_url = "https://api.github.com"
/// token = "ghp_..."
///
/// [rendering]
/// escape_html = true
/// contributor_template = "<li>{{login}}</li>\n"
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How to reach the GitHub API
    #[serde(default)]
    pub github: GitHubConfig,

    /// How contributor lists are turned into HTML
    #[serde(default)]
    pub rendering: RenderingConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// does not contain a valid configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use contributors_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./site-contributors.toml");
    /// match AppConfig::load(&config_path) {
    ///     Ok(config) => println!("Escaping HTML: {}", config.rendering.escape_html),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration the CLI should run with.
    ///
    /// An explicitly named file must exist. When no path is given the default
    /// file in the current directory is used if present, and the built-in
    /// defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a file that should be read cannot be loaded.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);

        if config_path.is_none() && !path.exists() {
            debug!(path = ?path, "No configuration file found, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }
}

/// Settings for the GitHub API connection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API root to use instead of the public GitHub API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Personal access token. Requests are anonymous when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl GitHubConfig {
    /// Parses the configured API base URL, if any.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the value is not an absolute URL.
    pub fn api_base_url(&self) -> Result<Option<Url>, Error> {
        self.api_base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| Error::Config(format!("Invalid api_base_url '{}': {}", raw, e)))
            })
            .transpose()
    }
}

/// Settings for turning contributor lists into HTML.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Escape markup-significant characters in contributor fields.
    #[serde(default = "RenderingConfig::default_escape_html")]
    pub escape_html: bool,

    /// Fail when the contributor template refers to a field a record lacks.
    #[serde(default = "RenderingConfig::default_strict_variables")]
    pub strict_variables: bool,

    /// Handlebars template rendered once per contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_template: Option<String>,
}

impl RenderingConfig {
    fn default_escape_html() -> bool {
        false
    }

    fn default_strict_variables() -> bool {
        true
    }

    /// Converts the settings into the template engine's configuration.
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            escape: if self.escape_html {
                EscapeMode::Html
            } else {
                EscapeMode::Raw
            },
            strict_variables: self.strict_variables,
            contributor_template: self.contributor_template.clone(),
            ..RenderConfig::default()
        }
    }
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            escape_html: RenderingConfig::default_escape_html(),
            strict_variables: RenderingConfig::default_strict_variables(),
            contributor_template: None,
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./site-contributors.toml` in the current directory
/// - Falls back to the current directory if unable to determine the working directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
