//! # Handlebars Fragment Rendering
//!
//! This module turns typed contributor records into HTML using the Handlebars
//! templating engine. Field values are interpolated exactly as the API returned
//! them unless the engine is configured with [`EscapeMode::Html`].
//!
//! ## Examples
//!
//! ```rust
//! # use template_engine::HandlebarsTemplateEngine;
//! # use github_client::Contributor;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = HandlebarsTemplateEngine::new()?;
//!
//! let contributors = vec![Contributor::new(
//!     "octocat",
//!     "https://avatars.githubusercontent.com/u/583231",
//!     "https://github.com/octocat",
//! )];
//!
//! let html = engine.render_contributors(&contributors)?;
//! assert!(html.contains(r#"<span class="name">octocat</span>"#));
//! # Ok(())
//! # }
//! ```

use github_client::Contributor;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::Error;

#[cfg(test)]
#[path = "handlebars_tests.rs"]
mod handlebars_tests;

/// Name under which the per-contributor template is registered.
const CONTRIBUTOR_TEMPLATE_NAME: &str = "contributor";

/// The markup emitted for every contributor.
///
/// Each block ends in a newline so that consecutive blocks sit on their own lines.
pub const DEFAULT_CONTRIBUTOR_TEMPLATE: &str = r#"<div class="contributor">
  <a href="{{html_url}}">
    <img src="{{avatar_url}}">
    <span class="name">{{login}}</span>
  </a>
</div>
"#;

/// How interpolated values are treated before they are written into the markup.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Replace `&`, `<`, `>`, `"` and `'` with HTML character references.
    Html,

    /// Write values exactly as the API returned them.
    ///
    /// Markup in a contributor's fields ends up in the page unchanged.
    #[default]
    Raw,
}

/// Configuration for contributor fragment rendering.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Escaping applied to every interpolated value.
    ///
    /// **Default**: [`EscapeMode::Raw`]
    pub escape: EscapeMode,

    /// Whether to fail on undefined variables (true) or render them empty (false).
    ///
    /// **Default**: `true`
    pub strict_variables: bool,

    /// Maximum size of a custom contributor template in bytes.
    ///
    /// **Default**: 64KB (65,536 bytes)
    pub max_template_size: usize,

    /// Handlebars template rendered once per contributor.
    ///
    /// When `None`, [`DEFAULT_CONTRIBUTOR_TEMPLATE`] is used.
    pub contributor_template: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            escape: EscapeMode::Raw,
            strict_variables: true,
            max_template_size: 65_536, // 64KB
            contributor_template: None,
        }
    }
}

/// Handlebars engine holding the compiled contributor template.
///
/// The template is compiled once at construction; rendering the same records
/// twice produces byte-identical output.
pub struct HandlebarsTemplateEngine {
    /// The underlying Handlebars registry with the contributor template registered.
    handlebars: Handlebars<'static>,
}

impl HandlebarsTemplateEngine {
    /// Creates an engine with the default template and no escaping.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateCompilation` if the built-in template fails to
    /// compile, which indicates a programming error.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(RenderConfig::default())
    }

    /// Creates a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateCompilation` if the configured template is larger
    /// than `max_template_size` or is not valid Handlebars syntax.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use template_engine::{EscapeMode, HandlebarsTemplateEngine, RenderConfig};
    ///
    /// let config = RenderConfig {
    ///     escape: EscapeMode::Html,
    ///     contributor_template: Some("<li>{{login}}</li>\n".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let engine = HandlebarsTemplateEngine::with_config(config)?;
    /// # Ok::<(), template_engine::Error>(())
    /// ```
    pub fn with_config(config: RenderConfig) -> Result<Self, Error> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_variables);

        match config.escape {
            EscapeMode::Html => handlebars.register_escape_fn(escape_html),
            EscapeMode::Raw => handlebars.register_escape_fn(handlebars::no_escape),
        }

        let template = config
            .contributor_template
            .as_deref()
            .unwrap_or(DEFAULT_CONTRIBUTOR_TEMPLATE);

        if template.len() > config.max_template_size {
            return Err(Error::TemplateCompilation {
                message: format!(
                    "Template size {} bytes exceeds limit of {} bytes",
                    template.len(),
                    config.max_template_size
                ),
            });
        }

        handlebars
            .register_template_string(CONTRIBUTOR_TEMPLATE_NAME, template)
            .map_err(|e| {
                error!(error = %e, "Failed to compile contributor template");
                Error::TemplateCompilation {
                    message: e.to_string(),
                }
            })?;

        debug!(escape = ?config.escape, "Compiled contributor template");

        Ok(Self { handlebars })
    }

    /// Renders one block per contributor, in the order given, and concatenates them.
    ///
    /// An empty slice renders as the empty string.
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if the template cannot be rendered for a record.
    pub fn render_contributors(&self, contributors: &[Contributor]) -> Result<String, Error> {
        let mut html = String::new();

        for contributor in contributors {
            let block = self
                .handlebars
                .render(CONTRIBUTOR_TEMPLATE_NAME, contributor)
                .map_err(|e| {
                    error!(login = %contributor.login, error = %e, "Failed to render contributor");
                    Error::Render {
                        message: e.to_string(),
                    }
                })?;
            html.push_str(&block);
        }

        Ok(html)
    }
}

/// Escapes the characters that are significant in HTML text and attribute values.
///
/// Unlike the Handlebars default this leaves `=` and backticks alone, so query
/// strings in avatar URLs come through readable.
pub fn escape_html(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
