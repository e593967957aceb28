//! Wiring of the GitHub client, template engine and tag registry.
//!
//! This is where the host application registers its tags. Nothing is
//! registered implicitly; a renderer only knows the tags added here.

use std::sync::Arc;

use github_client::{create_anonymous_client, create_token_client, ContributorClient, GitHubClient};
use template_engine::{
    register_contributors_tag, EscapeMode, HandlebarsTemplateEngine, PageRenderer, TagRegistry,
};
use tracing::{debug, info};

use crate::config::{AppConfig, GitHubConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;

/// Builds the contributor client described by the configuration.
///
/// # Errors
///
/// Returns `Error::Config` for an unusable base URL and `Error::Fetch` if the
/// HTTP client cannot be constructed.
pub fn build_client(github: &GitHubConfig) -> Result<Arc<dyn ContributorClient>, Error> {
    let base_url = github.api_base_url()?;

    let octocrab = match &github.token {
        Some(token) => {
            info!("Using token authentication for GitHub API requests");
            create_token_client(token, base_url.as_ref())?
        }
        None => {
            debug!("Using anonymous GitHub API requests");
            create_anonymous_client(base_url.as_ref())?
        }
    };

    Ok(Arc::new(GitHubClient::new(octocrab)))
}

/// Builds a page renderer with the contributors tag registered.
///
/// # Arguments
///
/// * `config` - Loaded application configuration
/// * `client` - Source of contributor records
/// * `force_escape` - Escape contributor fields regardless of the configuration
///
/// # Errors
///
/// Returns `Error::Render` if the contributor template does not compile.
pub fn build_page_renderer(
    config: &AppConfig,
    client: Arc<dyn ContributorClient>,
    force_escape: bool,
) -> Result<PageRenderer, Error> {
    let mut render_config = config.rendering.to_render_config();
    if force_escape {
        render_config.escape = EscapeMode::Html;
    }

    let engine = Arc::new(HandlebarsTemplateEngine::with_config(render_config)?);

    let mut registry = TagRegistry::new();
    register_contributors_tag(&mut registry, client, engine)?;

    Ok(PageRenderer::new(registry))
}
