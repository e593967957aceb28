//! The `contributors` tag.
//!
//! `{% contributors owner/name %}` expands to one HTML block per contributor of
//! the named repository. The contributor list is fetched when the tag renders,
//! every time it renders.

use std::sync::Arc;

use async_trait::async_trait;
use github_client::ContributorClient;
use tracing::{info, instrument};

use crate::errors::Error;
use crate::handlebars_engine::HandlebarsTemplateEngine;
use crate::tag::{Tag, TagContext, TagRegistry};

#[cfg(test)]
#[path = "contributors_tests.rs"]
mod tests;

/// Name under which the contributors tag is registered.
pub const CONTRIBUTORS_TAG_NAME: &str = "contributors";

/// Extracts the repository identifier from the tag's argument text.
///
/// The text is trimmed and split on whitespace; the first token is the
/// identifier and any further tokens are ignored. When there is no token the
/// identifier is empty. The identifier's format is not checked.
///
/// # Examples
///
/// ```
/// use template_engine::parse_repository_argument;
///
/// assert_eq!(parse_repository_argument("  octocat/Hello-World  extra"), "octocat/Hello-World");
/// assert_eq!(parse_repository_argument("   "), "");
/// ```
pub fn parse_repository_argument(arguments: &str) -> String {
    arguments
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Renders the contributor list of one repository.
pub struct ContributorsTag {
    repository: String,
    client: Arc<dyn ContributorClient>,
    engine: Arc<HandlebarsTemplateEngine>,
}

impl ContributorsTag {
    /// Creates the tag from its raw argument text.
    ///
    /// # Arguments
    ///
    /// * `arguments` - Text following the tag name, e.g. `" octocat/Hello-World "`
    /// * `client` - Source of contributor records
    /// * `engine` - Renders the records to HTML
    pub fn new(
        arguments: &str,
        client: Arc<dyn ContributorClient>,
        engine: Arc<HandlebarsTemplateEngine>,
    ) -> Self {
        Self {
            repository: parse_repository_argument(arguments),
            client,
            engine,
        }
    }

    /// The repository identifier the tag will query.
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

#[async_trait]
impl Tag for ContributorsTag {
    fn name(&self) -> &str {
        CONTRIBUTORS_TAG_NAME
    }

    /// Fetches the contributor list and renders it.
    ///
    /// # Errors
    ///
    /// - `Error::Fetch` if the contributor list cannot be retrieved or decoded
    /// - `Error::Render` if the contributor template fails for a record
    #[instrument(skip(self, _context), fields(repository = %self.repository))]
    async fn render(&self, _context: &TagContext) -> Result<String, Error> {
        let contributors = self.client.list_contributors(&self.repository).await?;

        let html = self.engine.render_contributors(&contributors)?;

        info!(
            repository = %self.repository,
            count = contributors.len(),
            bytes = html.len(),
            "Rendered contributors tag"
        );

        Ok(html)
    }
}

/// Registers the contributors tag with a host's registry.
///
/// Every tag constructed from the registry shares `client` and `engine`; no
/// other state is shared between instances.
///
/// # Errors
///
/// Returns `Error::DuplicateTag` if `contributors` is already registered.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use github_client::{create_anonymous_client, GitHubClient};
/// use template_engine::{register_contributors_tag, HandlebarsTemplateEngine, TagRegistry};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(GitHubClient::new(create_anonymous_client(None)?));
/// let engine = Arc::new(HandlebarsTemplateEngine::new()?);
///
/// let mut registry = TagRegistry::new();
/// register_contributors_tag(&mut registry, client, engine)?;
/// # Ok(())
/// # }
/// ```
pub fn register_contributors_tag(
    registry: &mut TagRegistry,
    client: Arc<dyn ContributorClient>,
    engine: Arc<HandlebarsTemplateEngine>,
) -> Result<(), Error> {
    registry.register(CONTRIBUTORS_TAG_NAME, move |arguments: &str| {
        Ok(Box::new(ContributorsTag::new(
            arguments,
            Arc::clone(&client),
            Arc::clone(&engine),
        )) as Box<dyn Tag>)
    })
}
