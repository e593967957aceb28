//! Template tag expansion for static site pages.
//!
//! This crate provides the `contributors` tag, which renders the contributor list
//! of a GitHub repository as HTML, together with the small amount of host
//! machinery needed to use it: a [`Tag`] trait, an explicit [`TagRegistry`] that
//! the host application fills during setup, and a [`PageRenderer`] that expands
//! `{% name arguments %}` tags in page source.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use github_client::{create_anonymous_client, GitHubClient};
//! use template_engine::{
//!     register_contributors_tag, HandlebarsTemplateEngine, PageRenderer, TagContext, TagRegistry,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(GitHubClient::new(create_anonymous_client(None)?));
//! let engine = Arc::new(HandlebarsTemplateEngine::new()?);
//!
//! let mut registry = TagRegistry::new();
//! register_contributors_tag(&mut registry, client, engine)?;
//!
//! let renderer = PageRenderer::new(registry);
//! let page = renderer
//!     .render_page("<h2>Thanks</h2>\n{% contributors octocat/Hello-World %}", &TagContext::default())
//!     .await?;
//! println!("{}", page);
//! # Ok(())
//! # }
//! ```

mod contributors;
mod errors;
mod handlebars_engine;
mod page;
mod tag;

pub use contributors::{
    parse_repository_argument, register_contributors_tag, ContributorsTag, CONTRIBUTORS_TAG_NAME,
};
pub use errors::Error;
pub use handlebars_engine::{
    escape_html, EscapeMode, HandlebarsTemplateEngine, RenderConfig, DEFAULT_CONTRIBUTOR_TEMPLATE,
};
pub use page::PageRenderer;
pub use tag::{Tag, TagContext, TagFactory, TagRegistry};
