//! Crate for reading repository data from the GitHub REST API.
//!
//! This crate provides a small client for the one call the site needs: listing a
//! repository's contributors. Requests are anonymous by default and are subject to
//! GitHub's unauthenticated rate limit; a personal token can be supplied to lift it.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::Contributor;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The API host queried when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Trait for fetching the contributor list of a repository.
///
/// Renderers depend on this trait rather than on [`GitHubClient`] so that the
/// source of contributor data can be swapped out, for instance in tests.
#[async_trait]
pub trait ContributorClient: Send + Sync {
    /// Lists the contributors of a repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository identifier in `owner/name` form. It is used
    ///   verbatim in the request path and is not validated.
    ///
    /// # Returns
    ///
    /// The first page of contributors, in the order the API returned them.
    ///
    /// # Errors
    ///
    /// - `Error::Transport` if no response was received
    /// - `Error::NotFound` if the repository does not exist
    /// - `Error::RateLimitExceeded` if the API refused the request because of rate limiting
    /// - `Error::ApiError` for any other non-success status
    /// - `Error::Deserialization` if the body is not a JSON list of contributors
    async fn list_contributors(&self, repository: &str) -> Result<Vec<Contributor>, Error>;
}

/// A client for reading public repository data from the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an existing `Octocrab` instance.
    ///
    /// Use [`create_anonymous_client`] or [`create_token_client`] to build the
    /// `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContributorClient for GitHubClient {
    /// Issues a single `GET /repos/{repository}/contributors` request.
    ///
    /// Only the first page is read; the `Link` header is ignored. Nothing is
    /// retried or cached, so every call is one request against the API.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{create_anonymous_client, ContributorClient, GitHubClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), github_client::Error> {
    ///     let client = GitHubClient::new(create_anonymous_client(None)?);
    ///
    ///     for contributor in client.list_contributors("octocat/Hello-World").await? {
    ///         println!("{} <{}>", contributor.login, contributor.html_url);
    ///     }
    ///
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(repository = %repository))]
    async fn list_contributors(&self, repository: &str) -> Result<Vec<Contributor>, Error> {
        let path = contributors_path(repository);

        debug!("Making API call to: {}", path);
        let response = self.client._get(path.as_str()).await.map_err(|e| {
            error!(repository = repository, "Failed to request contributor list");
            log_octocrab_error("Failed to request contributor list", &e);
            Error::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = self.client.body_to_string(response).await.map_err(|e| {
            log_octocrab_error("Failed to read contributor list response", &e);
            Error::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let err = status_error(status, &body);
            error!(
                repository = repository,
                status = status.as_u16(),
                error = %err,
                "Received an error from GitHub while listing contributors"
            );
            return Err(err);
        }

        let contributors: Vec<Contributor> = serde_json::from_str(&body).map_err(|e| {
            error!(
                repository = repository,
                error = %e,
                "Contributor list response could not be decoded"
            );
            Error::Deserialization(e)
        })?;

        info!(
            repository = repository,
            count = contributors.len(),
            "Successfully retrieved contributors"
        );

        Ok(contributors)
    }
}

/// Creates an unauthenticated `Octocrab` client.
///
/// Retries are disabled so that each call maps to exactly one request.
///
/// # Arguments
///
/// * `base_url` - Optional API root to use instead of [`DEFAULT_API_BASE_URL`],
///   e.g. a GitHub Enterprise host or a local mock server.
///
/// # Errors
///
/// Returns `Error::InvalidBaseUrl` if the URL cannot be used as an API root and
/// `Error::Transport` if the HTTP client cannot be constructed.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_anonymous_client, GitHubClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), github_client::Error> {
///     let client = GitHubClient::new(create_anonymous_client(None)?);
///     Ok(())
/// }
/// ```
#[instrument]
pub fn create_anonymous_client(base_url: Option<&Url>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
    if let Some(url) = base_url {
        builder = builder
            .base_uri(validate_base_url(url)?)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", url, e)))?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build anonymous Octocrab client");
        Error::Transport(e.to_string())
    })
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
///
/// Returns `Error::InvalidBaseUrl` if the URL cannot be used as an API root and
/// `Error::Transport` if the HTTP client cannot be constructed.
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_url: Option<&Url>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
    if let Some(url) = base_url {
        builder = builder
            .base_uri(validate_base_url(url)?)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", url, e)))?;
    }

    builder
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build token authenticated Octocrab client");
            Error::Transport(e.to_string())
        })
}

/// Checks that a URL can serve as the API root and returns it as a string.
fn validate_base_url(url: &Url) -> Result<String, Error> {
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidBaseUrl(url.to_string()));
    }

    debug!(base_url = %url, "Using custom API base URL");
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Builds the request path for a repository's contributor list.
///
/// The identifier is interpolated as-is; an empty identifier produces
/// `/repos//contributors`, which the API rejects.
pub fn contributors_path(repository: &str) -> String {
    format!("/repos/{}/contributors", repository)
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

fn status_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<GitHubErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded,
        StatusCode::FORBIDDEN if message.to_ascii_lowercase().contains("rate limit") => {
            warn!("Anonymous GitHub API rate limit exhausted");
            Error::RateLimitExceeded
        }
        _ => Error::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            error_message = source.message,
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
