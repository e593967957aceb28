//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when fetching data from the
//! GitHub REST API through the github_client crate. Every failure is surfaced to the
//! caller; nothing is retried or swallowed.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{ContributorClient, Error};
///
/// match client.list_contributors("octocat/Hello-World").await {
///     Ok(contributors) => println!("{} contributors", contributors.len()),
///     Err(Error::NotFound) => eprintln!("No such repository"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-success status that has no more specific variant.
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        /// The HTTP status code returned by the API
        status: u16,
        /// The message GitHub sent along with the status
        message: String,
    },

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the body is not valid JSON, or when it is valid JSON
    /// of the wrong shape, e.g. an error object where a contributor list was expected
    /// or a contributor entry without a `login`.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The base URL handed to the client builder could not be used.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// which for the contributor endpoint means the repository does not exist
    /// or is not visible to the caller.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// Anonymous requests share a small hourly budget per source address. Configure
    /// a token to lift it.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced an HTTP response.
    ///
    /// Covers DNS resolution, connection, TLS handshake and HTTP protocol failures.
    #[error("Failed to reach the GitHub API: {0}")]
    Transport(String),
}
