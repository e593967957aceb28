//! # Models
//!
//! This module contains the data models decoded from GitHub API responses.
//!
//! The records are typed: a response that lacks one of the fields the site
//! renders fails to decode instead of producing placeholder output later on.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents one entry of a repository's contributor list.
///
/// GitHub returns many more fields per contributor than are used here; the
/// unused ones are ignored during deserialization. Entries keep the order the
/// API returned them in, which is by number of contributions.
///
/// # Examples
///
/// ```
/// use github_client::models::Contributor;
///
/// let contributor: Contributor = serde_json::from_str(
///     r#"{
///         "login": "octocat",
///         "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
///         "html_url": "https://github.com/octocat",
///         "contributions": 32
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(contributor.login, "octocat");
/// assert_eq!(contributor.contributions, Some(32));
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// The login name of the contributor, used as the display name
    pub login: String,
    /// URL of the contributor's avatar image
    pub avatar_url: String,
    /// URL of the contributor's GitHub profile page
    pub html_url: String,
    /// The unique numeric ID of the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Number of commits the contributor has in the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<u64>,
    /// The type of account, usually `User` or `Bot`
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_type: Option<String>,
}

impl Contributor {
    /// Creates a contributor record carrying only the rendered fields.
    pub fn new(
        login: impl Into<String>,
        avatar_url: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            avatar_url: avatar_url.into(),
            html_url: html_url.into(),
            id: None,
            contributions: None,
            account_type: None,
        }
    }
}
