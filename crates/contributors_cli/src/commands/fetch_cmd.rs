use clap::Args;
use github_client::ContributorClient;
use tracing::instrument;

use crate::config::AppConfig;
use crate::errors::Error;
use crate::host::build_client;

#[cfg(test)]
#[path = "fetch_cmd_tests.rs"]
mod tests;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Repository identifier in `owner/name` form
    pub repository: String,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Execute the fetch command
#[instrument]
pub async fn execute(args: &FetchArgs) -> Result<(), Error> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let client = build_client(&config.github)?;

    let json = fetch_contributors_json(client.as_ref(), &args.repository).await?;
    println!("{}", json);

    Ok(())
}

/// Fetches the contributor list and formats it as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Error::Fetch` if the contributor list cannot be retrieved.
pub async fn fetch_contributors_json(
    client: &dyn ContributorClient,
    repository: &str,
) -> Result<String, Error> {
    let contributors = client.list_contributors(repository).await?;
    Ok(serde_json::to_string_pretty(&contributors)?)
}
