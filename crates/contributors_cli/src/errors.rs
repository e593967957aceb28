use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the site-contributors CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as an explicitly named file that does not exist, invalid TOML or an
    /// unusable API base URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching contributors failed.
    #[error("Failed to fetch contributors: {0}")]
    Fetch(#[from] github_client::Error),

    /// Failed to serialize command output.
    #[error("Failed to format output: {0}")]
    FormatOutput(#[from] serde_json::Error),

    /// Failed to load a file from the filesystem.
    ///
    /// This error wraps underlying I/O errors that occur when reading page
    /// sources, such as permission issues or missing files.
    #[error("Failed to load file.")]
    LoadFile(#[source] io::Error),

    /// Expanding the tags of a page failed.
    #[error("Failed to render page: {0}")]
    Render(#[from] template_engine::Error),

    /// Failed to write the rendered page.
    #[error("Failed to write file.")]
    WriteFile(#[source] io::Error),
}
