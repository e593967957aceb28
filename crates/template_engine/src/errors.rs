use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types that can occur while expanding template tags.
///
/// Any of these aborts the rendering of the page that contained the tag; there
/// is no partial output.
///
/// # Examples
///
/// ```rust,ignore
/// use template_engine::Error;
///
/// match renderer.render_page(&source, &context).await {
///     Ok(page) => println!("{}", page),
///     Err(Error::Fetch(e)) => eprintln!("Could not load contributors: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A tag with the same name has already been registered.
    #[error("Tag already registered: {0}")]
    DuplicateTag(String),

    /// Fetching the data a tag renders failed.
    ///
    /// This wraps transport failures, non-success API responses and responses
    /// that could not be decoded.
    #[error("Failed to fetch tag data: {0}")]
    Fetch(#[from] github_client::Error),

    /// Template rendering failed during execution.
    ///
    /// This error occurs when a syntactically valid template fails during
    /// rendering, typically because a strict-mode template refers to a field
    /// the record does not carry.
    #[error("Template rendering failed: {message}")]
    Render {
        /// Detailed error message from the Handlebars renderer
        message: String,
    },

    /// Template compilation failed due to syntax errors or size limits.
    #[error("Template compilation failed: {message}")]
    TemplateCompilation {
        /// Detailed error message from the Handlebars parser
        message: String,
    },

    /// No tag with the given name has been registered.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),
}
