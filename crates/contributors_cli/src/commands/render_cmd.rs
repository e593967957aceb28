use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use template_engine::{PageRenderer, TagContext};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::errors::Error;
use crate::host::{build_client, build_page_renderer};

#[cfg(test)]
#[path = "render_cmd_tests.rs"]
mod tests;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Page source containing `{% contributors owner/name %}` tags
    pub input: PathBuf,

    /// File to write the rendered page to. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// HTML-escape contributor fields
    #[arg(long)]
    pub escape_html: bool,
}

/// Execute the render command
#[instrument]
pub async fn execute(args: &RenderArgs) -> Result<(), Error> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let client = build_client(&config.github)?;
    let renderer = build_page_renderer(&config, client, args.escape_html)?;

    let page = render_file(&renderer, &args.input).await?;

    match &args.output {
        Some(path) => write_page(path, &page)?,
        None => print!("{}", page),
    }

    Ok(())
}

/// Reads a page source file and expands its tags.
///
/// # Errors
///
/// Returns `Error::LoadFile` if the file cannot be read and `Error::Render` if
/// any tag on the page fails.
pub async fn render_file(renderer: &PageRenderer, input: &Path) -> Result<String, Error> {
    debug!(input = ?input, "Reading page source");
    let source = fs::read_to_string(input).map_err(Error::LoadFile)?;

    let page = renderer
        .render_page(&source, &TagContext::default())
        .await?;

    info!(input = ?input, bytes = page.len(), "Rendered page");
    Ok(page)
}

fn write_page(path: &Path, page: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(Error::WriteFile)?;
        }
    }

    fs::write(path, page).map_err(Error::WriteFile)?;
    info!(output = ?path, "Wrote rendered page");
    Ok(())
}
