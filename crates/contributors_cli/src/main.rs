use clap::{Parser, Subcommand};
use contributors_cli::commands::{
    fetch_cmd::{self, FetchArgs},
    render_cmd::{self, RenderArgs},
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// site-contributors: Render GitHub contributor lists into static site pages
#[derive(Parser)]
#[command(name = "site-contributors")]
#[command(about = "Render GitHub contributor lists into static site pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand `{% contributors owner/name %}` tags in a page
    Render(RenderArgs),

    /// Print the contributor list of a repository as JSON
    Fetch(FetchArgs),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so rendered pages on stdout stay clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("SITE_CONTRIBUTORS_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Render(args) => render_cmd::execute(args).await,
        Commands::Fetch(args) => fetch_cmd::execute(args).await,
        Commands::Version => {
            println!(
                "site-contributors version {}",
                option_env!("SITE_CONTRIBUTORS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
