//! docsift - extract structured fields from document collections.

use clap::Parser;
use docsift_cli::commands;
use docsift_cli::{Cli, Config, Formatter, Workspace};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so table and JSON output stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("DOCSIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> docsift_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let mut workspace = Workspace::open(config)?;
    debug!("Running {:?}", cli.command);

    commands::execute(cli.command, &mut workspace, &formatter).await
}
