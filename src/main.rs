//! chatview - Claude Code chat history viewer
//!
#![doc = "chatview - Claude Code chat history viewer"]
#![doc = "Main entry point for the chatview binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatview::cli::Cli;
use chatview::commands;
use chatview::config::Config;
use chatview::error::ViewerError;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    cli.validate()?;

    // Load configuration
    let config = Config::load(&cli)?;

    // Validate configuration
    config.validate()?;

    if !config.claude_dir.is_dir() {
        return Err(ViewerError::NotFound(format!(
            "Claude Code directory {}",
            config.claude_dir.display()
        ))
        .into());
    }
    tracing::debug!("Using Claude Code data at {}", config.claude_dir.display());

    // Execute command
    commands::dispatch(&cli, config).await
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `-v` switches from info to debug.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "chatview=debug" } else { "chatview=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
