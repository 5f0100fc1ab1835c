/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint. Exactly
one runs per invocation:

- `serve`: Live auto-refreshing server
- `list`: Session table in the terminal
- `generate`: Static HTML files in the output directory
*/

use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionFilter;

// Terminal session table
pub mod list;

/// Build the session selection requested on the command line
pub fn session_filter(cli: &Cli) -> SessionFilter {
    let mut filter = SessionFilter::default();
    if let Some(prefix) = &cli.session {
        filter = filter.with_session_prefix(prefix.clone());
    }
    if let Some(project) = &cli.project {
        filter = filter.with_project(project.clone());
    }
    filter
}

/// Run the handler selected by `cli`
pub async fn dispatch(cli: &Cli, config: Config) -> Result<()> {
    let filter = session_filter(cli);
    match cli.mode() {
        Mode::Serve => {
            tracing::info!("Starting live server");
            serve::run_serve(config, cli.open).await
        }
        Mode::List => {
            tracing::info!("Listing sessions");
            list::list_sessions(&config, &filter)
        }
        Mode::Generate => {
            tracing::info!("Generating static HTML");
            generate::run_generate(&config, &filter, cli.open)
        }
    }
}

// Static generation command handler
pub mod generate {
    //! Static generation handler.
    //!
    //! Writes the site, reports what was written, and optionally opens the
    //! result in the default browser: the selected session page with `-s`,
    //! the index otherwise.

    use super::*;
    use crate::generator::{generate_site, open_in_browser};
    use colored::Colorize;

    /// Generate static HTML and print a short report
    ///
    /// # Errors
    ///
    /// Propagates failures from [`generate_site`]; a browser that cannot be
    /// opened is only logged.
    pub fn run_generate(config: &Config, filter: &SessionFilter, open: bool) -> Result<()> {
        println!("Claude Code data: {}", config.claude_dir.display());
        println!("Output: {}", config.output_dir.display());

        let report = generate_site(config, filter)?;

        println!(
            "{}",
            format!("Generated {} session files", report.written).green()
        );
        println!("Index: {}", report.index_path.display());

        if open {
            if let Err(e) = open_in_browser(report.page_to_open(filter)) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        Ok(())
    }
}

// Live server command handler
pub mod serve {
    //! Live server handler.

    use super::*;
    use crate::server::run_server;
    use colored::Colorize;

    /// Print the server banner and serve until interrupted
    pub async fn run_serve(config: Config, open: bool) -> Result<()> {
        println!("{}", "Claude Chat Viewer - Live Server".bold());
        println!(
            "Server running at: {}",
            format!("http://{}:{}", config.server.host, config.port).cyan()
        );
        println!("Reading from: {}", config.claude_dir.display());
        println!("Press Ctrl+C to stop");

        run_server(config, open).await
    }
}
