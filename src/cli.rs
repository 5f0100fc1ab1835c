//! Command-line interface definition for chatview
//!
//! This module defines the CLI structure using clap's derive API. The tool
//! has no subcommands: flags select one of three modes (live server,
//! terminal listing, static generation).

use crate::error::{Result, ViewerError};
use clap::Parser;
use std::path::PathBuf;

/// chatview - View Claude Code chat history as readable HTML
///
/// Without flags, generates static HTML for the most recent sessions.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "chatview")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  chatview --serve              Start live server (auto-updates)
  chatview --serve -P 9000      Live server on custom port
  chatview                      Generate static HTML files
  chatview --list               List all sessions in terminal
  chatview -s abc123            Generate HTML for a specific session
  chatview --open               Open in browser after generating")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Start live web server
    #[arg(long, conflicts_with = "list")]
    pub serve: bool,

    /// Port for the live server
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Select a session by ID prefix
    #[arg(short, long)]
    pub session: Option<String>,

    /// Filter sessions by project path substring
    #[arg(short, long)]
    pub project: Option<String>,

    /// Output directory for static HTML
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Claude Code data directory
    #[arg(long)]
    pub claude_dir: Option<PathBuf>,

    /// List sessions in the terminal
    #[arg(long)]
    pub list: bool,

    /// Open the result in a browser: the session page with -s, the index
    /// otherwise. With --serve, open the server URL once it is listening;
    /// the server never opens a browser without this flag.
    #[arg(long)]
    pub open: bool,

    /// Limit number of sessions
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// The single action a CLI invocation dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Live auto-refreshing server
    Serve,
    /// Print a session table to the terminal
    List,
    /// Write HTML files to the output directory
    Generate,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve which mode this invocation runs in
    pub fn mode(&self) -> Mode {
        if self.serve {
            Mode::Serve
        } else if self.list {
            Mode::List
        } else {
            Mode::Generate
        }
    }

    /// Check flag values clap cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidArgument`] for a zero limit, port zero,
    /// or an empty session/project filter.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(
                ViewerError::InvalidArgument("--limit must be greater than 0".to_string()).into(),
            );
        }
        if self.port == Some(0) {
            return Err(
                ViewerError::InvalidArgument("--port must be greater than 0".to_string()).into(),
            );
        }
        if matches!(self.session.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(
                ViewerError::InvalidArgument("--session cannot be empty".to_string()).into(),
            );
        }
        if matches!(self.project.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(
                ViewerError::InvalidArgument("--project cannot be empty".to_string()).into(),
            );
        }
        Ok(())
    }
}
