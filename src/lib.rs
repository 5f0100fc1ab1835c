//! chatview - Claude Code chat history viewer library
//!
//! This library turns the JSONL session logs Claude Code writes under
//! `~/.claude/projects/` into readable, self-contained HTML pages, either
//! as static files or through a live auto-refreshing local server.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Session model, tolerant JSONL parser, and session index
//! - `render`: Pure HTML rendering of sessions and the session listing
//! - `generator`: Static site generation
//! - `server`: Live HTTP server
//! - `commands`: CLI command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatview::render::{render_session, PageOptions};
//! use chatview::session::parse_session;
//! use chatview::Config;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let session = parse_session(Path::new("/home/me/.claude/projects/-w/abc.jsonl"))?;
//!     let html = render_session(&session, &PageOptions::static_page(config.render.clone()));
//!     std::fs::write("abc.html", html)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, ViewerError};
pub use generator::{generate_site, GenerationReport};
pub use session::{Session, SessionFilter, SessionIndex, SessionIndexEntry};

#[cfg(test)]
pub mod test_utils;
