//! Static site generation
//!
//! Writes one HTML file per selected session plus an `index.html` into the
//! configured output directory.

use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::render::{render_index, render_session, PageOptions};
use crate::session::{parse_session, SessionFilter, SessionIndex};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a static generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Session files written
    pub written: usize,
    /// Written session pages, newest first
    pub session_paths: Vec<PathBuf>,
    /// Location of the generated index page
    pub index_path: PathBuf,
}

impl GenerationReport {
    /// Page to show after generation
    ///
    /// A run selecting sessions by id opens the newest matching session page;
    /// any other run opens the index.
    pub fn page_to_open(&self, filter: &SessionFilter) -> &Path {
        match (&filter.session_prefix, self.session_paths.first()) {
            (Some(_), Some(session_page)) => session_page,
            _ => &self.index_path,
        }
    }
}

/// Generate static HTML for the sessions selected by `filter`
///
/// `config.limit` applies when the filter carries no limit of its own. A
/// session that fails to parse or write is logged and skipped.
///
/// # Errors
///
/// Returns [`ViewerError::NotFound`] if the data directory is missing or a
/// session prefix matches nothing, and an IO error if the output directory
/// or the index page cannot be written.
pub fn generate_site(config: &Config, filter: &SessionFilter) -> Result<GenerationReport> {
    let mut filter = filter.clone();
    if filter.limit.is_none() {
        filter.limit = Some(config.limit);
    }

    let index = SessionIndex::new(&config.claude_dir)
        .with_preview_chars(config.render.preview_max_chars);
    let entries = index.build(&filter)?;

    if entries.is_empty() {
        if let Some(prefix) = &filter.session_prefix {
            return Err(
                ViewerError::NotFound(format!("No session found matching '{}'", prefix)).into(),
            );
        }
    }

    let out_dir = &config.output_dir;
    fs::create_dir_all(out_dir).map_err(|e| ViewerError::from_io(e, out_dir))?;

    let options = PageOptions::static_page(config.render.clone());
    let mut session_paths = Vec::with_capacity(entries.len());

    for entry in &entries {
        let session = match parse_session(&entry.file_path) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", entry.file_path.display(), e);
                continue;
            }
        };

        let target = out_dir.join(format!("{}.html", session.id));
        match fs::write(&target, render_session(&session, &options)) {
            Ok(()) => {
                tracing::debug!("Wrote {}", target.display());
                session_paths.push(target);
            }
            Err(e) => tracing::warn!("Error writing {}: {}", target.display(), e),
        }
    }

    let index_path = out_dir.join("index.html");
    fs::write(&index_path, render_index(&entries, &options, Utc::now()))
        .map_err(|e| ViewerError::from_io(e, &index_path))?;

    let written = session_paths.len();
    tracing::info!("Generated {} session file(s) in {}", written, out_dir.display());

    Ok(GenerationReport {
        written,
        session_paths,
        index_path,
    })
}

/// Open a generated page in the default browser
pub fn open_in_browser(path: &Path) -> Result<()> {
    let url = format!("file://{}", path.display());
    open_url(&url)
}

/// Open a URL in the default browser
pub fn open_url(url: &str) -> Result<()> {
    tracing::debug!("Opening {} in browser", url);
    webbrowser::open(url).map_err(|e| ViewerError::Io(e).into())
}
