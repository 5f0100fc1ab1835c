//! Session index builder
//!
//! Walks `<claude-dir>/projects/<project-slug>/<session-id>.jsonl` and
//! projects every session into a [`SessionIndexEntry`]. Entries are rebuilt
//! from disk on every call.

use crate::error::{Result, ViewerError};
use crate::session::parser::parse_session;
use crate::session::types::{Session, SessionIndexEntry};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Selection applied while building an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Keep sessions whose id starts with this text
    pub session_prefix: Option<String>,
    /// Keep sessions whose project path contains this text
    pub project: Option<String>,
    /// Keep at most this many entries, after sorting
    pub limit: Option<usize>,
}

impl SessionFilter {
    /// Filter on a session id prefix
    pub fn with_session_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.session_prefix = Some(prefix.into());
        self
    }

    /// Filter on a project path substring
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Truncate the sorted result
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches_id(&self, id: &str) -> bool {
        self.session_prefix
            .as_deref()
            .map_or(true, |prefix| id.starts_with(prefix))
    }

    fn matches_project(&self, project_path: &str) -> bool {
        self.project
            .as_deref()
            .map_or(true, |needle| project_path.contains(needle))
    }
}

/// Builds session listings from a Claude Code data directory
///
/// # Examples
///
/// ```no_run
/// use chatview::session::{SessionFilter, SessionIndex};
///
/// let index = SessionIndex::new("/home/me/.claude");
/// let recent = index.build(&SessionFilter::default().with_limit(10)).unwrap();
/// for entry in recent {
///     println!("{} {}", entry.id, entry.project_path);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionIndex {
    claude_dir: PathBuf,
    preview_max_chars: usize,
}

impl SessionIndex {
    /// Create an index over `claude_dir`
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            preview_max_chars: 150,
        }
    }

    /// Set the preview length in characters
    pub fn with_preview_chars(mut self, max_chars: usize) -> Self {
        self.preview_max_chars = max_chars;
        self
    }

    /// Every session log under `projects/`, in directory-walk order
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NotFound`] if the data directory is missing.
    /// A missing `projects/` directory yields an empty list.
    pub fn session_files(&self) -> Result<Vec<PathBuf>> {
        if !self.claude_dir.is_dir() {
            return Err(ViewerError::NotFound(format!(
                "Claude Code directory {}",
                self.claude_dir.display()
            ))
            .into());
        }

        let projects = self.claude_dir.join("projects");
        if !projects.is_dir() {
            tracing::debug!("No projects directory at {}", projects.display());
            return Ok(Vec::new());
        }

        let files = WalkDir::new(&projects)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_session_log(path))
            .collect();

        Ok(files)
    }

    /// Build the sorted, filtered listing
    ///
    /// Sessions with no messages are left out. Files that cannot be read are
    /// logged and skipped. Entries are ordered newest first; equal times are
    /// ordered by id.
    pub fn build(&self, filter: &SessionFilter) -> Result<Vec<SessionIndexEntry>> {
        let mut entries = Vec::new();

        for path in self.session_files()? {
            let id = session_id(&path);
            if !filter.matches_id(&id) {
                continue;
            }

            let session = match parse_session(&path) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            if session.messages.is_empty() || !filter.matches_project(&session.project_path) {
                continue;
            }

            entries.push(SessionIndexEntry::from_session(
                &session,
                path,
                self.preview_max_chars,
            ));
        }

        sort_newest_first(&mut entries);
        if let Some(limit) = filter.limit {
            entries.truncate(limit);
        }

        tracing::debug!("Indexed {} session(s)", entries.len());
        Ok(entries)
    }

    /// Find and parse one session by exact id, falling back to id prefix
    ///
    /// Among several prefix matches the most recently modified wins. Empty
    /// sessions are returned too.
    pub fn find(&self, id: &str) -> Result<Option<Session>> {
        if id.is_empty() {
            return Ok(None);
        }

        let files = self.session_files()?;
        if let Some(path) = files.iter().find(|path| session_id(path) == id) {
            return parse_session(path).map(Some);
        }

        let newest = files
            .iter()
            .filter(|path| session_id(path).starts_with(id))
            .filter_map(|path| {
                let modified = path.metadata().and_then(|m| m.modified()).ok()?;
                Some((modified, path))
            })
            .max_by_key(|(modified, _)| *modified);

        match newest {
            Some((_, path)) => parse_session(path).map(Some),
            None => Ok(None),
        }
    }
}

/// Order entries newest first, breaking ties by id
pub fn sort_newest_first(entries: &mut [SessionIndexEntry]) {
    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.id.cmp(&b.id)));
}

fn is_session_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonl") && session_id(path) != "sessions-index"
}

fn session_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn line(cwd: &str, text: &str) -> String {
        format!(
            r#"{{"type":"user","cwd":"{}","message":{{"role":"user","content":"{}"}}}}"#,
            cwd, text
        )
    }

    fn write_session(root: &Path, slug: &str, id: &str, body: &str) -> PathBuf {
        let dir = root.join("projects").join(slug);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.jsonl", id));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let index = SessionIndex::new(dir.path().join("absent"));
        let err = index.build(&SessionFilter::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ViewerError>(),
            Some(ViewerError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_projects_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = SessionIndex::new(dir.path());
        assert!(index.build(&SessionFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_ignores_non_session_files() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "-a", "s1", &line("/a", "hi"));
        write_session(dir.path(), "-a", "sessions-index", &line("/a", "hi"));
        fs::write(
            dir.path().join("projects/-a/sessions-index.json"),
            "{\"entries\":[]}",
        )
        .unwrap();
        fs::write(dir.path().join("history.jsonl"), line("/a", "top")).unwrap();

        let index = SessionIndex::new(dir.path());
        let files = index.session_files().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("projects/-a/s1.jsonl"));
    }

    #[test]
    fn test_build_skips_empty_sessions() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "-a", "full", &line("/a", "hi"));
        write_session(dir.path(), "-a", "empty", "");

        let entries = SessionIndex::new(dir.path())
            .build(&SessionFilter::default())
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "full");
        assert_eq!(entries[0].preview, "hi");
        assert_eq!(entries[0].message_count, 1);
    }

    #[test]
    fn test_filters_by_prefix_and_project() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "-w-api", "abc1", &line("/w/api", "one"));
        write_session(dir.path(), "-w-web", "abc2", &line("/w/web", "two"));
        write_session(dir.path(), "-w-web", "zzz9", &line("/w/web", "three"));
        let index = SessionIndex::new(dir.path());

        let by_prefix = index
            .build(&SessionFilter::default().with_session_prefix("abc"))
            .unwrap();
        assert_eq!(by_prefix.len(), 2);

        let by_project = index
            .build(&SessionFilter::default().with_project("web"))
            .unwrap();
        let mut ids: Vec<_> = by_project.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["abc2", "zzz9"]);

        let both = index
            .build(
                &SessionFilter::default()
                    .with_session_prefix("abc")
                    .with_project("/w/web"),
            )
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "abc2");
    }

    #[test]
    fn test_find_exact_prefix_and_missing() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "-a", "abcdef", &line("/a", "hi"));
        write_session(dir.path(), "-a", "empty01", "");
        let index = SessionIndex::new(dir.path());

        assert_eq!(index.find("abcdef").unwrap().unwrap().id, "abcdef");
        assert_eq!(index.find("abc").unwrap().unwrap().id, "abcdef");
        let empty = index.find("empty01").unwrap().unwrap();
        assert!(empty.messages.is_empty());
        assert!(index.find("nope").unwrap().is_none());
        assert!(index.find("").unwrap().is_none());
    }

    #[test]
    fn test_sort_breaks_ties_by_id() {
        let dir = TempDir::new().unwrap();
        let a = write_session(dir.path(), "-a", "b-session", &line("/a", "x"));
        let b = write_session(dir.path(), "-a", "a-session", &line("/a", "y"));
        let session_a = parse_session(&a).unwrap();
        let session_b = parse_session(&b).unwrap();

        let mut entries = vec![
            SessionIndexEntry::from_session(&session_a, a, 150),
            SessionIndexEntry::from_session(&session_b, b, 150),
        ];
        for entry in entries.iter_mut() {
            entry.modified = session_a.modified;
        }
        sort_newest_first(&mut entries);
        assert_eq!(entries[0].id, "a-session");
    }
}
