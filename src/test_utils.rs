//! Test utilities for chatview
//!
//! This module provides helpers for building throwaway Claude Code data
//! directories and for asserting on errors.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write a session log at `<root>/projects/<slug>/<id>.jsonl`
///
/// # Arguments
///
/// * `root` - Data directory standing in for `~/.claude`
/// * `slug` - Project directory name
/// * `id` - Session id (file stem)
/// * `lines` - JSONL records, joined with newlines
///
/// # Panics
///
/// Panics if directory creation or writing fails
pub fn write_session(root: &Path, slug: &str, id: &str, lines: &[String]) -> PathBuf {
    let dir = root.join("projects").join(slug);
    std::fs::create_dir_all(&dir).expect("Failed to create project directory");
    let path = dir.join(format!("{}.jsonl", id));
    std::fs::write(&path, lines.join("\n")).expect("Failed to write session file");
    path
}

/// A user prompt record with a string body
pub fn user_line(cwd: &str, text: &str) -> String {
    serde_json::json!({
        "type": "user",
        "cwd": cwd,
        "timestamp": "2024-01-21T09:14:00.000Z",
        "message": {"role": "user", "content": text}
    })
    .to_string()
}

/// An assistant reply record with one text block
pub fn assistant_line(text: &str) -> String {
    serde_json::json!({
        "type": "assistant",
        "timestamp": "2024-01-21T09:15:00.000Z",
        "message": {"role": "assistant", "content": [{"type": "text", "text": text}]}
    })
    .to_string()
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}', got Ok", expected),
        Err(e) => {
            let message = e.to_string();
            assert!(
                message.contains(expected),
                "Expected error containing '{}', got '{}'",
                expected,
                message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_session_layout() {
        let dir = temp_dir();
        let path = write_session(dir.path(), "-w", "abc", &[user_line("/w", "hi")]);
        assert!(path.ends_with("projects/-w/abc.jsonl"));
        assert!(path.exists());
    }

    #[test]
    fn test_assert_error_contains() {
        let result: Result<()> = Err(anyhow::anyhow!("missing session"));
        assert_error_contains(result, "missing");
    }

    #[test]
    #[should_panic(expected = "got Ok")]
    fn test_assert_error_contains_panics_on_ok() {
        assert_error_contains(Ok(()), "anything");
    }
}
