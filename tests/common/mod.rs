use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

/// A throwaway Claude Code data directory
#[allow(dead_code)]
pub struct ClaudeDir {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl ClaudeDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        fs::create_dir_all(dir.path().join("projects")).expect("failed to create projects dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<slug>/<id>.jsonl` from the given records
    pub fn session(&self, slug: &str, id: &str, lines: &[String]) -> PathBuf {
        let project = self.path().join("projects").join(slug);
        fs::create_dir_all(&project).expect("failed to create project dir");
        let path = project.join(format!("{}.jsonl", id));
        fs::write(&path, lines.join("\n")).expect("failed to write session");
        path
    }

    /// Write a session of `count` alternating user/assistant messages
    pub fn conversation(&self, slug: &str, id: &str, cwd: &str, count: usize) -> PathBuf {
        let lines: Vec<String> = (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    user_line(cwd, &format!("question {}", i))
                } else {
                    assistant_line(&format!("answer {}", i))
                }
            })
            .collect();
        self.session(slug, id, &lines)
    }
}

#[allow(dead_code)]
pub fn user_line(cwd: &str, text: &str) -> String {
    serde_json::json!({
        "type": "user",
        "sessionId": "fixture",
        "cwd": cwd,
        "timestamp": "2024-01-21T08:00:00.000Z",
        "message": {"role": "user", "content": text}
    })
    .to_string()
}

#[allow(dead_code)]
pub fn assistant_line(text: &str) -> String {
    serde_json::json!({
        "type": "assistant",
        "timestamp": "2024-01-21T08:00:05.000Z",
        "message": {"role": "assistant", "content": [{"type": "text", "text": text}]}
    })
    .to_string()
}

/// Pin a file's modification time
#[allow(dead_code)]
pub fn set_mtime(path: &Path, when: DateTime<Utc>) {
    let file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .expect("failed to open for mtime");
    file.set_modified(SystemTime::from(when))
        .expect("failed to set mtime");
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
