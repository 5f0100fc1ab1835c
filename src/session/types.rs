use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// A prompt typed by the user
    User,
    /// A reply from the assistant
    Assistant,
    /// A user-side record carrying only tool results
    ToolResult,
}

impl Role {
    /// CSS class and wire name for the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::ToolResult => "tool-result",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured record of an invoked tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier that tool results refer back to
    pub id: Option<String>,
    /// Tool name, e.g. `Bash` or `Read`
    pub name: String,
    /// Free-form input parameters
    pub input: Map<String, Value>,
}

impl ToolCall {
    /// String value of an input parameter, if present
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(Value::as_str)
    }
}

/// A reasoning trace attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingBlock {
    pub text: String,
}

/// One part of a message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Thinking(ThinkingBlock),
    ToolUse(ToolCall),
    ToolResult {
        tool_use_id: Option<String>,
        content: String,
        is_error: bool,
    },
}

/// One user, assistant, or tool-result entry of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub blocks: Vec<ContentBlock>,
    pub timestamp: Option<DateTime<Utc>>,
    pub uuid: Option<String>,
}

impl Message {
    /// Plain text of the message: text blocks joined by newlines
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tool calls made in this message
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.blocks.iter().filter_map(|block| match block {
            ContentBlock::ToolUse(call) => Some(call),
            _ => None,
        })
    }
}

/// Fields captured from the first message record of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Session id as recorded inside the log
    pub session_id: Option<String>,
    /// Working directory the session ran in
    pub cwd: Option<String>,
    /// Version of the tool that wrote the log
    pub version: Option<String>,
}

/// A fully parsed conversation
///
/// Built fresh for every render and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// File stem of the session log
    pub id: String,
    /// Project the session belongs to
    pub project_path: String,
    /// Messages in file order
    pub messages: Vec<Message>,
    /// Size of the log file in bytes
    pub size_bytes: u64,
    /// Last modification time of the log file
    pub modified: DateTime<Utc>,
    /// Summary line written by the upstream tool, if any
    pub summary: Option<String>,
    pub metadata: SessionMetadata,
}

impl Session {
    /// Display title: the summary, or a short form of the id
    pub fn title(&self) -> String {
        match &self.summary {
            Some(summary) if !summary.is_empty() => summary.clone(),
            _ => format!("Session {}", short_id(&self.id, 8)),
        }
    }

    /// Text of the first user message, cut to `max_chars`
    pub fn preview(&self, max_chars: usize) -> Option<String> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| truncate_with_ellipsis(&m.text(), max_chars))
    }

    /// Timestamp of the first message that has one
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.messages.iter().find_map(|m| m.timestamp)
    }
}

/// Lightweight projection of a [`Session`] for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionIndexEntry {
    pub id: String,
    pub project_path: String,
    /// Location of the JSONL log
    pub file_path: PathBuf,
    pub message_count: usize,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
    pub preview: String,
    pub summary: Option<String>,
}

impl SessionIndexEntry {
    /// Project a parsed session into an index entry
    pub fn from_session(session: &Session, file_path: PathBuf, preview_max_chars: usize) -> Self {
        Self {
            id: session.id.clone(),
            project_path: session.project_path.clone(),
            file_path,
            message_count: session.messages.len(),
            size_bytes: session.size_bytes,
            modified: session.modified,
            preview: session.preview(preview_max_chars).unwrap_or_default(),
            summary: session.summary.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Display title: the summary, or a short form of the id
    pub fn title(&self) -> String {
        match &self.summary {
            Some(summary) => summary.clone(),
            None => format!("Session {}", short_id(&self.id, 12)),
        }
    }
}

/// First `len` characters of an id
pub fn short_id(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
