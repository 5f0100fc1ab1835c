//! JSONL session log parser
//!
//! A session log holds one JSON object per line. Lines are decoded lazily by
//! [`RecordReader`]; lines that fail to decode are reported as skipped and
//! never abort the parse. [`read_session`] folds the decoded records into a
//! [`Session`].

use crate::error::{Result, ViewerError};
use crate::session::types::{
    ContentBlock, Message, Role, Session, SessionMetadata, ThinkingBlock, ToolCall,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One decoded line of a session log
///
/// Only the fields the viewer uses are kept; everything else on the line is
/// ignored so newer log versions keep parsing. String fields holding any
/// other JSON type read as `None` instead of rejecting the line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Record type (`user`, `assistant`, `summary`, `file-history-snapshot`, ...)
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Result of decoding one non-blank line
#[derive(Debug)]
pub enum LineOutcome {
    /// The line decoded into a record
    Record {
        /// 1-based line number
        line: usize,
        record: LogRecord,
    },
    /// The line was skipped; the error is always [`ViewerError::MalformedRecord`]
    Skipped(ViewerError),
}

/// Lazy line-by-line decoder over a session log
pub struct RecordReader<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = LineOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let text = String::from_utf8_lossy(&self.buf);
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(decode_line(self.line, trimmed));
                }
                Err(e) => {
                    tracing::warn!("Stopped reading session log at line {}: {}", self.line, e);
                    self.done = true;
                }
            }
        }
        None
    }
}

fn decode_line(line: usize, text: &str) -> LineOutcome {
    let malformed =
        |message: String| LineOutcome::Skipped(ViewerError::MalformedRecord { line, message });

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return malformed(e.to_string()),
    };
    if !value.is_object() {
        return malformed("expected a JSON object".to_string());
    }
    match LogRecord::deserialize(value) {
        Ok(record) => LineOutcome::Record { line, record },
        Err(e) => malformed(e.to_string()),
    }
}

/// File-level facts a session is built with
#[derive(Debug, Clone)]
pub struct SessionSource {
    /// File stem of the log
    pub id: String,
    /// Project path decoded from the directory name; `cwd` wins when present
    pub fallback_project: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

/// Fold a record stream into a session
///
/// Malformed lines are logged at debug level and skipped. A reader with no
/// valid lines yields a session with zero messages.
pub fn read_session<R: BufRead>(reader: R, source: SessionSource) -> Session {
    let mut messages = Vec::new();
    let mut summary = None;
    let mut metadata = None;
    let mut skipped = 0usize;

    for outcome in RecordReader::new(reader) {
        let record = match outcome {
            LineOutcome::Record { record, .. } => record,
            LineOutcome::Skipped(err) => {
                skipped += 1;
                tracing::debug!("{}: {}", source.id, err);
                continue;
            }
        };

        if record.kind.as_deref() == Some("summary") {
            summary = record.summary.clone();
            continue;
        }

        if let Some(message) = message_from_record(&record) {
            metadata.get_or_insert_with(|| SessionMetadata {
                session_id: record.session_id.clone(),
                cwd: record.cwd.clone(),
                version: record.version.clone(),
            });
            messages.push(message);
        }
    }

    if skipped > 0 {
        tracing::debug!("{}: skipped {} malformed line(s)", source.id, skipped);
    }

    let metadata = metadata.unwrap_or_default();
    let project_path = metadata
        .cwd
        .clone()
        .filter(|cwd| !cwd.is_empty())
        .unwrap_or(source.fallback_project);

    Session {
        id: source.id,
        project_path,
        messages,
        size_bytes: source.size_bytes,
        modified: source.modified,
        summary,
        metadata,
    }
}

/// Parse a session log from disk
///
/// # Errors
///
/// Returns [`ViewerError::NotFound`] when the file is missing and
/// [`ViewerError::AccessDenied`] when it cannot be opened for reading.
pub fn parse_session(path: &Path) -> Result<Session> {
    let file = File::open(path).map_err(|e| ViewerError::from_io(e, path))?;
    let meta = file.metadata().map_err(|e| ViewerError::from_io(e, path))?;

    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let fallback_project = path
        .parent()
        .and_then(Path::file_name)
        .map(|slug| decode_project_slug(&slug.to_string_lossy()))
        .unwrap_or_default();
    let modified = meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let source = SessionSource {
        id,
        fallback_project,
        size_bytes: meta.len(),
        modified,
    };
    Ok(read_session(BufReader::new(file), source))
}

/// Turn a project directory name back into a path
///
/// The upstream tool encodes `/home/u/app` as `-home-u-app`; the encoding is
/// lossy for paths that contain dashes.
pub fn decode_project_slug(slug: &str) -> String {
    slug.replace('-', "/")
}

/// Map a record to a message, or `None` when it is not a chat message
fn message_from_record(record: &LogRecord) -> Option<Message> {
    let body = record.message.as_ref()?.as_object()?;
    let role = body
        .get("role")
        .and_then(Value::as_str)
        .or(record.kind.as_deref())?;

    let role = match role {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        _ => return None,
    };

    let blocks = content_blocks(body.get("content").unwrap_or(&Value::Null));
    let role = if role == Role::User
        && !blocks.is_empty()
        && blocks
            .iter()
            .all(|b| matches!(b, ContentBlock::ToolResult { .. }))
    {
        Role::ToolResult
    } else {
        role
    };

    Some(Message {
        role,
        blocks,
        timestamp: record.timestamp.as_ref().and_then(parse_timestamp),
        uuid: record.uuid.clone(),
    })
}

/// Decode message content: a bare string or an array of typed blocks
fn content_blocks(content: &Value) -> Vec<ContentBlock> {
    match content {
        Value::String(text) => vec![ContentBlock::Text { text: text.clone() }],
        Value::Array(items) => items.iter().filter_map(content_block).collect(),
        _ => Vec::new(),
    }
}

fn content_block(item: &Value) -> Option<ContentBlock> {
    let obj = match item {
        Value::String(text) => return Some(ContentBlock::Text { text: text.clone() }),
        Value::Object(obj) => obj,
        _ => return None,
    };
    let str_field = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

    match obj.get("type").and_then(Value::as_str)? {
        "text" => Some(ContentBlock::Text {
            text: str_field("text").unwrap_or_default(),
        }),
        "thinking" => Some(ContentBlock::Thinking(ThinkingBlock {
            text: str_field("thinking").unwrap_or_default(),
        })),
        "tool_use" => Some(ContentBlock::ToolUse(ToolCall {
            id: str_field("id"),
            name: str_field("name").unwrap_or_else(|| "Unknown".to_string()),
            input: obj
                .get("input")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_else(Map::new),
        })),
        "tool_result" => Some(ContentBlock::ToolResult {
            tool_use_id: str_field("tool_use_id"),
            content: flatten_tool_result(obj.get("content").unwrap_or(&Value::Null)),
            is_error: obj
                .get("is_error")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }),
        // unknown block types are ignored
        _ => None,
    }
}

/// Tool results are a string or a list of text/image parts
fn flatten_tool_result(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(|part| match part {
                Value::String(text) => text.clone(),
                Value::Object(obj) => match obj.get("type").and_then(Value::as_str) {
                    Some("text") => obj
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    Some(kind) => format!("[{}]", kind),
                    None => part.to_string(),
                },
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// Parse an RFC 3339 string, a naive ISO string (taken as UTC), or epoch milliseconds
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }),
        _ => None,
    }
}
