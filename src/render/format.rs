//! Text formatting helpers for rendered pages

use chrono::{DateTime, Local, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Escape text for use in HTML content and attribute values
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn fenced_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("valid fenced block regex"))
}

fn inline_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("valid inline code regex"))
}

/// Render message text as HTML
///
/// Text is escaped first, so nothing inside a message is ever interpreted
/// as markup. Fenced blocks become `<pre><code>`, inline backticks become
/// `<code>`, and newlines outside fenced blocks become `<br>`. CRLF line
/// endings are read as plain newlines.
pub fn format_text(text: &str) -> String {
    let escaped = html_escape(&text.replace("\r\n", "\n"));
    let mut out = String::with_capacity(escaped.len());
    let mut last = 0;

    for caps in fenced_block_re().captures_iter(&escaped) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        out.push_str(&format_prose(&escaped[last..whole.start()]));
        let lang = caps.get(1).map_or("", |m| m.as_str());
        if lang.is_empty() {
            out.push_str("<pre><code>");
        } else {
            out.push_str(&format!("<pre><code class=\"language-{}\">", lang));
        }
        out.push_str(body.as_str());
        out.push_str("</code></pre>");
        last = whole.end();
    }
    out.push_str(&format_prose(&escaped[last..]));
    out
}

fn format_prose(escaped: &str) -> String {
    inline_code_re()
        .replace_all(escaped, "<code>$1</code>")
        .replace('\n', "<br>")
}

/// Cut to `max_chars` characters and append a truncation marker when cut
pub fn truncate_marked(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}... (truncated)", &text[..idx]),
        None => text.to_string(),
    }
}

/// Message timestamp as shown in message headers (UTC)
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// File modification time in local time, minute precision
pub fn format_local_minutes(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Coarse age of `then` relative to `now` ("5m ago", "3d ago", ...)
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3_600)
    } else if seconds < 604_800 {
        format!("{}d ago", seconds / 86_400)
    } else if seconds < 2_592_000 {
        format!("{}w ago", seconds / 604_800)
    } else {
        let months = seconds / 2_592_000;
        if months < 12 {
            format!("{}mo ago", months)
        } else {
            format!("{}y ago", months / 12)
        }
    }
}

/// Keep only the last `max_parts` path components, prefixed with `.../`
pub fn truncate_path(path: &str, max_parts: usize) -> String {
    let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
    if parts.len() <= max_parts {
        return path.to_string();
    }
    format!(".../{}", parts[parts.len() - max_parts..].join("/"))
}

/// Byte size as kilobytes with one decimal
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes as f64 / 1024.0)
}
