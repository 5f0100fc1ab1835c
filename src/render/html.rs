//! Session, index, and status pages
//!
//! Every function here is pure: the same inputs always produce the same
//! bytes. The only clock-dependent output, relative times on the index page,
//! takes `now` as an argument.

use crate::config::RenderConfig;
use crate::render::format::{
    format_local_minutes, format_relative_time, format_size_kb, format_text, format_timestamp,
    html_escape, truncate_marked, truncate_path,
};
use crate::render::theme::document;
use crate::session::types::{
    short_id, ContentBlock, Message, Role, Session, SessionIndexEntry, ToolCall,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// How a page is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Written to disk; links are relative file names
    Static,
    /// Served by the live server and reloaded by the browser
    Live {
        /// Reload interval in seconds
        refresh_seconds: u32,
    },
}

/// Rendering inputs shared by all page kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub mode: PageMode,
    pub limits: RenderConfig,
}

impl PageOptions {
    /// Options for files written by the static generator
    pub fn static_page(limits: RenderConfig) -> Self {
        Self {
            mode: PageMode::Static,
            limits,
        }
    }

    /// Options for a live page reloading every `refresh_seconds`
    pub fn live(refresh_seconds: u32, limits: RenderConfig) -> Self {
        Self {
            mode: PageMode::Live { refresh_seconds },
            limits,
        }
    }

    fn is_live(&self) -> bool {
        matches!(self.mode, PageMode::Live { .. })
    }

    fn index_href(&self) -> &'static str {
        match self.mode {
            PageMode::Static => "index.html",
            PageMode::Live { .. } => "/",
        }
    }

    fn session_href(&self, id: &str) -> String {
        match self.mode {
            PageMode::Static => format!("{}.html", html_escape(id)),
            PageMode::Live { .. } => format!("/session/{}", html_escape(id)),
        }
    }

    fn head_extra(&self) -> String {
        match self.mode {
            PageMode::Static => String::new(),
            PageMode::Live { refresh_seconds } => refresh_meta(refresh_seconds),
        }
    }

    fn live_notice(&self) -> String {
        match self.mode {
            PageMode::Static => String::new(),
            PageMode::Live { refresh_seconds } => format!(
                "<div class=\"info-box\"><span class=\"live-badge\">LIVE</span> Auto-refreshes every {} seconds</div>\n",
                refresh_seconds
            ),
        }
    }
}

/// Auto-refresh metadata embedded in live pages
pub fn refresh_meta(seconds: u32) -> String {
    format!("<meta http-equiv=\"refresh\" content=\"{}\">\n", seconds)
}

/// Render one session as a complete HTML document
pub fn render_session(session: &Session, options: &PageOptions) -> String {
    let mut content = String::new();
    content.push_str(&format!(
        "<a href=\"{}\" class=\"back-link\">&larr; Back to all sessions</a>\n",
        options.index_href()
    ));
    content.push_str(&options.live_notice());

    for (i, message) in session.messages.iter().enumerate() {
        content.push_str(&render_message(i, message, &options.limits));
    }

    let mut meta = Vec::new();
    if let Some(cwd) = session.metadata.cwd.as_deref().filter(|c| !c.is_empty()) {
        meta.push(format!("<span>📁 {}</span>", html_escape(cwd)));
    }
    if let Some(id) = session.metadata.session_id.as_deref().filter(|s| !s.is_empty()) {
        meta.push(format!("<span>🔑 {}...</span>", html_escape(short_id(id, 8))));
    }
    if let Some(started) = session.started_at() {
        meta.push(format!("<span>📅 {}</span>", format_timestamp(Some(started))));
    }
    meta.push(format!("<span>💬 {} messages</span>", session.messages.len()));
    if options.is_live() {
        meta.push("<span class=\"live-badge\">LIVE</span>".to_string());
    }

    document(
        &html_escape(&session.title()),
        &meta.join(" "),
        &content,
        &options.head_extra(),
    )
}

fn render_message(index: usize, message: &Message, limits: &RenderConfig) -> String {
    let label = match message.role {
        Role::User => "👤 You",
        Role::Assistant => "🤖 Claude",
        Role::ToolResult => "📤 Tool Result",
    };

    let body = if message.blocks.is_empty() {
        "<div class=\"text-content\">(empty message)</div>".to_string()
    } else {
        message
            .blocks
            .iter()
            .map(|block| render_block(block, limits))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "<div class=\"message {role}\" id=\"msg-{index}\">\n\
         <div class=\"message-header\"><span>{label}</span><span class=\"timestamp\">{ts}</span></div>\n\
         <div class=\"message-content\">\n{body}\n</div>\n</div>\n",
        role = message.role.as_str(),
        index = index,
        label = label,
        ts = format_timestamp(message.timestamp),
        body = body,
    )
}

fn render_block(block: &ContentBlock, limits: &RenderConfig) -> String {
    match block {
        ContentBlock::Text { text } => {
            format!("<div class=\"text-content\">{}</div>", format_text(text))
        }
        ContentBlock::Thinking(thinking) => format!(
            "<div class=\"message thinking\">\
             <div class=\"message-header\"><span>💭 Thinking (click to expand)</span></div>\
             <div class=\"message-content\">{}</div></div>",
            html_escape(&truncate_marked(&thinking.text, limits.thinking_max_chars))
        ),
        ContentBlock::ToolUse(call) => format!(
            "<div class=\"tool-call\">\
             <div class=\"tool-call-header\">🔧 {}</div>\
             <div class=\"tool-call-content\">{}</div></div>",
            html_escape(&call.name),
            html_escape(&tool_call_summary(call, limits.tool_input_max_chars))
        ),
        ContentBlock::ToolResult {
            content, is_error, ..
        } => {
            let (class, label) = if *is_error {
                ("tool-call tool-error", "⚠️ Tool Error")
            } else {
                ("tool-call", "📤 Tool Result")
            };
            format!(
                "<div class=\"{}\">\
                 <div class=\"tool-call-header\">{}</div>\
                 <div class=\"tool-call-content\">{}</div></div>",
                class,
                label,
                html_escape(&truncate_marked(content, limits.tool_result_max_chars))
            )
        }
    }
}

/// Human-oriented summary of a tool call's parameters
///
/// Well-known tools get a short form; anything else is shown as
/// pretty-printed JSON cut to `max_chars`.
pub fn tool_call_summary(call: &ToolCall, max_chars: usize) -> String {
    let field = |key: &str| call.input_str(key).unwrap_or_default();

    match call.name.as_str() {
        "Bash" => {
            let command = format!("$ {}", field("command"));
            match call.input_str("description").filter(|d| !d.is_empty()) {
                Some(desc) => format!("# {}\n{}", desc, command),
                None => command,
            }
        }
        "Read" => format!("Reading: {}", field("file_path")),
        "Write" => format!("Writing to: {}", field("file_path")),
        "Edit" => format!("Editing: {}", field("file_path")),
        "Grep" | "Glob" => format!(
            "Pattern: {}\nPath: {}",
            field("pattern"),
            call.input_str("path").unwrap_or(".")
        ),
        "Task" => format!(
            "Agent: {}\nTask: {}",
            call.input_str("subagent_type").unwrap_or("unknown"),
            field("description")
        ),
        _ => {
            let json = serde_json::to_string_pretty(&call.input).unwrap_or_default();
            json.chars().take(max_chars).collect()
        }
    }
}

/// Render the session listing
///
/// `now` anchors the relative times so the output is reproducible.
pub fn render_index(
    entries: &[SessionIndexEntry],
    options: &PageOptions,
    now: DateTime<Utc>,
) -> String {
    let items: String = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| render_index_item(i, entry, options, now))
        .collect();

    let projects: BTreeSet<&str> = entries.iter().map(|e| e.project_path.as_str()).collect();
    let project_options: String = projects
        .iter()
        .map(|p| {
            let escaped = html_escape(p);
            format!("<option value=\"{}\">{}</option>", escaped, escaped)
        })
        .collect();

    let content = format!(
        "{live}<div class=\"search-container\">\n\
         <input type=\"text\" id=\"searchBox\" class=\"search-box\" placeholder=\"🔍 Search sessions by title, project, or content...\">\n\
         <select id=\"projectFilter\" class=\"project-filter\"><option value=\"\">All projects</option>{projects}</select>\n\
         <div class=\"search-stats\" id=\"searchStats\"></div>\n\
         </div>\n<ul class=\"session-list\" id=\"sessionList\">\n{items}</ul>",
        live = options.live_notice(),
        projects = project_options,
        items = items,
    );

    let mut meta = format!(
        "<span id=\"totalSessions\">{} sessions found</span>",
        entries.len()
    );
    if options.is_live() {
        meta.push_str(" <span class=\"live-badge\">LIVE</span>");
    }

    document(
        "Claude Code Chat History",
        &meta,
        &content,
        &options.head_extra(),
    )
}

fn render_index_item(
    index: usize,
    entry: &SessionIndexEntry,
    options: &PageOptions,
    now: DateTime<Utc>,
) -> String {
    let title = entry.title();
    format!(
        "<li data-index=\"{index}\" data-title=\"{title_lc}\" data-project=\"{project_lc}\" \
         data-project-path=\"{project}\" data-preview=\"{preview_lc}\">\n\
         <a href=\"{href}\">{title}</a>\n\
         <div class=\"session-meta\">\
         <span class=\"session-time\" title=\"{absolute}\">🕐 {relative}</span>\
         <span class=\"session-path tooltip\" data-tooltip=\"{project}\">📁 {short_project}</span>\
         <span>💬 {count}</span><span>📦 {size}</span></div>\n\
         <div class=\"preview\">{preview}</div>\n</li>\n",
        index = index,
        title_lc = html_escape(&title.to_lowercase()),
        project_lc = html_escape(&entry.project_path.to_lowercase()),
        project = html_escape(&entry.project_path),
        preview_lc = html_escape(&entry.preview.to_lowercase()),
        href = options.session_href(&entry.id),
        title = html_escape(&title),
        absolute = html_escape(&format_local_minutes(entry.modified)),
        relative = format_relative_time(entry.modified, now),
        short_project = html_escape(&truncate_path(&entry.project_path, 2)),
        count = entry.message_count,
        size = format_size_kb(entry.size_bytes),
        preview = html_escape(&entry.preview),
    )
}

/// Page shown for a session id that does not exist
pub fn render_not_found(id: &str, options: &PageOptions) -> String {
    render_status_page(
        "Session not found",
        &format!(
            "No session matches <code>{}</code>. It may have been deleted or moved.",
            html_escape(id)
        ),
        options,
    )
}

/// Generic status page with a back link; `message_html` is inserted as-is
pub fn render_status_page(title: &str, message_html: &str, options: &PageOptions) -> String {
    let content = format!(
        "<a href=\"{}\" class=\"back-link\">&larr; Back to all sessions</a>\n\
         <div class=\"info-box\">{}</div>",
        options.index_href(),
        message_html
    );
    document(&html_escape(title), "", &content, "")
}
