//! HTML rendering
//!
//! Turns parsed sessions and index entries into self-contained HTML
//! documents. Rendering never touches the filesystem or the network.

pub mod format;
pub mod html;
pub mod theme;

pub use format::{format_relative_time, format_text, html_escape};
pub use html::{
    refresh_meta, render_index, render_not_found, render_session, render_status_page,
    tool_call_summary, PageMode, PageOptions,
};
