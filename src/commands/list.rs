use crate::config::Config;
use crate::error::Result;
use crate::render::format::{format_local_minutes, format_size_kb};
use crate::session::types::{short_id, truncate_with_ellipsis};
use crate::session::{SessionFilter, SessionIndex, SessionIndexEntry};
use colored::Colorize;
use prettytable::{format, row, Table};

const PREVIEW_CHARS: usize = 60;

/// Print the selected sessions as a table
///
/// `config.limit` applies when the filter carries no limit of its own. The
/// closing line counts every matching session, not only the rows shown.
pub fn list_sessions(config: &Config, filter: &SessionFilter) -> Result<()> {
    let limit = filter.limit.unwrap_or(config.limit);
    let mut unlimited = filter.clone();
    unlimited.limit = None;

    let mut entries = SessionIndex::new(&config.claude_dir)
        .with_preview_chars(config.render.preview_max_chars)
        .build(&unlimited)?;
    let total = entries.len();
    entries.truncate(limit);

    if entries.is_empty() {
        println!("{}", "No sessions found.".yellow());
        return Ok(());
    }

    println!("\nClaude Code sessions:");
    print!("{}", render_session_table(&entries));
    println!();
    println!("{}", total_line(entries.len(), total));
    println!("Use {} to render one session.", "chatview -s <ID>".cyan());
    Ok(())
}

/// Count line under the table
pub fn total_line(shown: usize, total: usize) -> String {
    if shown < total {
        format!("Showing {} of {} sessions", shown, total)
    } else {
        format!("Total: {} sessions", total)
    }
}

/// Table text for `entries`, one row per session in the given order
pub fn render_session_table(entries: &[SessionIndexEntry]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(row![
        "#".bold(),
        "ID".bold(),
        "Modified".bold(),
        "Project".bold(),
        "Messages".bold(),
        "Size".bold(),
        "Summary / Preview".bold()
    ]);

    for (i, entry) in entries.iter().enumerate() {
        let description = entry
            .summary
            .as_deref()
            .unwrap_or(entry.preview.as_str())
            .replace('\n', " ");

        table.add_row(row![
            i + 1,
            short_id(&entry.id, 8).cyan(),
            format_local_minutes(entry.modified),
            entry.project_path,
            entry.message_count,
            format_size_kb(entry.size_bytes),
            truncate_with_ellipsis(&description, PREVIEW_CHARS)
        ]);
    }

    table.to_string()
}
