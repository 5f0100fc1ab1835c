//! Inline stylesheet, client script, and the page skeleton shared by every
//! rendered document. Pages carry no external assets.

/// Dark theme stylesheet
pub const STYLE: &str = r#"
:root {
    --bg-primary: #1a1a2e;
    --bg-secondary: #16213e;
    --bg-user: #0f3460;
    --bg-assistant: #1a1a2e;
    --bg-tool-result: #121a2c;
    --text-primary: #e8e8e8;
    --text-secondary: #a0a0a0;
    --accent: #e94560;
    --accent-light: #ff6b6b;
    --border: #2a2a4a;
    --code-bg: #0d0d1a;
    --thinking-bg: #1e1e3f;
    --mono: 'SF Mono', Monaco, 'Courier New', monospace;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'SF Pro Text', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.6;
}
.container { max-width: 900px; margin: 0 auto; padding: 20px; }
header {
    background: var(--bg-secondary);
    padding: 20px;
    border-bottom: 2px solid var(--accent);
    margin-bottom: 30px;
    position: sticky;
    top: 0;
    z-index: 100;
}
header h1 { font-size: 1.5rem; color: var(--accent-light); margin-bottom: 10px; }
.meta { font-size: 0.85rem; color: var(--text-secondary); }
.meta span { margin-right: 20px; }
.message { margin-bottom: 20px; border-radius: 12px; overflow: hidden; }
.message-header {
    padding: 10px 15px;
    font-weight: 600;
    font-size: 0.85rem;
    display: flex;
    justify-content: space-between;
    align-items: center;
}
.message-content { padding: 15px 20px; font-size: 0.95rem; }
.user { background: var(--bg-user); border-left: 4px solid #4fc3f7; }
.user .message-header { background: rgba(79, 195, 247, 0.1); color: #4fc3f7; }
.assistant { background: var(--bg-assistant); border-left: 4px solid var(--accent); }
.assistant .message-header { background: rgba(233, 69, 96, 0.1); color: var(--accent-light); }
.tool-result { background: var(--bg-tool-result); border-left: 4px solid #81c784; }
.tool-result .message-header { background: rgba(76, 175, 80, 0.1); color: #81c784; }
.thinking { background: var(--thinking-bg); border-left: 4px solid #9c27b0; margin: 10px 0; font-size: 0.9rem; }
.thinking .message-header { background: rgba(156, 39, 176, 0.1); color: #ce93d8; cursor: pointer; }
.thinking .message-content { display: none; color: var(--text-secondary); font-style: italic; white-space: pre-wrap; }
.thinking.expanded .message-content { display: block; }
.tool-call { background: var(--code-bg); border: 1px solid var(--border); border-radius: 8px; margin: 10px 0; overflow: hidden; }
.tool-call-header { background: rgba(76, 175, 80, 0.1); padding: 8px 12px; font-size: 0.8rem; color: #81c784; font-family: var(--mono); }
.tool-error .tool-call-header { background: rgba(233, 69, 96, 0.15); color: var(--accent-light); }
.tool-call-content {
    padding: 10px 12px;
    font-family: var(--mono);
    font-size: 0.8rem;
    max-height: 300px;
    overflow-y: auto;
    white-space: pre-wrap;
    word-break: break-word;
}
pre {
    background: var(--code-bg);
    padding: 12px;
    border-radius: 6px;
    overflow-x: auto;
    font-family: var(--mono);
    font-size: 0.85rem;
    margin: 10px 0;
    white-space: pre;
}
code { font-family: var(--mono); background: var(--code-bg); padding: 2px 6px; border-radius: 4px; font-size: 0.85rem; }
pre code { padding: 0; }
.timestamp { font-size: 0.75rem; color: var(--text-secondary); }
.session-list { list-style: none; }
.session-list li {
    background: var(--bg-secondary);
    margin-bottom: 15px;
    padding: 18px 20px;
    border-radius: 8px;
    border-left: 4px solid var(--accent);
    transition: transform 0.2s, box-shadow 0.2s;
}
.session-list li:hover { transform: translateX(5px); box-shadow: 0 4px 12px rgba(0,0,0,0.3); }
.session-list li.hidden { display: none; }
.session-list a {
    color: var(--accent-light);
    text-decoration: none;
    font-weight: 600;
    font-size: 1.1rem;
    display: block;
    margin-bottom: 10px;
}
.session-list a:hover { text-decoration: underline; }
.session-meta { display: flex; gap: 16px; align-items: center; font-size: 0.8rem; color: var(--text-secondary); margin-bottom: 6px; }
.session-time { color: #81c784; font-weight: 500; }
.session-path { font-family: var(--mono); font-size: 0.75rem; }
.preview { margin-top: 10px; font-style: italic; color: #888; font-size: 0.85rem; line-height: 1.4; }
.tooltip { position: relative; cursor: help; }
.tooltip:hover::after {
    content: attr(data-tooltip);
    position: absolute;
    bottom: 100%;
    left: 0;
    background: var(--code-bg);
    color: var(--text-primary);
    padding: 6px 10px;
    border-radius: 4px;
    white-space: nowrap;
    font-size: 0.75rem;
    z-index: 1000;
    margin-bottom: 5px;
    border: 1px solid var(--border);
}
.live-badge { background: #e94560; color: white; padding: 2px 8px; border-radius: 12px; font-size: 0.75rem; animation: pulse 2s infinite; }
@keyframes pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.5; } }
.back-link { color: #4fc3f7; text-decoration: none; display: inline-block; margin-bottom: 20px; }
.back-link:hover { text-decoration: underline; }
.info-box {
    margin-bottom: 20px;
    padding: 12px 16px;
    background: rgba(76, 175, 80, 0.1);
    border-radius: 8px;
    color: #81c784;
    border: 1px solid rgba(76, 175, 80, 0.3);
}
.search-container { margin-bottom: 20px; display: flex; flex-wrap: wrap; gap: 10px; }
.search-box, .project-filter {
    padding: 12px 16px;
    background: var(--bg-secondary);
    border: 2px solid var(--border);
    border-radius: 8px;
    color: var(--text-primary);
    font-size: 0.95rem;
    transition: border-color 0.3s;
}
.search-box { flex: 1 1 60%; }
.project-filter { flex: 1 1 30%; }
.search-box:focus, .project-filter:focus { outline: none; border-color: var(--accent); }
.search-box::placeholder { color: var(--text-secondary); }
.search-stats { flex-basis: 100%; font-size: 0.85rem; color: var(--text-secondary); }
.text-content { white-space: pre-wrap; word-break: break-word; }
@media (max-width: 768px) {
    .container { padding: 10px; }
    header { padding: 15px; }
    .meta span { display: block; margin-bottom: 5px; }
}
"#;

/// Thinking toggles and index filtering
pub const SCRIPT: &str = r#"
document.querySelectorAll('.thinking .message-header').forEach(header => {
    header.addEventListener('click', () => header.parentElement.classList.toggle('expanded'));
});

const searchBox = document.getElementById('searchBox');
const projectFilter = document.getElementById('projectFilter');
const sessionList = document.getElementById('sessionList');
const searchStats = document.getElementById('searchStats');
const totalSessions = document.getElementById('totalSessions');

if (sessionList) {
    const items = Array.from(sessionList.querySelectorAll('li'));
    const total = items.length;

    const applyFilters = () => {
        const term = searchBox ? searchBox.value.toLowerCase().trim() : '';
        const project = projectFilter ? projectFilter.value : '';
        let visible = 0;
        items.forEach(item => {
            const haystack = [item.dataset.title, item.dataset.project, item.dataset.preview].join(' ');
            const show = (term === '' || haystack.includes(term))
                && (project === '' || item.dataset.projectPath === project);
            item.classList.toggle('hidden', !show);
            if (show) visible++;
        });
        const filtered = term !== '' || project !== '';
        if (searchStats) searchStats.textContent = filtered ? `Showing ${visible} of ${total} sessions` : '';
        if (totalSessions) totalSessions.textContent = filtered ? `${visible} of ${total} sessions` : `${total} sessions found`;
    };

    if (searchBox) searchBox.addEventListener('input', applyFilters);
    if (projectFilter) projectFilter.addEventListener('change', applyFilters);
}
"#;

/// Assemble a complete HTML document
///
/// `title` and `meta` are inserted as-is; callers escape them. `head_extra`
/// carries optional tags such as refresh metadata.
pub fn document(title: &str, meta: &str, content: &str, head_extra: &str) -> String {
    let mut html = String::with_capacity(STYLE.len() + SCRIPT.len() + content.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(head_extra);
    html.push_str("<title>Claude Code Chat - ");
    html.push_str(title);
    html.push_str("</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<header>\n<div class=\"container\">\n<h1>");
    html.push_str(title);
    html.push_str("</h1>\n<div class=\"meta\">");
    html.push_str(meta);
    html.push_str("</div>\n</div>\n</header>\n<div class=\"container\">\n");
    html.push_str(content);
    html.push_str("\n</div>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}
