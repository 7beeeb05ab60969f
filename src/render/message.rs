// src/render/message.rs
// =============================================================================
// Builds the HTML that Telegram displays.
//
// Two pieces:
// - format_info_block(): the metadata header (name, stars, language, ...)
// - compose_message(): header + file tree + separator + README, capped at
//   the message limit
//
// Telegram's HTML parse mode supports <b>, <a href>, <code> and the
// entities &lt; &gt; &amp; &quot;. Any text coming from GitHub is escaped
// before it is placed between tags.
// =============================================================================

use crate::config::MESSAGE_LIMIT;
use crate::render::{truncate_markup, truncate_text};

const SEPARATOR: &str = "<b>───────────────────────</b>";

// Repository metadata after defaults have been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub repo: String,
    pub description: String,
    pub stars: u64,
    pub language: String,
    pub forks: u64,
    pub open_issues: u64,
    /// ISO-8601 timestamp as GitHub sends it, e.g. "2024-05-01T12:00:00Z"
    pub updated_at: Option<String>,
}

// Escapes the characters that are significant in Telegram HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn format_info_block(info: &RepoInfo) -> String {
    let owner = escape_html(&info.owner);
    let repo = escape_html(&info.repo);

    let mut block = format!(
        "<b>📦 Repository: <a href='https://github.com/{owner}'>{owner}</a>/<a href='https://github.com/{owner}/{repo}'>{repo}</a></b>\n",
        owner = owner,
        repo = repo,
    );
    block.push_str(&format!("⭐ <b>Stars:</b> <code>{}</code>\n", info.stars));
    block.push_str(&format!(
        "💻 <b>Language:</b> <code>{}</code>\n",
        escape_html(&info.language)
    ));
    block.push_str(&format!("🍴 <b>Forks:</b> <code>{}</code>\n", info.forks));
    block.push_str(&format!("🚨 <b>Issues:</b> <code>{}</code>\n", info.open_issues));

    if let Some(date) = info.updated_at.as_deref().and_then(date_part) {
        block.push_str(&format!("🕒 <b>Updated:</b> <code>{}</code>\n", escape_html(date)));
    }

    block.push_str(&format!(
        "📝 <b>Description:</b> <code>{}</code>\n",
        escape_html(&info.description)
    ));
    block
}

// "2024-05-01T12:00:00Z" -> "2024-05-01"
fn date_part(timestamp: &str) -> Option<&str> {
    let date = timestamp.split('T').next()?.trim();
    (!date.is_empty()).then_some(date)
}

// Joins the three sections into the final message
//
// `tree_text` is plain text and gets escaped here; `readme_text` has
// already been through sanitize_readme()
//
// When the message would exceed MESSAGE_LIMIT the sections are cut inside
// their <code> spans, tree first and README with whatever room is left, so
// every tag stays closed
pub fn compose_message(info_block: &str, tree_text: &str, readme_text: &str) -> String {
    let markup_len = layout(info_block, "", "").chars().count();
    let room = MESSAGE_LIMIT.saturating_sub(markup_len);

    let tree = truncate_markup(&escape_html(tree_text), room);
    let readme = truncate_markup(readme_text, room - tree.chars().count());

    // Only an oversized info block can still overflow here
    truncate_text(&layout(info_block, &tree, &readme), MESSAGE_LIMIT)
}

fn layout(info_block: &str, tree: &str, readme: &str) -> String {
    format!(
        "{info}\n<b>📂 File Structure:</b>\n<code>{tree}</code>\n\n{sep}\n\n<b>📖 README:</b>\n<code>{readme}</code>",
        info = info_block,
        tree = tree,
        sep = SEPARATOR,
        readme = readme,
    )
}
