// src/render/readme.rs
// =============================================================================
// Cleans a README so it can be shown inside a Telegram HTML message.
//
// Telegram's HTML mode only understands a handful of tags, and images are
// useless in a text preview anyway. Steps, in this order:
//   1. drop <img ...> tags
//   2. drop markdown images ![alt](url)
//   3. escape < and > so the rest is shown literally
//   4. collapse 3+ newlines into one blank line
//   5. trim
//
// Escaping must come after step 1 (otherwise the tags are no longer
// recognisable), and collapsing must come after both removals so the holes
// they leave behind get squeezed too.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

// The patterns are constants, so compiling them can only fail if the
// source itself is wrong
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img[^>]*>").expect("img tag pattern is valid"));
static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("markdown image pattern is valid"));
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

pub fn sanitize_readme(text: &str) -> String {
    let text = IMG_TAG.replace_all(text, "");
    let text = MARKDOWN_IMAGE.replace_all(&text, "");
    let text = text.replace('<', "&lt;").replace('>', "&gt;");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}
