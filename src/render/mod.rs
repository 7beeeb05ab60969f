// src/render/mod.rs
// =============================================================================
// This module turns fetched repository data into Telegram-ready text.
//
// Submodules:
// - tree: draws a list of file paths as an ASCII directory tree
// - readme: strips images from a README and escapes it for HTML
// - truncate: caps text at a character count with a "..." marker
// - message: builds the metadata block and the final HTML message
//
// Nothing in here touches the network; every function is pure and
// deterministic, which keeps the tests small.
// =============================================================================

mod message;
mod readme;
mod tree;
mod truncate;

pub use message::{compose_message, format_info_block, RepoInfo};
pub use readme::sanitize_readme;
pub use tree::render_tree;
pub use truncate::{truncate_markup, truncate_text};
