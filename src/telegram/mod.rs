// src/telegram/mod.rs
// =============================================================================
// This module is the bot's side of the Telegram Bot API.
//
// Submodules:
// - types: JSON objects exchanged with the Bot API
// - client: the three API methods we call, over reqwest
// - dispatcher: the polling loop and the InlineQueryHandler trait
//
// Only inline queries are requested; the bot never reads chat messages.
// =============================================================================

mod client;
mod dispatcher;
mod types;

pub use client::BotClient;
pub use dispatcher::{Dispatcher, InlineQueryHandler};
pub use types::{
    InlineAnswer, InlineQuery, InlineQueryResult, InlineQueryResultArticle,
    InputTextMessageContent, ParseMode,
};
#[cfg(test)]
pub use types::User;
