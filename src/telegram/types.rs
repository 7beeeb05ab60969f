// src/telegram/types.rs
// =============================================================================
// The subset of the Telegram Bot API objects that an inline bot needs.
//
// Inbound (Deserialize): Update, InlineQuery, User and the response envelope.
// Outbound (Serialize): inline query results and the request parameters of
// getUpdates / answerInlineQuery.
//
// Field names follow the Bot API exactly, so serde needs no renames except
// for the `type` tag of results.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::BotError;

// Every Bot API response is wrapped in this envelope
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, BotError> {
        if !self.ok {
            return Err(BotError::Api {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        self.result.ok_or(BotError::EmptyResult)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// Only set for inline query updates; every other kind is skipped
    #[serde(default)]
    pub inline_query: Option<InlineQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    pub parse_mode: ParseMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineQueryResultArticle {
    pub id: String,
    pub title: String,
    pub input_message_content: InputTextMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<u32>,
}

// Only articles are ever sent; the enum carries the `"type"` tag the Bot API
// expects on every result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineQueryResult {
    Article(InlineQueryResultArticle),
}

// What a handler hands back to the dispatcher for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAnswer {
    pub results: Vec<InlineQueryResult>,
    /// Seconds Telegram may cache these results
    pub cache_time: u32,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesParams {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct AnswerInlineQueryParams<'a> {
    pub inline_query_id: &'a str,
    pub results: &'a [InlineQueryResult],
    pub cache_time: u32,
}
