// src/handler.rs
// =============================================================================
// The inline query handler: GitHub URL in, repository preview out.
//
// Flow for one query:
// 1. trim the text; anything that is not a GitHub repository URL is
//    ignored without an answer (the user is probably still typing)
// 2. fetch the summary (cached)
// 3. success -> one article with the composed message, cached by Telegram
//    for 5 minutes
//    failure -> one "Error" article, cached for 1 second so a retry is not
//    served the stale failure
// =============================================================================

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::{ERROR_CACHE_TIME, SUCCESS_CACHE_TIME};
use crate::github::{RepoFetcher, RepoUrl};
use crate::render::compose_message;
use crate::telegram::{
    InlineAnswer, InlineQuery, InlineQueryHandler, InlineQueryResult, InlineQueryResultArticle,
    InputTextMessageContent, ParseMode,
};

const SUCCESS_TITLE: &str = "GitHub Repository Analysis";
const SUCCESS_DESCRIPTION: &str = "Show repository information";
const ERROR_DESCRIPTION: &str = "Failed to fetch repository information";
const ERROR_MESSAGE: &str =
    "❌ Failed to fetch repository information. Please check the URL and try again.";
const THUMBNAIL_URL: &str = "https://github.com/favicon.ico";
const THUMBNAIL_SIZE: u32 = 64;

pub struct RepoSummaryHandler {
    fetcher: RepoFetcher,
}

impl RepoSummaryHandler {
    pub fn new(fetcher: RepoFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl InlineQueryHandler for RepoSummaryHandler {
    async fn handle(&self, query: &InlineQuery) -> Option<InlineAnswer> {
        let text = query.query.trim();
        let url = RepoUrl::parse(text)?;

        info!(query = text, user_id = query.from.id, "processing query");

        match self.fetcher.fetch(text, &url).await {
            Ok(summary) => {
                let message =
                    compose_message(&summary.info_block, &summary.tree_text, &summary.readme_text);
                info!(query = text, "query processed");
                Some(success_answer(message))
            }
            Err(err) => {
                error!(query = text, error = %err, "error fetching repository info");
                Some(error_answer())
            }
        }
    }
}

fn success_answer(message: String) -> InlineAnswer {
    InlineAnswer {
        results: vec![InlineQueryResult::Article(InlineQueryResultArticle {
            id: "1".to_string(),
            title: SUCCESS_TITLE.to_string(),
            input_message_content: InputTextMessageContent {
                message_text: message,
                parse_mode: ParseMode::Html,
            },
            description: Some(SUCCESS_DESCRIPTION.to_string()),
            thumbnail_url: Some(THUMBNAIL_URL.to_string()),
            thumbnail_width: Some(THUMBNAIL_SIZE),
            thumbnail_height: Some(THUMBNAIL_SIZE),
        })],
        cache_time: SUCCESS_CACHE_TIME,
    }
}

fn error_answer() -> InlineAnswer {
    InlineAnswer {
        results: vec![InlineQueryResult::Article(InlineQueryResultArticle {
            id: "error".to_string(),
            title: "Error".to_string(),
            input_message_content: InputTextMessageContent {
                message_text: ERROR_MESSAGE.to_string(),
                parse_mode: ParseMode::Html,
            },
            description: Some(ERROR_DESCRIPTION.to_string()),
            thumbnail_url: None,
            thumbnail_width: None,
            thumbnail_height: None,
        })],
        cache_time: ERROR_CACHE_TIME,
    }
}
