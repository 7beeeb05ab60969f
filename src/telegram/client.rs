// src/telegram/client.rs
// =============================================================================
// Minimal Telegram Bot API client.
//
// Three methods are enough for an inline bot:
// - getMe: checks the token at startup
// - getUpdates: long polling for inline queries
// - answerInlineQuery: sends the results back
//
// Every method is a POST of a JSON body to {base}/bot{token}/{method}.
// The token is part of the URL, so transport errors are stripped of their
// URL before they leave this module (see `From<reqwest::Error> for BotError`).
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{Config, USER_AGENT};
use crate::error::BotError;
use crate::telegram::types::{
    AnswerInlineQueryParams, ApiResponse, GetUpdatesParams, InlineAnswer, Update, User,
};

const ALLOWED_UPDATES: &[&str] = &["inline_query"];

#[derive(Clone)]
pub struct BotClient {
    client: Client,
    /// {base}/bot{token}/ - contains the token, never log it
    endpoint: Url,
    request_timeout: Duration,
}

impl BotClient {
    pub fn new(config: &Config) -> Result<Self, BotError> {
        // The "./" keeps "bot123:abc" from being read as a URL scheme
        let endpoint = config
            .telegram_api_url
            .join(&format!("./bot{}/", config.token))?;

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    pub async fn get_me(&self) -> Result<User, BotError> {
        self.call("getMe", &serde_json::json!({}), self.request_timeout)
            .await
    }

    // Long-polls for updates with id >= offset
    //
    // The HTTP timeout is the poll timeout plus the normal request timeout,
    // so an idle poll is never mistaken for a dead connection
    pub async fn get_updates(&self, offset: i64, poll_timeout: Duration) -> Result<Vec<Update>, BotError> {
        let params = GetUpdatesParams {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params, poll_timeout + self.request_timeout)
            .await
    }

    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        answer: &InlineAnswer,
    ) -> Result<(), BotError> {
        let params = AnswerInlineQueryParams {
            inline_query_id,
            results: &answer.results,
            cache_time: answer.cache_time,
        };
        let _: bool = self
            .call("answerInlineQuery", &params, self.request_timeout)
            .await?;
        Ok(())
    }

    // Telegram reports errors with 4xx statuses *and* a JSON envelope, so
    // the status is not checked here; the envelope decides
    async fn call<P, R>(&self, method: &str, params: &P, timeout: Duration) -> Result<R, BotError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response: ApiResponse<R> = self
            .client
            .post(self.endpoint.join(method)?)
            .timeout(timeout)
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }
}
