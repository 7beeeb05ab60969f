// src/error.rs
// =============================================================================
// Typed errors for the two HTTP-facing components.
//
// - FetchError: the GitHub side. Only the metadata call can produce one;
//   tree and README failures degrade to placeholder text instead.
// - BotError: the Telegram Bot API side.
//
// main.rs and app.rs use anyhow at the process boundary; everything below
// that returns one of these.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Metadata call returned a non-success status or GitHub's error envelope.
    #[error("repository {owner}/{repo} not found or inaccessible: {reason}")]
    NotFound {
        owner: String,
        repo: String,
        reason: String,
    },

    /// Transport failure or an undecodable metadata body.
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not build GitHub endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum BotError {
    /// Transport failure. The URL is stripped because it embeds the token.
    #[error("Bot API request failed: {0}")]
    Http(reqwest::Error),

    /// The Bot API answered with `ok: false`.
    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Bot API returned ok without a result")]
    EmptyResult,

    #[error("could not build Bot API endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Http(err.without_url())
    }
}
