// src/config.rs
// =============================================================================
// Runtime configuration of the bot, plus the fixed formatting limits.
//
// `Config` is built once at startup (see cli.rs) and shared read-only by
// every component through the `AppContext`.
// =============================================================================

use std::fmt;
use std::time::Duration;

use url::Url;

/// At most this many files are drawn in the file tree.
pub const FILE_LIMIT: usize = 50;

/// Character cap of the README excerpt.
pub const README_CHAR_LIMIT: usize = 1000;

/// Character cap of the whole outgoing message.
pub const MESSAGE_LIMIT: usize = 4000;

/// Seconds Telegram may cache a successful answer.
pub const SUCCESS_CACHE_TIME: u32 = 300;

/// Seconds Telegram may cache an error answer.
pub const ERROR_CACHE_TIME: u32 = 1;

/// Sent with every outbound request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct Config {
    /// Bot access token. Never logged.
    pub token: String,
    /// Base URLs always end with '/' so they can be joined onto.
    pub github_api_url: Url,
    pub github_raw_url: Url,
    pub telegram_api_url: Url,
    pub cache_capacity: u64,
    pub request_timeout: Duration,
    pub answer_deadline: Duration,
    pub poll_timeout: Duration,
}

// Hand-written so the token can never end up in a log line
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("github_api_url", &self.github_api_url.as_str())
            .field("github_raw_url", &self.github_raw_url.as_str())
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .field("cache_capacity", &self.cache_capacity)
            .field("request_timeout", &self.request_timeout)
            .field("answer_deadline", &self.answer_deadline)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

#[cfg(test)]
impl Config {
    // Configuration pointing every upstream at a single mock server
    pub fn for_mock_server(base: &str) -> Self {
        let base = crate::cli::parse_base_url(base).unwrap();
        Self {
            token: "test-token".to_string(),
            github_api_url: base.clone(),
            github_raw_url: base.join("raw/").unwrap(),
            telegram_api_url: base,
            cache_capacity: 100,
            request_timeout: Duration::from_secs(5),
            answer_deadline: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(0),
        }
    }
}
