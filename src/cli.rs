// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The bot is a long-running process, so it has no subcommands. Every flag
// can also be set through an environment variable, which is how the bot is
// usually configured in a container:
//
//   BOT_TOKEN=123:abc repo-peek
//   repo-peek --token 123:abc --cache-capacity 500
//
// A .env file in the working directory is read first (see load_env_file());
// variables already set in the environment win over it.
//
// `Cli::into_config()` turns the raw strings into a validated `Config`.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use url::Url;

use crate::config::Config;

// The whole CLI of the bot
//
// #[derive(Parser)] tells clap to generate the parsing code
// #[arg(env = ...)] makes clap fall back to the environment variable when
// the flag is absent; a missing token is a fatal startup error
#[derive(Parser)]
#[command(
    name = "repo-peek",
    version = "0.1.0",
    about = "A Telegram inline bot that previews GitHub repositories",
    long_about = "repo-peek answers inline queries containing a GitHub repository URL with a \
                  summary of the repository: metadata, a file tree and a README excerpt."
)]
pub struct Cli {
    /// Telegram bot access token (from @BotFather)
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Base URL serving raw repository files
    #[arg(long, env = "GITHUB_RAW_URL", default_value = "https://raw.githubusercontent.com")]
    pub github_raw_url: String,

    /// Base URL of the Telegram Bot API
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// Maximum number of repository summaries kept in memory
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = 100)]
    pub cache_capacity: u64,

    /// Timeout for a single outbound HTTP request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 10)]
    pub request_timeout: u64,

    /// Deadline for answering one inline query, in seconds
    #[arg(long, env = "ANSWER_DEADLINE", default_value_t = 15)]
    pub answer_deadline: u64,

    /// Long-polling timeout passed to getUpdates, in seconds (at least 1)
    #[arg(
        long,
        env = "POLL_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_timeout: u64,
}

impl Cli {
    // Validates the raw arguments and builds the runtime configuration
    //
    // Returns an error naming the offending flag when a base URL does not
    // parse, or when the token is blank
    pub fn into_config(self) -> Result<Config> {
        let token = self.token.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }

        Ok(Config {
            token,
            github_api_url: parse_base_url(&self.github_api_url)
                .context("invalid --github-api-url")?,
            github_raw_url: parse_base_url(&self.github_raw_url)
                .context("invalid --github-raw-url")?,
            telegram_api_url: parse_base_url(&self.telegram_api_url)
                .context("invalid --telegram-api-url")?,
            cache_capacity: self.cache_capacity,
            request_timeout: Duration::from_secs(self.request_timeout),
            answer_deadline: Duration::from_secs(self.answer_deadline),
            poll_timeout: Duration::from_secs(self.poll_timeout),
        })
    }
}

// Loads a .env file from the working directory or one of its parents
//
// Returns the path that was loaded. A missing file is normal; a file that
// exists but cannot be parsed is reported and otherwise ignored
pub fn load_env_file() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable .env file");
            None
        }
    }
}

// Parses a base URL and makes sure its path ends with '/'
//
// Url::join() replaces the last path segment unless the base ends with a
// slash, so "http://host/api" + "repos/x" would otherwise lose "api"
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("'{}' is not a URL", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("'{}' cannot be used as a base URL", raw);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
