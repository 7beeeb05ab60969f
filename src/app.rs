// src/app.rs
// =============================================================================
// Application context: everything the bot needs, built once at startup.
//
// There is no global state. main.rs builds an `AppContext` from the
// configuration, and the context wires the GitHub fetcher into the inline
// query handler and the handler into the dispatcher.
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::github::RepoFetcher;
use crate::handler::RepoSummaryHandler;
use crate::telegram::{BotClient, Dispatcher};

pub struct AppContext {
    pub config: Arc<Config>,
    pub fetcher: RepoFetcher,
    pub bot: BotClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = RepoFetcher::new(&config).context("failed to create GitHub client")?;
        let bot = BotClient::new(&config).context("failed to create Telegram client")?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            bot,
        })
    }

    // Registers the handlers; the dispatcher owns its own copies of the
    // clients so the context stays usable
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.bot.clone(),
            self.config.answer_deadline,
            self.config.poll_timeout,
        )
        .register(Arc::new(RepoSummaryHandler::new(self.fetcher.clone())))
    }

    // Verifies the token, then serves inline queries until `shutdown`
    //
    // A rejected token is fatal: there is nothing to serve without it
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let me = self
            .bot
            .get_me()
            .await
            .context("Telegram rejected the bot token or is unreachable")?;

        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or("<unknown>"),
            "bot started"
        );

        Arc::new(self.dispatcher()).run(shutdown).await;
        Ok(())
    }
}
