// src/telegram/dispatcher.rs
// =============================================================================
// Long-polling loop that routes inline queries to registered handlers.
//
// How it works:
// 1. getUpdates blocks until Telegram has something (or the poll times out)
// 2. every inline query is handed to its own tokio task
// 3. the task asks each handler in registration order; the first one that
//    returns an answer wins, and that answer is sent with answerInlineQuery
// 4. a handler that takes longer than the answer deadline is dropped, which
//    also abandons its in-flight HTTP requests
//
// Shutdown: cancelling the token stops polling, then the loop waits for the
// tasks already running. Each of those is bounded by the deadline.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::telegram::client::BotClient;
use crate::telegram::types::{InlineAnswer, InlineQuery};

// Pause before polling again after getUpdates failed
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

#[async_trait]
pub trait InlineQueryHandler: Send + Sync {
    // Returns None to leave the query unanswered
    async fn handle(&self, query: &InlineQuery) -> Option<InlineAnswer>;
}

pub struct Dispatcher {
    bot: BotClient,
    handlers: Vec<Arc<dyn InlineQueryHandler>>,
    answer_deadline: Duration,
    poll_timeout: Duration,
}

impl Dispatcher {
    pub fn new(bot: BotClient, answer_deadline: Duration, poll_timeout: Duration) -> Self {
        Self {
            bot,
            handlers: Vec::new(),
            answer_deadline,
            poll_timeout,
        }
    }

    pub fn register(mut self, handler: Arc<dyn InlineQueryHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    // Polls until `shutdown` is cancelled, then drains in-flight queries
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        let mut offset: i64 = 0;
        let mut tasks = JoinSet::new();

        info!(handlers = self.handlers.len(), "dispatcher started");

        loop {
            let polled = tokio::select! {
                _ = shutdown.cancelled() => break,
                polled = self.bot.get_updates(offset, self.poll_timeout) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id.saturating_add(1));

                        let Some(query) = update.inline_query else {
                            debug!(update_id = update.update_id, "skipping non-inline update");
                            continue;
                        };

                        let dispatcher = Arc::clone(&self);
                        tasks.spawn(async move { dispatcher.dispatch(query).await });
                    }
                }
                Err(err) => {
                    warn!(error = %err, "getUpdates failed, retrying");
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => {}
                    }
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                log_task_outcome(joined);
            }
        }

        if !tasks.is_empty() {
            info!(in_flight = tasks.len(), "waiting for in-flight queries");
        }
        while let Some(joined) = tasks.join_next().await {
            log_task_outcome(joined);
        }
        info!("dispatcher stopped");
    }

    // Runs the handlers for one query and sends the first answer produced
    pub async fn dispatch(&self, query: InlineQuery) {
        for handler in &self.handlers {
            let answer =
                match tokio::time::timeout(self.answer_deadline, handler.handle(&query)).await {
                    Ok(answer) => answer,
                    Err(_) => {
                        warn!(
                            query_id = %query.id,
                            deadline_secs = self.answer_deadline.as_secs(),
                            "handler missed the answer deadline"
                        );
                        return;
                    }
                };

            if let Some(answer) = answer {
                if let Err(err) = self.bot.answer_inline_query(&query.id, &answer).await {
                    error!(query_id = %query.id, error = %err, "failed to answer inline query");
                }
                return;
            }
        }
        debug!(query_id = %query.id, "no handler answered the query");
    }
}

fn log_task_outcome(joined: Result<(), tokio::task::JoinError>) {
    if let Err(err) = joined {
        error!(error = %err, "inline query task failed");
    }
}
