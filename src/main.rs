// src/main.rs
// =============================================================================
// This is the entry point of the bot.
//
// What happens here:
// 1. Set up logging (RUST_LOG, default "info")
// 2. Load .env, then parse command-line arguments / environment using clap
// 3. Build the application context (HTTP clients, cache, handler)
// 4. Serve inline queries until Ctrl+C
// 5. Exit with proper code (0 = clean shutdown, 2 = startup or fatal error)
// =============================================================================

mod app;           // src/app.rs - application context and wiring
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - runtime configuration and limits
mod error;         // src/error.rs - typed errors
mod github;        // src/github/ - GitHub URL parsing and fetching
mod handler;       // src/handler.rs - the inline query handler
mod render;        // src/render/ - tree, README and message formatting
mod telegram;      // src/telegram/ - Bot API client and dispatcher

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::AppContext;
use cli::Cli;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    if let Some(path) = cli::load_env_file() {
        info!(path = %path.display(), "loaded environment file");
    }

    // A missing BOT_TOKEN makes clap print a usage error and exit here
    let config = Cli::parse().into_config()?;
    let app = AppContext::new(config)?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    app.run(shutdown).await?;

    info!("bot stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("received Ctrl+C, shutting down");
            shutdown.cancel();
        }
        // Keep serving; the process can still be killed
        Err(err) => error!("failed to listen for shutdown signal: {}", err),
    }
}
