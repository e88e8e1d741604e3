use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use perfect_fit::bot::{schema, Command};
use perfect_fit::config::{Config, LogFormat};
use perfect_fit::health;
use perfect_fit::localization::init_localization;
use perfect_fit::session::{spawn_expiry_task, SessionStore};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    info!("Starting Perfect Fit Telegram Bot");

    init_localization()?;

    let store = SessionStore::from_config(&config.session);
    spawn_expiry_task(
        Arc::clone(&store),
        Duration::from_secs(config.session.purge_interval_secs),
    );
    info!(
        capacity = config.session.capacity,
        ttl_secs = config.session.ttl.num_seconds(),
        "Session store ready"
    );

    let health_server = tokio::spawn(health::serve(config.listen_addr()));

    let bot = Bot::new(config.bot_token.clone());
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![store])
        .enable_ctrlc_handler()
        .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Dispatcher stopped, shutting down");
        }
        result = health_server => {
            result
                .context("Health endpoint task panicked")?
                .context("Health endpoint failed")?;
        }
    }

    Ok(())
}
