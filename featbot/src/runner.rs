//! Startup: validate config, init logging, build the dispatcher and run polling.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dispatcher::{DispatchContext, Dispatcher, RateLimiter};
use featbot_core::{init_tracing, Bot, ErrorReporter, TracingErrorReporter};
use teloxide::prelude::Requester;
use tracing::{error, info, instrument, warn};

use crate::config::BotConfig;
use crate::handlers::build_registry;
use crate::telegram::{run_polling, TelegramBotAdapter};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Builds the dispatcher from config without touching the network. The runner passes the
/// Telegram adapter; tests pass a mock [`Bot`].
pub fn build_dispatcher(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    reporter: Arc<dyn ErrorReporter>,
    bot_username: Option<String>,
) -> Dispatcher {
    let registry = build_registry(config, bot_username);
    let limiter = RateLimiter::new(config.dispatch.window(), config.dispatch.rate_limit_capacity);

    info!(
        handlers = registry.len(),
        commands = ?registry.command_names(),
        rate_limited = ?config.dispatch.rate_limited_commands,
        window_secs = config.dispatch.rate_limit_window_secs,
        "Handler registry built"
    );

    Dispatcher::new(DispatchContext {
        registry: Arc::new(registry),
        limiter: Arc::new(limiter),
        bot,
        reporter,
        error_reply: config.dispatch.error_reply.clone(),
    })
}

/// Creates the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_telegram_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// BOT_USERNAME when configured, otherwise the username reported by get_me.
async fn resolve_bot_username(bot: &teloxide::Bot, config: &BotConfig) -> Option<String> {
    if let Some(username) = config.bot_username() {
        return Some(username.to_string());
    }
    match bot.get_me().await {
        Ok(me) => me.user.username.clone(),
        Err(e) => {
            warn!(
                error = %e,
                "get_me failed; commands addressed to other bots will not be filtered"
            );
            None
        }
    }
}

fn ensure_log_dir(log_file: &str) -> Result<()> {
    if let Some(parent) = Path::new(log_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Main entry: validate config, init logging, build dispatcher, then poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    if let Some(log_file) = config.log_file() {
        ensure_log_dir(log_file)?;
    }
    init_tracing(config.log_file())?;

    let teloxide_bot = build_telegram_bot(&config)?;
    let bot_username = resolve_bot_username(&teloxide_bot, &config).await;
    info!(bot_username = ?bot_username, "Initializing bot");

    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let dispatcher = Arc::new(build_dispatcher(
        &config,
        adapter,
        Arc::new(TracingErrorReporter),
        bot_username,
    ));

    let sweeper = dispatcher
        .limiter()
        .spawn_sweeper(config.dispatch.window().max(MIN_SWEEP_INTERVAL));

    info!("Bot started successfully");
    run_polling(teloxide_bot, dispatcher).await;

    sweeper.abort();
    if let Err(e) = sweeper.await {
        if !e.is_cancelled() {
            error!(error = %e, "Rate limiter sweeper failed");
        }
    }
    info!("Bot stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_log_dir_creates_parent() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("nested/logs/featbot.log");

        ensure_log_dir(log_file.to_str().unwrap()).unwrap();

        assert!(dir.path().join("nested/logs").is_dir());
        assert!(ensure_log_dir("featbot.log").is_ok());
    }
}
