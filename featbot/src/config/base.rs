//! Base config: Telegram Bot connection and logging. Loaded from env.

use anyhow::{bail, Result};
use std::env;

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// TELEGRAM_BOT_TOKEN, falling back to BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// BOT_USERNAME; fetched with get_me at startup when unset
    pub bot_username: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN if
    /// provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| non_empty_var("TELEGRAM_BOT_TOKEN"))
            .or_else(|| non_empty_var("BOT_TOKEN"));
        let Some(bot_token) = bot_token else {
            bail!("TELEGRAM_BOT_TOKEN not set (or BOT_TOKEN, or --token)");
        };
        let telegram_api_url =
            non_empty_var("TELEGRAM_API_URL").or_else(|| non_empty_var("TELOXIDE_API_URL"));
        let log_file = non_empty_var("LOG_FILE");
        let bot_username =
            non_empty_var("BOT_USERNAME").map(|u| u.trim_start_matches('@').to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            bot_username,
        })
    }

    /// Validate config: token shape `<digits>:<secret>`, telegram_api_url must be a valid URL
    /// if set.
    pub fn validate(&self) -> Result<()> {
        if !is_token_shaped(&self.bot_token) {
            bail!("Bot token is malformed: expected <bot id>:<secret>");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

fn is_token_shaped(token: &str) -> bool {
    match token.split_once(':') {
        Some((id, secret)) => {
            !id.is_empty()
                && id.chars().all(|c| c.is_ascii_digit())
                && !secret.is_empty()
                && !secret.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub(super) fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
