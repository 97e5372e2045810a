//! BotConfig: BaseConfig + DispatchConfig + LinksConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, DispatchConfig, LinksConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub dispatch: DispatchConfig,
    pub links: LinksConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides
    /// TELEGRAM_BOT_TOKEN / BOT_TOKEN. Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            dispatch: DispatchConfig::from_env()?,
            links: LinksConfig::from_env(),
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.dispatch.validate()?;
        self.links.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> Option<&str> {
        self.base.log_file.as_deref()
    }
    pub fn bot_username(&self) -> Option<&str> {
        self.base.bot_username.as_deref()
    }
}
